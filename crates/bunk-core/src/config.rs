//! house.toml configuration parser.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_LIKELIHOOD_THRESHOLD, SleepingUnit};
use crate::weights::{CapacityWeights, PenaltyWeights};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseConfig {
    pub event: EventConfig,
    #[serde(default)]
    pub capacity: CapacityWeights,
    #[serde(default)]
    pub penalties: PenaltyWeights,
    pub units: Vec<SleepingUnit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    pub name: String,
    #[serde(default = "default_threshold")]
    pub likelihood_threshold: u8,
}

fn default_threshold() -> u8 {
    DEFAULT_LIKELIHOOD_THRESHOLD
}

impl HouseConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: HouseConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in layout.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::scaffold("Weekend at the House"))
        }
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.event.likelihood_threshold > 100 {
            bail!(
                "likelihood_threshold must be 0..=100, got {}",
                self.event.likelihood_threshold
            );
        }
        if self.units.is_empty() {
            bail!("house has no sleeping units");
        }
        let mut seen = HashSet::new();
        for unit in &self.units {
            unit.validate()?;
            if !seen.insert(unit.id.as_str()) {
                bail!("duplicate unit id: {}", unit.id);
            }
        }
        Ok(())
    }

    /// Units open to guests (everything except the host's room).
    pub fn guest_units(&self) -> Vec<SleepingUnit> {
        self.units.iter().filter(|u| !u.reserved).cloned().collect()
    }

    pub fn unit(&self, id: &str) -> Option<&SleepingUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Scaffold the default seven-unit house.
    pub fn scaffold(name: &str) -> Self {
        let unit = |id: &str, name: &str, beds: &[&str], capacity: u32, reserved: bool| SleepingUnit {
            id: id.to_string(),
            name: name.to_string(),
            beds: beds.iter().map(|b| b.to_string()).collect(),
            capacity,
            reserved,
        };
        HouseConfig {
            event: EventConfig {
                name: name.to_string(),
                likelihood_threshold: DEFAULT_LIKELIHOOD_THRESHOLD,
            },
            capacity: CapacityWeights::default(),
            penalties: PenaltyWeights::default(),
            units: vec![
                unit("room-1", "Bedroom 1 (Master)", &["King"], 2, false),
                unit("room-2", "Bedroom 2", &["King"], 2, true),
                unit("room-3", "Bedroom 3", &["King", "Double"], 4, false),
                unit("room-4", "Bedroom 4", &["King", "Twin"], 3, false),
                unit("room-5", "Bedroom 5", &["King", "Twin"], 3, false),
                unit("unit-6", "Garage / Flexible", &["Air Mattress"], 2, false),
                unit("unit-7", "Common Area", &["Cot"], 1, false),
            ],
        }
    }
}

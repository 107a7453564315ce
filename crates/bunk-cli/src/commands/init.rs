use std::path::Path;

use anyhow::{Context, bail};
use bunk_core::HouseConfig;
use tracing::info;

/// Write a `house.toml` scaffold describing the default house.
pub fn init(path: &Path, name: &str, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let config = HouseConfig::scaffold(name);
    std::fs::write(path, config.to_toml_string()?)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), units = config.units.len(), "house scaffold written");
    println!("✓ Generated {}", path.display());
    Ok(())
}

//! Templated plan summary.

/// Counters collected during a solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanTally {
    pub candidates: usize,
    pub confirmed_placed: usize,
    pub likely_placed: usize,
    pub waitlisted: usize,
    pub violations: usize,
    pub units_used: usize,
}

impl PlanTally {
    pub fn placed(&self) -> usize {
        self.confirmed_placed + self.likely_placed
    }
}

/// One short paragraph explaining the plan.
pub fn summarize(tally: &PlanTally) -> String {
    if tally.candidates == 0 {
        return "Nobody to room yet: no confirmed or likely guests in the pool.".to_string();
    }

    let mut text = format!(
        "Placed {} of {} {} across {} {}. Confirmed guests ({} placed) were roomed before \
         likely guests ({} placed), and bigger parties went first so families stay together.",
        tally.placed(),
        tally.candidates,
        plural(tally.candidates, "group", "groups"),
        tally.units_used,
        plural(tally.units_used, "room", "rooms"),
        tally.confirmed_placed,
        tally.likely_placed,
    );

    if tally.waitlisted > 0 {
        text.push_str(&format!(
            " {} {} waitlisted for lack of beds.",
            tally.waitlisted,
            plural(tally.waitlisted, "group is", "groups are"),
        ));
    } else {
        text.push_str(" Everyone has a bed.");
    }

    if tally.violations > 0 {
        text.push_str(&format!(
            " {} {} could not be honored; see conflicts.",
            tally.violations,
            plural(tally.violations, "preference", "preferences"),
        ));
    }
    text
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

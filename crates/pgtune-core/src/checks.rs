//! Checks that flag inputs outside the range the recommendations are
//! calibrated for.

use tracing::debug;

use crate::input::TuningInput;
use crate::settings::WarningList;

/// Above this much RAM the fixed ratios stop being good advice.
const HIGH_MEMORY_GB: f64 = 256.0;

pub const HIGH_MEMORY_WARNING: &str =
    "WARNING this tool not being optimal for very high memory systems";

pub trait TuningCheck: Send + Sync {
    fn id(&self) -> &'static str;
    fn evaluate(&self, input: &TuningInput) -> Option<String>;
}

pub fn all_checks() -> Vec<Box<dyn TuningCheck>> {
    vec![Box::new(HighMemoryCheck)]
}

// ============================================================
// HighMemoryCheck
// ============================================================

pub struct HighMemoryCheck;

impl TuningCheck for HighMemoryCheck {
    fn id(&self) -> &'static str {
        "high_memory"
    }

    fn evaluate(&self, input: &TuningInput) -> Option<String> {
        (input.memory_gb > HIGH_MEMORY_GB).then(|| HIGH_MEMORY_WARNING.to_string())
    }
}

/// Runs every registered check against `input`.
pub fn warnings(input: &TuningInput) -> WarningList {
    let mut list = WarningList::new();
    for check in all_checks() {
        if let Some(message) = check.evaluate(input) {
            debug!(check = check.id(), "tuning check raised a warning");
            list.push(message);
        }
    }
    list
}

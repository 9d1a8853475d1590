//! Step 5: rename the endpoint-path phase field from `initialT` to `t`,
//! dropping zero values entirely.
//!
//! A zero phase means "start at the beginning of the cycle", which is also
//! what an absent field means, so zero is never materialized on disk. The
//! step walks every endpoint path a laser or button can carry, in any of
//! the historical field layouts.

use serde_json::Value;

use super::{buttons_mut, for_each_endpoint_path, lasers_mut, MigrationStep, StepOutcome};
use crate::error::Result;

pub struct RenamePhase;

impl MigrationStep for RenamePhase {
    fn name(&self) -> &'static str {
        "rename-initial-t"
    }

    fn description(&self) -> &'static str {
        "Rename initialT to t on endpoint paths, omitting zero phases"
    }

    fn apply(&self, doc: &mut Value) -> Result<StepOutcome> {
        let mut changed = false;
        let mut rename = |path: &mut serde_json::Map<String, Value>| {
            if let Some(value) = path.remove("initialT") {
                if value.as_f64() != Some(0.0) {
                    path.insert("t".to_string(), value);
                }
                changed = true;
            }
        };
        for laser in lasers_mut(doc) {
            for_each_endpoint_path(laser, &mut rename);
        }
        for button in buttons_mut(doc) {
            for_each_endpoint_path(button, &mut rename);
        }
        Ok(if changed {
            StepOutcome::Changed
        } else {
            StepOutcome::Unchanged
        })
    }
}

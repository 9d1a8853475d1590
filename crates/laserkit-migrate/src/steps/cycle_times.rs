//! Step 2: correct one-way `cycleSeconds` values to full round trips.
//!
//! The first-generation converter stored the legacy one-way sweep time as
//! the cycle, halving every sweeper's rendered speed. Whether a stored
//! value is one-way is provenance, not something the number itself can
//! reveal, so this step is gated by the document schema stamp: converters
//! that emit round trips stamp [`ROUND_TRIP_CYCLES_VERSION`], and a stamped
//! document is never corrected again.

use serde_json::Value;

use super::{
    for_each_endpoint_path, lasers_mut, schema_version, stamp_schema_version, MigrationStep,
    StepOutcome, ROUND_TRIP_CYCLES_VERSION,
};
use crate::error::Result;

pub struct FixCycleTimes;

impl MigrationStep for FixCycleTimes {
    fn name(&self) -> &'static str {
        "fix-cycle-times"
    }

    fn description(&self) -> &'static str {
        "Double one-way cycleSeconds values into full round trips"
    }

    fn apply(&self, doc: &mut Value) -> Result<StepOutcome> {
        if schema_version(doc) >= ROUND_TRIP_CYCLES_VERSION {
            return Ok(StepOutcome::Unchanged);
        }

        let mut changed = false;
        for laser in lasers_mut(doc) {
            for_each_endpoint_path(laser, &mut |path| {
                if let Some(cycle) = path.get("cycleSeconds").and_then(Value::as_f64) {
                    path.insert("cycleSeconds".to_string(), Value::from(cycle * 2.0));
                    changed = true;
                }
            });
        }

        if changed {
            stamp_schema_version(doc, ROUND_TRIP_CYCLES_VERSION);
            Ok(StepOutcome::Changed)
        } else {
            Ok(StepOutcome::Unchanged)
        }
    }
}

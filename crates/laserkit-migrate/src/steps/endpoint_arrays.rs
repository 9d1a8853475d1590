//! Step 3: generalize endpoint storage into the `endpoints` array.
//!
//! Rays and buttons kept a single `endpoint`; segments kept a
//! `startEndpoint`/`endEndpoint` pair. Everything now exposes its paths
//! through one ordered `endpoints` array (start first), which is what lets
//! lasers and buttons share a single motion abstraction.

use serde_json::{Map, Value};

use super::{buttons_mut, lasers_mut, MigrationStep, StepOutcome};
use crate::error::Result;

pub struct EndpointArrays;

impl MigrationStep for EndpointArrays {
    fn name(&self) -> &'static str {
        "endpoint-arrays"
    }

    fn description(&self) -> &'static str {
        "Wrap singular endpoint fields into the generalized endpoints array"
    }

    fn apply(&self, doc: &mut Value) -> Result<StepOutcome> {
        let mut changed = false;
        for laser in lasers_mut(doc) {
            changed |= generalize(laser);
        }
        for button in buttons_mut(doc) {
            changed |= generalize(button);
        }
        Ok(if changed {
            StepOutcome::Changed
        } else {
            StepOutcome::Unchanged
        })
    }
}

/// Rewrite one laser or button object. Keys off field names only: records
/// already in array form, and records from eras this step predates, are
/// left untouched.
fn generalize(obj: &mut Map<String, Value>) -> bool {
    if obj.contains_key("endpoints") {
        return false;
    }
    if let Some(endpoint) = obj.remove("endpoint") {
        obj.insert("endpoints".to_string(), Value::Array(vec![endpoint]));
        return true;
    }
    if obj.contains_key("startEndpoint") && obj.contains_key("endEndpoint") {
        if let (Some(start), Some(end)) = (obj.remove("startEndpoint"), obj.remove("endEndpoint"))
        {
            obj.insert("endpoints".to_string(), Value::Array(vec![start, end]));
            return true;
        }
    }
    false
}

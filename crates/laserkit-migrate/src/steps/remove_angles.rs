//! Step 4: drop the stored `initialAngle` from ray lasers.
//!
//! The angle a converted ray started with is derivable from its endpoint
//! path geometry, and storing it invited drift between the two. Consumers
//! now derive it; the field goes away.

use serde_json::Value;

use super::{lasers_mut, MigrationStep, StepOutcome};
use crate::error::Result;

pub struct RemoveAngles;

impl MigrationStep for RemoveAngles {
    fn name(&self) -> &'static str {
        "remove-angles"
    }

    fn description(&self) -> &'static str {
        "Delete the stored initialAngle from ray lasers"
    }

    fn apply(&self, doc: &mut Value) -> Result<StepOutcome> {
        let mut changed = false;
        for laser in lasers_mut(doc) {
            let is_ray = laser.get("type").and_then(Value::as_str) == Some("ray");
            if is_ray && laser.remove("initialAngle").is_some() {
                changed = true;
            }
        }
        Ok(if changed {
            StepOutcome::Changed
        } else {
            StepOutcome::Unchanged
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_removes_angle_from_rays() {
        let mut doc = json!({
            "lasers": [
                {
                    "id": "laser-1",
                    "type": "ray",
                    "endpoints": [{ "points": [{ "x": 5.0, "y": 5.0 }] }],
                    "initialAngle": 1.5707963267948966,
                    "rotationSpeed": 0.0
                },
                {
                    "id": "laser-2",
                    "type": "segment",
                    "endpoints": [
                        { "points": [{ "x": 0.0, "y": 0.0 }] },
                        { "points": [{ "x": 10.0, "y": 0.0 }] }
                    ]
                }
            ]
        });
        assert!(RemoveAngles.apply(&mut doc).unwrap().changed());
        assert!(doc["lasers"][0].get("initialAngle").is_none());
        assert_eq!(doc["lasers"][0]["rotationSpeed"], json!(0.0));
    }

    #[test]
    fn test_idempotent() {
        let mut doc = json!({
            "lasers": [{
                "id": "laser-1",
                "type": "ray",
                "endpoints": [{ "points": [{ "x": 5.0, "y": 5.0 }] }],
                "initialAngle": 3.14159,
                "rotationSpeed": 0.0
            }]
        });
        RemoveAngles.apply(&mut doc).unwrap();
        let once = doc.clone();

        assert_eq!(RemoveAngles.apply(&mut doc).unwrap(), StepOutcome::Unchanged);
        assert_eq!(doc, once);
    }
}

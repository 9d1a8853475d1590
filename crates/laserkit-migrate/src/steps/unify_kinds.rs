//! Step 1: collapse the legacy sweeper/rotor/segment kinds into flat
//! ray/segment records.
//!
//! Before this migration a laser nested its shape under a `kind` object.
//! Afterwards the record is flat: a `type` tag, a singular `endpoint`
//! (rays) or a `startEndpoint`/`endEndpoint` pair (segments), a stored
//! `initialAngle` on rays, and a `rotationSpeed`. Later steps generalize
//! the endpoint fields into the `endpoints` array and drop the angle.
//!
//! Unlike the first-generation converter this step emits round-trip
//! `cycleSeconds` values and never materializes a zero phase, so its output
//! needs neither the cycle-time correction nor the phase rename; it records
//! that by stamping the document schema version.

use laserkit_core::{LaserKind, LegacyKind, LevelError};
use serde_json::{Map, Value};

use super::{
    lasers_mut, stamp_schema_version, MigrationStep, StepOutcome, ROUND_TRIP_CYCLES_VERSION,
};
use crate::error::Result;

pub struct UnifyKinds;

impl MigrationStep for UnifyKinds {
    fn name(&self) -> &'static str {
        "unify-kinds"
    }

    fn description(&self) -> &'static str {
        "Collapse nested sweeper/rotor/segment kinds into flat ray/segment records"
    }

    fn apply(&self, doc: &mut Value) -> Result<StepOutcome> {
        let mut converted = false;
        for laser in lasers_mut(doc) {
            let Some(kind_value) = laser.get("kind") else {
                continue;
            };
            let canonical = LegacyKind::from_value(kind_value)?.into_canonical()?;
            *laser = flatten_record(laser, canonical)?;
            converted = true;
        }
        if converted {
            stamp_schema_version(doc, ROUND_TRIP_CYCLES_VERSION);
            Ok(StepOutcome::Changed)
        } else {
            Ok(StepOutcome::Unchanged)
        }
    }
}

/// Rebuild the laser record around the decoded kind, keeping the common
/// fields and discarding the nested shape.
fn flatten_record(old: &Map<String, Value>, kind: LaserKind) -> Result<Map<String, Value>> {
    let mut record = Map::new();
    for field in ["id", "color", "thickness"] {
        let value = old.get(field).cloned().ok_or(LevelError::MissingField {
            field,
            context: "legacy laser",
        })?;
        record.insert(field.to_string(), value);
    }
    record.insert(
        "enabled".to_string(),
        old.get("enabled").cloned().unwrap_or(Value::Bool(true)),
    );
    if let Some(cadence) = old.get("cadence") {
        if !cadence.is_null() {
            record.insert("cadence".to_string(), cadence.clone());
        }
    }

    match kind {
        LaserKind::Ray {
            endpoints,
            initial_angle,
            rotation_speed,
        } => {
            let Some(endpoint) = endpoints.into_iter().next() else {
                return Err(LevelError::InvalidEndpointPath {
                    reason: "decoded ray carries no endpoint path".to_string(),
                }
                .into());
            };
            record.insert("type".to_string(), Value::from("ray"));
            record.insert("endpoint".to_string(), serde_json::to_value(&endpoint)?);
            if let Some(angle) = initial_angle {
                record.insert("initialAngle".to_string(), Value::from(angle));
            }
            record.insert("rotationSpeed".to_string(), Value::from(rotation_speed));
        }
        LaserKind::Segment { endpoints } => {
            let mut paths = endpoints.into_iter();
            let (Some(start), Some(end)) = (paths.next(), paths.next()) else {
                return Err(LevelError::InvalidEndpointPath {
                    reason: "decoded segment carries fewer than two endpoint paths".to_string(),
                }
                .into());
            };
            record.insert("type".to_string(), Value::from("segment"));
            record.insert("startEndpoint".to_string(), serde_json::to_value(&start)?);
            record.insert("endEndpoint".to_string(), serde_json::to_value(&end)?);
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_sweeper_doc() -> Value {
        json!({
            "lasers": [{
                "id": "laser-1",
                "color": "red",
                "thickness": 2.0,
                "kind": {
                    "type": "sweeper",
                    "sweeper": {
                        "start": { "x": 0.0, "y": 0.0 },
                        "end": { "x": 10.0, "y": 0.0 },
                        "sweepSeconds": 3.0
                    }
                }
            }]
        })
    }

    #[test]
    fn test_sweeper_flattens_to_ray() {
        let mut doc = legacy_sweeper_doc();
        assert!(UnifyKinds.apply(&mut doc).unwrap().changed());

        let laser = &doc["lasers"][0];
        assert_eq!(laser["type"], "ray");
        assert!(laser.get("kind").is_none());
        assert_eq!(laser["enabled"], json!(true));
        assert_eq!(laser["rotationSpeed"], json!(0.0));
        assert_eq!(
            laser["endpoint"]["points"],
            json!([{ "x": 0.0, "y": 0.0 }, { "x": 10.0, "y": 0.0 }])
        );
        // Round trip, not one-way.
        assert_eq!(laser["endpoint"]["cycleSeconds"], json!(6.0));
        // Zero phase stays sparse.
        assert!(laser["endpoint"].get("t").is_none());
        assert!(
            (laser["initialAngle"].as_f64().unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12
        );
        // Output already satisfies the cycle-time postcondition.
        assert_eq!(doc["schemaVersion"], json!(2));
    }

    #[test]
    fn test_segment_flattens_to_pair() {
        let mut doc = json!({
            "lasers": [{
                "id": "laser-2",
                "color": "blue",
                "thickness": 1.0,
                "cadence": { "onSeconds": 1.0 },
                "kind": {
                    "type": "segment",
                    "segment": {
                        "start": { "x": 1.0, "y": 2.0 },
                        "end": { "x": 3.0, "y": 4.0 }
                    }
                }
            }]
        });
        assert!(UnifyKinds.apply(&mut doc).unwrap().changed());

        let laser = &doc["lasers"][0];
        assert_eq!(laser["type"], "segment");
        assert_eq!(laser["cadence"], json!({ "onSeconds": 1.0 }));
        assert_eq!(laser["startEndpoint"]["points"], json!([{ "x": 1.0, "y": 2.0 }]));
        assert_eq!(laser["endEndpoint"]["points"], json!([{ "x": 3.0, "y": 4.0 }]));
        assert!(laser["startEndpoint"].get("cycleSeconds").is_none());
        assert!(laser.get("initialAngle").is_none());
        assert!(laser.get("rotationSpeed").is_none());
    }

    #[test]
    fn test_unknown_kind_fails_the_file() {
        let mut doc = json!({
            "lasers": [{
                "id": "laser-3",
                "color": "green",
                "thickness": 1.0,
                "kind": { "type": "beam", "beam": {} }
            }]
        });
        let err = UnifyKinds.apply(&mut doc).unwrap_err();
        assert!(err.to_string().contains("beam"));
    }

    #[test]
    fn test_idempotent() {
        let mut doc = legacy_sweeper_doc();
        UnifyKinds.apply(&mut doc).unwrap();
        let once = doc.clone();

        assert_eq!(UnifyKinds.apply(&mut doc).unwrap(), StepOutcome::Unchanged);
        assert_eq!(doc, once);
    }

    #[test]
    fn test_already_flat_document_is_untouched() {
        let mut doc = json!({
            "lasers": [{
                "id": "laser-4",
                "color": "red",
                "thickness": 1.0,
                "type": "ray",
                "endpoints": [{ "points": [{ "x": 5.0, "y": 5.0 }] }],
                "rotationSpeed": 0.0
            }]
        });
        let before = doc.clone();
        assert_eq!(UnifyKinds.apply(&mut doc).unwrap(), StepOutcome::Unchanged);
        assert_eq!(doc, before);
        // No stamp on a no-op.
        assert!(doc.get("schemaVersion").is_none());
    }
}

//! Canonical level documents round-trip through the typed model.

use laserkit_core::{LaserKind, Level};
use serde_json::{json, Value};
use tempfile::TempDir;

fn canonical_level() -> Value {
    json!({
        "name": "Crossfire",
        "lasers": [
            {
                "id": "laser-1",
                "color": "red",
                "thickness": 2.0,
                "enabled": true,
                "type": "ray",
                "endpoints": [{
                    "points": [{ "x": 0.0, "y": 0.0 }, { "x": 10.0, "y": 0.0 }],
                    "cycleSeconds": 6.0,
                    "t": 0.25
                }],
                "rotationSpeed": 0.0
            },
            {
                "id": "laser-2",
                "color": "blue",
                "thickness": 1.0,
                "enabled": true,
                "cadence": { "onSeconds": 2.0, "offSeconds": 1.0 },
                "type": "segment",
                "endpoints": [
                    { "points": [{ "x": 1.0, "y": 2.0 }] },
                    { "points": [{ "x": 3.0, "y": 4.0 }] }
                ]
            }
        ],
        "buttons": [
            {
                "doorId": "door-1",
                "endpoints": [{ "points": [{ "x": 2.0, "y": 3.0 }] }]
            }
        ]
    })
}

#[test]
fn test_canonical_document_roundtrip() {
    let level: Level = serde_json::from_value(canonical_level()).unwrap();
    level.validate().unwrap();

    assert_eq!(level.lasers.len(), 2);
    assert!(matches!(level.lasers[0].kind, LaserKind::Ray { .. }));
    assert!(matches!(level.lasers[1].kind, LaserKind::Segment { .. }));
    assert_eq!(level.lasers[0].kind.endpoints()[0].phase(), 0.25);
    assert_eq!(level.buttons.len(), 1);

    // Nothing is lost or invented on the way back out.
    let back = serde_json::to_value(&level).unwrap();
    assert_eq!(back, canonical_level());
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crossfire.json");

    let level: Level = serde_json::from_value(canonical_level()).unwrap();
    level.save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));
    assert!(text.contains("\n  \"lasers\""));

    let reloaded = Level::load_from_file(&path).unwrap();
    assert_eq!(reloaded, level);
}

#[test]
fn test_validation_catches_bad_endpoint_counts() {
    let mut doc = canonical_level();
    // A segment with a single endpoint path is structurally well-formed
    // JSON but violates the model.
    doc["lasers"][1]["endpoints"]
        .as_array_mut()
        .unwrap()
        .pop();
    let level: Level = serde_json::from_value(doc).unwrap();
    assert!(level.validate().is_err());
}

//! Canonical laser, button, and level records.
//!
//! A level document holds an ordered list of lasers and an ordered list of
//! buttons. Lasers come in two variants discriminated by a `type` tag: a
//! ray pivots around a single endpoint path, a segment stretches between
//! two. Everything the model does not understand (button payloads, level
//! metadata, cadence descriptors) is carried through untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::endpoint::EndpointPath;
use crate::error::{LevelError, Result};

/// The two canonical laser variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LaserKind {
    /// A ray pivots around one endpoint and points outward from it.
    ///
    /// `initial_angle` is only present on data converted from the legacy
    /// kinds; once the angle-removal migration has run, consumers derive
    /// the angle from the endpoint path geometry instead.
    #[serde(rename_all = "camelCase")]
    Ray {
        endpoints: Vec<EndpointPath>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initial_angle: Option<f64>,
        /// Radians per second, signed. Zero means non-rotating.
        #[serde(default)]
        rotation_speed: f64,
    },
    /// A segment runs between two independently moving endpoints.
    #[serde(rename_all = "camelCase")]
    Segment { endpoints: Vec<EndpointPath> },
}

impl LaserKind {
    pub fn endpoints(&self) -> &[EndpointPath] {
        match self {
            LaserKind::Ray { endpoints, .. } => endpoints,
            LaserKind::Segment { endpoints } => endpoints,
        }
    }

    /// Number of endpoint paths this variant must carry.
    pub fn expected_endpoints(&self) -> usize {
        match self {
            LaserKind::Ray { .. } => 1,
            LaserKind::Segment { .. } => 2,
        }
    }
}

/// One laser obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    /// Opaque stable identifier, unique within a level.
    pub id: String,
    /// Display color, opaque to this crate.
    pub color: Value,
    pub thickness: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Optional on/off timing descriptor, passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Value>,
    #[serde(flatten)]
    pub kind: LaserKind,
}

fn default_enabled() -> bool {
    true
}

impl Laser {
    /// Check the per-variant endpoint count and every path's invariants.
    pub fn validate(&self) -> Result<()> {
        let expected = self.kind.expected_endpoints();
        let actual = self.kind.endpoints().len();
        if actual != expected {
            return Err(LevelError::InvalidLaser {
                id: self.id.clone(),
                reason: format!("expected {} endpoint path(s), got {}", expected, actual),
            });
        }
        for path in self.kind.endpoints() {
            path.validate().map_err(|e| LevelError::InvalidLaser {
                id: self.id.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// An interactive button. Only the endpoint paths are modeled; every other
/// field passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub endpoints: Vec<EndpointPath>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One level document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Level {
    /// Migration stamp; absent on documents that predate the stamped
    /// converter. See the cycle-time migration for why it exists.
    #[serde(
        rename = "schemaVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lasers: Vec<Laser>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Level {
    /// Load a level from a JSON document on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let level: Level = serde_json::from_str(&content)?;
        Ok(level)
    }

    /// Save with the corpus formatting contract: 2-space indentation and a
    /// trailing newline, so rewrites stay diff-friendly.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json_string()?)?;
        Ok(())
    }

    /// Encode as the on-disk document text.
    pub fn to_json_string(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Validate every laser and button against the model invariants.
    pub fn validate(&self) -> Result<()> {
        for laser in &self.lasers {
            laser.validate()?;
        }
        for button in &self.buttons {
            if button.endpoints.len() != 1 {
                return Err(LevelError::InvalidButton {
                    reason: format!(
                        "expected 1 endpoint path, got {}",
                        button.endpoints.len()
                    ),
                });
            }
            for path in &button.endpoints {
                path.validate().map_err(|e| LevelError::InvalidButton {
                    reason: e.to_string(),
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use serde_json::json;

    fn ray_json() -> Value {
        json!({
            "id": "laser-1",
            "color": "red",
            "thickness": 2.0,
            "enabled": true,
            "type": "ray",
            "endpoints": [{ "points": [{ "x": 5.0, "y": 5.0 }] }],
            "rotationSpeed": 1.5707963267948966
        })
    }

    #[test]
    fn test_ray_roundtrip() {
        let laser: Laser = serde_json::from_value(ray_json()).unwrap();
        assert!(matches!(laser.kind, LaserKind::Ray { .. }));
        assert!(laser.enabled);
        laser.validate().unwrap();

        let back = serde_json::to_value(&laser).unwrap();
        assert_eq!(back, ray_json());
    }

    #[test]
    fn test_segment_roundtrip() {
        let value = json!({
            "id": "laser-2",
            "color": { "r": 1.0, "g": 0.0, "b": 0.0 },
            "thickness": 1.0,
            "enabled": false,
            "cadence": { "onSeconds": 1.0, "offSeconds": 0.5 },
            "type": "segment",
            "endpoints": [
                { "points": [{ "x": 0.0, "y": 0.0 }] },
                { "points": [{ "x": 10.0, "y": 0.0 }] }
            ]
        });
        let laser: Laser = serde_json::from_value(value.clone()).unwrap();
        assert!(matches!(laser.kind, LaserKind::Segment { .. }));
        assert!(!laser.enabled);
        laser.validate().unwrap();
        assert_eq!(serde_json::to_value(&laser).unwrap(), value);
    }

    #[test]
    fn test_enabled_defaults_true() {
        let mut value = ray_json();
        value.as_object_mut().unwrap().remove("enabled");
        let laser: Laser = serde_json::from_value(value).unwrap();
        assert!(laser.enabled);
    }

    #[test]
    fn test_endpoint_count_is_validated() {
        let laser = Laser {
            id: "laser-9".to_string(),
            color: json!("blue"),
            thickness: 1.0,
            enabled: true,
            cadence: None,
            kind: LaserKind::Segment {
                endpoints: vec![EndpointPath::stationary(Point::new(0.0, 0.0))],
            },
        };
        let err = laser.validate().unwrap_err();
        assert!(matches!(err, LevelError::InvalidLaser { .. }));
    }

    #[test]
    fn test_button_passthrough() {
        let value = json!({
            "doorId": "door-4",
            "radius": 1.25,
            "endpoints": [{ "points": [{ "x": 2.0, "y": 3.0 }] }]
        });
        let button: Button = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(button.endpoints.len(), 1);
        assert_eq!(button.extra.get("doorId"), Some(&json!("door-4")));
        assert_eq!(serde_json::to_value(&button).unwrap(), value);
    }

    #[test]
    fn test_level_document_passthrough() {
        let value = json!({
            "name": "Spinning Gauntlet",
            "par": 3,
            "lasers": [ray_json()],
            "buttons": []
        });
        let level: Level = serde_json::from_value(value).unwrap();
        assert_eq!(level.lasers.len(), 1);
        assert_eq!(level.schema_version, None);
        assert_eq!(level.extra.get("par"), Some(&json!(3)));
        level.validate().unwrap();
    }

    #[test]
    fn test_save_format_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");

        let level: Level =
            serde_json::from_value(json!({ "lasers": [ray_json()] })).unwrap();
        level.save_to_file(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with('\n'));
        assert!(!written.ends_with("\n\n"));
        // 2-space indentation, one level deep.
        assert!(written.contains("\n  \"lasers\""));

        let reloaded = Level::load_from_file(&path).unwrap();
        assert_eq!(reloaded, level);
    }
}

//! Decoders for the three obsolete laser kinds.
//!
//! Before the endpoint-path model, lasers nested their shape under a
//! `kind` object: a moving `sweeper`, a rotating `rotor`, or a fixed
//! `segment`. Each decodes into one of the two canonical variants:
//!
//! - sweeper → ray whose endpoint walks `[start, end]`; the stored one-way
//!   sweep time becomes a full round trip (`cycleSeconds = 2 × sweepSeconds`)
//! - rotor → ray with a stationary endpoint; rotation lives in
//!   `rotationSpeed`, degree fields convert to radians
//! - segment → segment with two stationary endpoints
//!
//! The set is closed: any other tag is a classification error that condemns
//! the whole file's conversion.

use std::f64::consts::FRAC_PI_2;

use serde::Deserialize;
use serde_json::Value;

use crate::endpoint::EndpointPath;
use crate::error::{LevelError, Result};
use crate::geometry::Point;
use crate::laser::LaserKind;

/// Legacy sweeper: a ray whose pivot moves from `start` to `end` in
/// `sweep_seconds`, then returns the same way.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweeperKind {
    pub start: Point,
    pub end: Point,
    pub sweep_seconds: f64,
}

/// Legacy rotor: a ray spinning in place around `center`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotorKind {
    pub center: Point,
    pub speed_degrees_per_second: f64,
    pub initial_angle_degrees: f64,
}

/// Legacy fixed segment between two points.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentKind {
    pub start: Point,
    pub end: Point,
}

/// The closed set of pre-unification laser shapes.
#[derive(Debug, Clone)]
pub enum LegacyKind {
    Sweeper(SweeperKind),
    Rotor(RotorKind),
    Segment(SegmentKind),
}

impl LegacyKind {
    /// Decode a nested `kind` object (`{ "type": tag, tag: {...} }`).
    pub fn from_value(kind: &Value) -> Result<Self> {
        let obj = kind
            .as_object()
            .ok_or(LevelError::MissingField {
                field: "type",
                context: "legacy laser kind",
            })?;
        let tag = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(LevelError::MissingField {
                field: "type",
                context: "legacy laser kind",
            })?;

        let payload = |field: &'static str| -> Result<Value> {
            obj.get(field).cloned().ok_or(LevelError::MissingField {
                field,
                context: "legacy laser kind",
            })
        };

        match tag {
            "sweeper" => Ok(Self::Sweeper(serde_json::from_value(payload("sweeper")?)?)),
            "rotor" => Ok(Self::Rotor(serde_json::from_value(payload("rotor")?)?)),
            "segment" => Ok(Self::Segment(serde_json::from_value(payload("segment")?)?)),
            other => Err(LevelError::UnknownLaserKind {
                kind: other.to_string(),
            }),
        }
    }

    /// Translate into the canonical variant.
    pub fn into_canonical(self) -> Result<LaserKind> {
        match self {
            Self::Sweeper(sweeper) => sweeper.into_ray(),
            Self::Rotor(rotor) => Ok(rotor.into_ray()),
            Self::Segment(segment) => Ok(segment.into_segment()),
        }
    }
}

impl SweeperKind {
    /// A sweeping ray points perpendicular to its own travel direction.
    pub fn into_ray(self) -> Result<LaserKind> {
        let initial_angle = self.start.angle_to(&self.end) + FRAC_PI_2;
        // The stored time is one-way; the cycle covers the return leg too.
        // A sweep between equal endpoints never moves, so it collapses to a
        // stationary pivot instead of keeping a degenerate cycle.
        let cycle_seconds = if self.start == self.end {
            None
        } else {
            Some(self.sweep_seconds * 2.0)
        };
        let path = EndpointPath::from_legacy(vec![self.start, self.end], cycle_seconds)?;
        Ok(LaserKind::Ray {
            endpoints: vec![path],
            initial_angle: Some(initial_angle),
            rotation_speed: 0.0,
        })
    }
}

impl RotorKind {
    pub fn into_ray(self) -> LaserKind {
        LaserKind::Ray {
            endpoints: vec![EndpointPath::stationary(self.center)],
            initial_angle: Some(self.initial_angle_degrees.to_radians()),
            rotation_speed: self.speed_degrees_per_second.to_radians(),
        }
    }
}

impl SegmentKind {
    pub fn into_segment(self) -> LaserKind {
        LaserKind::Segment {
            endpoints: vec![
                EndpointPath::stationary(self.start),
                EndpointPath::stationary(self.end),
            ],
        }
    }
}

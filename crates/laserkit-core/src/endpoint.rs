//! Endpoint paths: where a laser end or a button sits at any moment.
//!
//! An [`EndpointPath`] describes a point's position as a function of time.
//! With a single point and no cycle it is stationary. With two or more
//! points and a `cycle_seconds` it walks the polyline from the first point
//! to the last and back again, one full round trip per cycle. The optional
//! phase `t` offsets where in the cycle the point starts at level load;
//! a zero phase is represented as `None` and is never written to disk.

use serde::{Deserialize, Serialize};

use crate::error::{LevelError, Result};
use crate::geometry::Point;

/// Parametric description of a point that is stationary or cycles back and
/// forth along a polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointPath {
    /// Polyline waypoints. A single point means stationary.
    pub points: Vec<Point>,
    /// Duration of one full round trip across the polyline and back.
    /// `None` means stationary regardless of point count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_seconds: Option<f64>,
    /// Phase offset into the cycle at level load, in seconds.
    /// Absent means phase zero; zero is never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
}

impl EndpointPath {
    /// A path that never moves.
    pub fn stationary(point: Point) -> Self {
        Self {
            points: vec![point],
            cycle_seconds: None,
            t: None,
        }
    }

    /// A path that cycles across `points` once per `cycle_seconds`.
    pub fn moving(points: Vec<Point>, cycle_seconds: f64) -> Result<Self> {
        let path = Self {
            points,
            cycle_seconds: Some(cycle_seconds),
            t: None,
        };
        path.validate()?;
        Ok(path)
    }

    /// Build a path from legacy data, collapsing redundant duplicate points
    /// on stationary paths down to the canonical single point.
    pub fn from_legacy(mut points: Vec<Point>, cycle_seconds: Option<f64>) -> Result<Self> {
        if cycle_seconds.is_none() && points.len() > 1 {
            let first = points[0];
            if points.iter().all(|p| *p == first) {
                points.truncate(1);
            }
        }
        let path = Self {
            points,
            cycle_seconds,
            t: None,
        };
        path.validate()?;
        Ok(path)
    }

    /// Set the phase offset, keeping the "absent = 0" sparsity.
    pub fn with_phase(mut self, t: f64) -> Self {
        self.t = if t == 0.0 { None } else { Some(t) };
        self
    }

    /// Phase offset in seconds, zero when absent.
    pub fn phase(&self) -> f64 {
        self.t.unwrap_or(0.0)
    }

    pub fn is_stationary(&self) -> bool {
        self.cycle_seconds.is_none()
    }

    /// Check the model invariants.
    ///
    /// A path must have at least one point; a cycling path must have a
    /// positive cycle and at least two points; a stationary path must have
    /// exactly one point in canonical form.
    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(LevelError::InvalidEndpointPath {
                reason: "path has no points".to_string(),
            });
        }
        match self.cycle_seconds {
            Some(cycle) if cycle <= 0.0 => Err(LevelError::InvalidEndpointPath {
                reason: format!("cycleSeconds must be positive, got {}", cycle),
            }),
            Some(_) if self.points.len() < 2 => Err(LevelError::InvalidEndpointPath {
                reason: "a cycling path needs at least two points".to_string(),
            }),
            None if self.points.len() > 1 => Err(LevelError::InvalidEndpointPath {
                reason: format!(
                    "a stationary path has exactly one point, got {}",
                    self.points.len()
                ),
            }),
            _ => Ok(()),
        }
    }
}

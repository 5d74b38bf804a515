//! Geometry primitives for radius membership.
//!
//! Contains helper functions for:
//! - Euclidean distance (and its squared form for ordering comparisons)
//! - Boundary-aware radius membership tests used by both the communication
//!   graph and the coverage check

use serde::{Deserialize, Serialize};

/// Simple 2D point in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (no NaN, no infinity).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// How a distance that equals the radius exactly is treated.
///
/// The reference deployment counts a node sitting exactly on the radius as
/// connected (and as covering), so `Inclusive` is the default. `Strict`
/// exists for deployments that need a safety margin at the boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadiusPolicy {
    /// `distance <= radius`
    #[default]
    Inclusive,
    /// `distance < radius`
    Strict,
}

/// Squared Euclidean distance in world units.
///
/// Cheaper than [`distance`] when only the ordering of two distances matters.
pub fn distance2(a: &Position, b: &Position) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Euclidean distance `sqrt((ax-bx)^2 + (ay-by)^2)`.
pub fn distance(a: &Position, b: &Position) -> f64 {
    distance2(a, b).sqrt()
}

/// Boundary-inclusive radius test: `distance(a, b) <= r`.
pub fn within_radius(a: &Position, b: &Position, r: f64) -> bool {
    within_radius_with(RadiusPolicy::Inclusive, a, b, r)
}

/// Radius test under an explicit boundary policy.
///
/// The comparison is done on the true distance rather than on squared
/// values so that a node placed exactly `r` away (e.g. `(1,0)` and `(3,0)`
/// with `r = 2`) lands on the boundary without rounding surprises.
pub fn within_radius_with(policy: RadiusPolicy, a: &Position, b: &Position, r: f64) -> bool {
    let d = distance(a, b);
    match policy {
        RadiusPolicy::Inclusive => d <= r,
        RadiusPolicy::Strict => d < r,
    }
}

//! Physical and numerical constants owned by a simulator instance
//!
//! Every constant the engine depends on lives here rather than in global
//! state, so tests can run with overridden values. The struct deserializes
//! with `serde`; any omitted field falls back to its default.
//!
//! ```json
//! {
//!   "gravitational_constant": 6.6743e-11,
//!   "min_distance": 1.0e9,
//!   "trajectory_capacity": 1000,
//!   "integrator": "rk4",
//!   "anchor": "most_massive",
//!   "merge_on_contact": true
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, Result};
use crate::integrator::IntegratorKind;

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Separation floor for force evaluation, in meters
pub const MIN_DISTANCE: f64 = 1.0e9;

/// Number of past positions kept per body
pub const TRAJECTORY_CAPACITY: usize = 1000;

/// Which body, if any, is held fixed during integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// The heaviest body after the per-tick sort is held fixed and records no trail
    #[default]
    MostMassive,
    /// Every body is integrated; the system is closed
    None,
}

/// Runtime constants for a [`crate::simulator::Simulator`]
///
/// # Examples
///
/// ```
/// use orrery::config::SimulationConfig;
///
/// let config = SimulationConfig {
///     min_distance: 1.0e6,
///     ..SimulationConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// G in m³ kg⁻¹ s⁻²
    pub gravitational_constant: f64,
    /// Separations below this (m) are clamped up to it before computing force
    pub min_distance: f64,
    /// Upper bound on each body's trail length
    pub trajectory_capacity: usize,
    /// Time-stepping scheme applied to every integrated body
    pub integrator: IntegratorKind,
    pub anchor: AnchorPolicy,
    /// Whether overlapping bodies merge at the end of each tick
    pub merge_on_contact: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            min_distance: MIN_DISTANCE,
            trajectory_capacity: TRAJECTORY_CAPACITY,
            integrator: IntegratorKind::default(),
            anchor: AnchorPolicy::default(),
            merge_on_contact: true,
        }
    }
}

impl SimulationConfig {
    /// Checks that the constants describe a usable simulation
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::InvalidConfig`] when G or the distance floor is
    /// not positive and finite, or when the trail capacity is zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.gravitational_constant.is_finite() && self.gravitational_constant > 0.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "gravitational_constant must be positive and finite, got {}",
                self.gravitational_constant
            )));
        }

        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(OrreryError::InvalidConfig(format!(
                "min_distance must be positive and finite, got {}",
                self.min_distance
            )));
        }

        if self.trajectory_capacity == 0 {
            return Err(OrreryError::InvalidConfig(
                "trajectory_capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

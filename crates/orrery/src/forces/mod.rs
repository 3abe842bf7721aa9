//! Force models for the simulator
//!
//! A force model accumulates forces into every body's acceleration for one
//! tick and can report the matching potential energy.

use crate::body::Body;

pub mod gravity;


pub use gravity::{DirectGravity, PairForce};

/// Diagnostic counts from one force pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForceStats {
    /// Pairs evaluated
    pub pairs: usize,
    /// Pairs whose separation was raised to the distance floor
    pub distance_clamps: usize,
    /// Pairs whose force came out non-finite and was dropped
    pub rejected: usize,
}

/// A source of forces on the bodies of a simulation
///
/// # Examples
///
/// ```
/// use orrery::body::Body;
/// use orrery::forces::{DirectGravity, ForceModel};
/// use nalgebra::{Point3, Vector3};
///
/// let mut bodies = vec![
///     Body::new(1.989e30, Point3::origin(), Vector3::zeros(), 6.96e8).unwrap(),
///     Body::new(5.972e24, Point3::new(1.496e11, 0.0, 0.0), Vector3::zeros(), 6.37e6).unwrap(),
/// ];
///
/// let stats = DirectGravity::new().accumulate(&mut bodies);
/// assert_eq!(stats.pairs, 1);
///
/// // Earth is pulled toward the Sun
/// assert!(bodies[1].acceleration().x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Add this tick's forces to every body's accumulator
    ///
    /// # Arguments
    ///
    /// * `bodies` - All bodies in the system, modified through `apply_force`
    ///
    /// # Returns
    ///
    /// Counts of the corrections made along the way
    fn accumulate(&self, bodies: &mut [Body]) -> ForceStats;

    /// Potential energy of the configuration in joules
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _bodies: &[Body]) -> f64 {
        0.0
    }
}

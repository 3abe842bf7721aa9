//! Direct N-body gravity (O(N²) implementation)

use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::body::Body;
use crate::config::{GRAVITATIONAL_CONSTANT, MIN_DISTANCE, SimulationConfig};
use crate::forces::{ForceModel, ForceStats};

/// Gravitational force on one body due to another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairForce {
    /// Force on the first body in N, zero if rejected
    pub force: Vector3<f64>,
    /// Distance actually used for the magnitude (m)
    pub distance: f64,
    /// True if the separation was raised to the distance floor
    pub clamped: bool,
    /// True if the force was non-finite and discarded
    pub rejected: bool,
}

/// Direct O(N²) gravitational force computation
///
/// Every pair is evaluated exactly, with no tree or softening. Separations
/// under the distance floor are clamped up to it, which caps the force at
/// close approach. Scales poorly past a few hundred bodies.
///
/// # Examples
///
/// ```
/// use orrery::body::Body;
/// use orrery::forces::DirectGravity;
/// use nalgebra::{Point3, Vector3};
///
/// let a = Body::new(1.0e24, Point3::origin(), Vector3::zeros(), 1.0).unwrap();
/// let b = Body::new(1.0e24, Point3::new(1.0e10, 0.0, 0.0), Vector3::zeros(), 1.0).unwrap();
///
/// let gravity = DirectGravity::new();
/// let pair = gravity.pair_force(&a, &b);
///
/// // Attractive: a is pulled toward +x
/// assert!(pair.force.x > 0.0);
/// assert!(!pair.clamped);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    /// Gravitational constant in m³ kg⁻¹ s⁻²
    pub g: f64,
    /// Distance floor in m
    pub min_distance: f64,
}

impl DirectGravity {
    /// Creates gravity with the SI value of G and the default 1e9 m floor
    pub fn new() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
            min_distance: MIN_DISTANCE,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            g: config.gravitational_constant,
            min_distance: config.min_distance,
        }
    }

    /// Force on `a` due to `b`
    ///
    /// The result for `(b, a)` is the exact negation of the result for
    /// `(a, b)`. Coincident bodies have no defined direction, so their force
    /// is rejected along with any non-finite magnitude.
    pub fn pair_force(&self, a: &Body, b: &Body) -> PairForce {
        let separation = b.position() - a.position();
        let true_distance = separation.magnitude();

        let clamped = true_distance < self.min_distance;
        let distance = if clamped {
            debug!(
                body_a = a.id().0,
                body_b = b.id().0,
                distance = true_distance,
                floor = self.min_distance,
                "bodies too close, using minimum distance"
            );
            self.min_distance
        } else {
            true_distance
        };

        // Product first so the magnitude is symmetric in a and b
        let magnitude = self.g * (a.mass() * b.mass()) / (distance * distance);

        let force = separation
            .try_normalize(0.0)
            .map(|direction| direction * magnitude)
            .filter(|f| magnitude.is_finite() && f.iter().all(|c| c.is_finite()));

        match force {
            Some(force) => PairForce {
                force,
                distance,
                clamped,
                rejected: false,
            },
            None => {
                warn!(
                    body_a = a.id().0,
                    body_b = b.id().0,
                    distance,
                    mass_a = a.mass(),
                    mass_b = b.mass(),
                    "invalid force magnitude, discarding"
                );
                PairForce {
                    force: Vector3::zeros(),
                    distance,
                    clamped,
                    rejected: true,
                }
            }
        }
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for DirectGravity {
    fn accumulate(&self, bodies: &mut [Body]) -> ForceStats {
        let n = bodies.len();
        let mut stats = ForceStats::default();

        for i in 0..n {
            for j in (i + 1)..n {
                let pair = self.pair_force(&bodies[i], &bodies[j]);

                stats.pairs += 1;
                if pair.clamped {
                    stats.distance_clamps += 1;
                }
                if pair.rejected {
                    stats.rejected += 1;
                    continue;
                }

                bodies[i].apply_force(pair.force);
                bodies[j].apply_force(-pair.force);
            }
        }

        stats
    }

    fn potential_energy(&self, bodies: &[Body]) -> f64 {
        // Each pair counted once, with the same distance floor as the force
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..].iter().map(move |b| {
                    let r = a.distance_to(b).max(self.min_distance);
                    -self.g * (a.mass() * b.mass()) / r
                })
            })
            .sum()
    }
}

/// Speed of a circular orbit of radius `distance` around `central_mass`
///
/// # Arguments
///
/// * `g` - Gravitational constant in m³ kg⁻¹ s⁻²
/// * `central_mass` - Mass of the body being orbited in kg
/// * `distance` - Orbital radius in m
///
/// # Examples
///
/// ```
/// use orrery::config::GRAVITATIONAL_CONSTANT;
/// use orrery::forces::gravity::circular_orbit_speed;
///
/// // Earth around the Sun, about 29.8 km/s
/// let v = circular_orbit_speed(GRAVITATIONAL_CONSTANT, 1.989e30, 1.496e11);
/// assert!((v - 29_780.0).abs() < 100.0);
/// ```
pub fn circular_orbit_speed(g: f64, central_mass: f64, distance: f64) -> f64 {
    (g * central_mass / distance).sqrt()
}

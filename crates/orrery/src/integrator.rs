//! Time integration for a single body
//!
//! Forces are evaluated once per tick, before any body moves. An integrator
//! therefore receives one finalized acceleration and advances a single
//! position/velocity pair by `dt`.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A time-stepping scheme for one body under a fixed acceleration
pub trait Integrator: Send + Sync {
    /// Advance `position` and `velocity` by `dt` seconds
    ///
    /// # Arguments
    ///
    /// * `position` - Position in m (modified in place)
    /// * `velocity` - Velocity in m/s (modified in place)
    /// * `acceleration` - Acceleration in m/s², constant over the step
    /// * `dt` - Timestep in seconds
    fn advance(
        &self,
        position: &mut Point3<f64>,
        velocity: &mut Vector3<f64>,
        acceleration: &Vector3<f64>,
        dt: f64,
    );
}

/// Runge-Kutta 4 stage structure with the acceleration frozen for the step
///
/// Each of the four stages reuses the same acceleration, since forces are
/// only computed once per tick. The stages collapse to
///
/// - v(t + dt) = v + a dt
/// - x(t + dt) = x + v dt + a dt² / 2
///
/// which is exact for constant acceleration but not textbook RK4: the force
/// is not re-evaluated at the intermediate positions.
///
/// # Examples
///
/// ```
/// use orrery::integrator::{ConstantAccelerationRk4, Integrator};
/// use nalgebra::{Point3, Vector3};
///
/// let mut x = Point3::origin();
/// let mut v = Vector3::new(1.0, 0.0, 0.0);
/// let a = Vector3::new(0.0, 2.0, 0.0);
///
/// ConstantAccelerationRk4.advance(&mut x, &mut v, &a, 1.0);
///
/// assert_eq!(x, Point3::new(1.0, 1.0, 0.0));
/// assert_eq!(v, Vector3::new(1.0, 2.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantAccelerationRk4;

impl Integrator for ConstantAccelerationRk4 {
    fn advance(
        &self,
        position: &mut Point3<f64>,
        velocity: &mut Vector3<f64>,
        acceleration: &Vector3<f64>,
        dt: f64,
    ) {
        let half_dt = dt / 2.0;
        let v0 = *velocity;
        let a = *acceleration;

        // (dx/dt, dv/dt) at each stage
        let (k1_x, k1_v) = (v0, a);
        let (k2_x, k2_v) = (v0 + k1_v * half_dt, a);
        let (k3_x, k3_v) = (v0 + k2_v * half_dt, a);
        let (k4_x, k4_v) = (v0 + k3_v * dt, a);

        *position += (k1_x + k2_x * 2.0 + k3_x * 2.0 + k4_x) * dt / 6.0;
        *velocity += (k1_v + k2_v * 2.0 + k3_v * 2.0 + k4_v) * dt / 6.0;
    }
}

/// Semi-implicit (symplectic) Euler: kick the velocity, then drift with it
///
/// First order, but keeps bounded energy error on circular orbits. Useful as
/// a cheap comparison scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn advance(
        &self,
        position: &mut Point3<f64>,
        velocity: &mut Vector3<f64>,
        acceleration: &Vector3<f64>,
        dt: f64,
    ) {
        *velocity += acceleration * dt;
        *position += *velocity * dt;
    }
}

/// Serializable choice of integrator, as stored in the config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    #[default]
    Rk4,
    SemiImplicitEuler,
}

impl Integrator for IntegratorKind {
    fn advance(
        &self,
        position: &mut Point3<f64>,
        velocity: &mut Vector3<f64>,
        acceleration: &Vector3<f64>,
        dt: f64,
    ) {
        match self {
            IntegratorKind::Rk4 => {
                ConstantAccelerationRk4.advance(position, velocity, acceleration, dt)
            }
            IntegratorKind::SemiImplicitEuler => {
                SemiImplicitEuler.advance(position, velocity, acceleration, dt)
            }
        }
    }
}

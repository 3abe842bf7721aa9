use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};
use tracing::warn;

use crate::error::{OrreryError, Result};
use crate::integrator::{ConstantAccelerationRk4, Integrator};
use crate::trajectory::Trajectory;

/// Stable identity of a body within one simulator
///
/// Ids are handed out by [`crate::simulator::Simulator`] and never reused,
/// so they stay valid across sorts and merges while slot indices do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Which state vectors were reset to zero before integrating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Repairs {
    pub velocity: bool,
    pub position: bool,
}

impl Repairs {
    pub fn any(&self) -> bool {
        self.velocity || self.position
    }

    pub fn count(&self) -> usize {
        usize::from(self.velocity) + usize::from(self.position)
    }
}

/// A point mass with a collision radius, in SI units
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    mass: f64, // kg
    radius: f64, // m (collision sphere only)
    position: Point3<f64>, // m
    velocity: Vector3<f64>, // m/s
    acceleration: Vector3<f64>, // m/s², cleared every tick
    trajectory: Trajectory,
}

impl Body {
    /// Creates a body with a cleared accumulator and an empty trail
    ///
    /// The id is a placeholder until the body is inserted into a simulator.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::InvalidMass`] unless the mass is positive and
    /// finite, and [`OrreryError::InvalidRadius`] unless the radius is
    /// non-negative and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use orrery::body::Body;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let earth = Body::new(
    ///     5.972e24,
    ///     Point3::new(1.496e11, 0.0, 0.0),
    ///     Vector3::new(0.0, 29_780.0, 0.0),
    ///     6.37e6,
    /// )
    /// .unwrap();
    /// assert_eq!(earth.mass(), 5.972e24);
    ///
    /// assert!(Body::new(0.0, Point3::origin(), Vector3::zeros(), 1.0).is_err());
    /// ```
    pub fn new(
        mass: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        radius: f64,
    ) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(OrreryError::InvalidMass(mass));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(OrreryError::InvalidRadius(radius));
        }

        Ok(Body {
            id: BodyId(0),
            mass,
            radius,
            position,
            velocity,
            acceleration: Vector3::zeros(),
            trajectory: Trajectory::default(),
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// Acceleration accumulated so far this tick
    pub fn acceleration(&self) -> Vector3<f64> {
        self.acceleration
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Accumulates `force / mass` into the acceleration
    ///
    /// Order of calls within a tick does not matter.
    pub fn apply_force(&mut self, force: Vector3<f64>) {
        self.acceleration += force / self.mass;
    }

    /// Advances the body by `dt` with the frozen-acceleration RK4 scheme
    ///
    /// Must run after every `apply_force` for the tick; anything applied
    /// later lands in the next tick.
    pub fn update(&mut self, dt: f64) -> Repairs {
        self.integrate(dt, &ConstantAccelerationRk4)
    }

    /// Advances the body by `dt` with the given integrator, then clears the accumulator
    ///
    /// Non-finite velocity or position is reset to zero before integrating.
    /// A position that overflows during the step is reset as well, so the
    /// body never leaves a tick with a non-finite position.
    pub fn integrate(&mut self, dt: f64, integrator: &dyn Integrator) -> Repairs {
        let mut repairs = Repairs {
            velocity: self.repair_velocity(),
            position: self.repair_position(),
        };

        integrator.advance(&mut self.position, &mut self.velocity, &self.acceleration, dt);
        self.acceleration = Vector3::zeros();

        repairs.position |= self.repair_position();

        repairs
    }

    /// Drops this tick's accumulated acceleration without moving the body
    pub fn clear_acceleration(&mut self) {
        self.acceleration = Vector3::zeros();
    }

    /// Appends to the trail, evicting the oldest point when full
    pub fn add_to_trajectory(&mut self, position: Point3<f64>) {
        self.trajectory.push(position);
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Volume of the collision sphere in m³
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    pub(crate) fn set_id(&mut self, id: BodyId) {
        self.id = id;
    }

    pub(crate) fn trajectory_mut(&mut self) -> &mut Trajectory {
        &mut self.trajectory
    }

    /// Copy of this body with a new physical state, keeping id and trail
    pub(crate) fn with_state(
        &self,
        mass: f64,
        radius: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Body {
        Body {
            id: self.id,
            mass,
            radius,
            position,
            velocity,
            acceleration: Vector3::zeros(),
            trajectory: self.trajectory.clone(),
        }
    }

    fn repair_velocity(&mut self) -> bool {
        if is_finite(&self.velocity) {
            return false;
        }

        warn!(
            body = self.id.0,
            velocity = ?self.velocity,
            "non-finite velocity, resetting to zero"
        );
        self.velocity = Vector3::zeros();
        true
    }

    fn repair_position(&mut self) -> bool {
        if is_finite(&self.position.coords) {
            return false;
        }

        warn!(
            body = self.id.0,
            position = ?self.position,
            "non-finite position, resetting to origin"
        );
        self.position = Point3::origin();
        true
    }
}

fn is_finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}

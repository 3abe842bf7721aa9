use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::body::{Body, BodyId};
use crate::collisions::{Merger, detect_overlaps, resolve_collisions};
use crate::config::{AnchorPolicy, SimulationConfig};
use crate::error::Result;
use crate::forces::{DirectGravity, ForceModel, ForceStats};

/// What happened during one call to [`Simulator::update`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Force pass diagnostics (clamped and rejected pairs)
    pub forces: ForceStats,
    /// Velocity/position vectors reset to zero before integrating
    pub repairs: usize,
    /// Mergers applied in the collision phase
    pub mergers: Vec<Merger>,
}

impl TickReport {
    pub fn distance_clamps(&self) -> usize {
        self.forces.distance_clamps
    }

    pub fn rejected_forces(&self) -> usize {
        self.forces.rejected
    }
}

/// Owns the bodies of a system and advances them tick by tick
///
/// Each [`update`](Simulator::update) runs, in order:
///
/// 1. Sort by descending mass and designate the anchor
/// 2. Accumulate pairwise gravity on every body
/// 3. Integrate every body except the anchor and record its trail
/// 4. Merge overlapping bodies
///
/// # Examples
///
/// ```
/// use orrery::simulator::Simulator;
/// use orrery::forces::gravity::circular_orbit_speed;
/// use orrery::config::GRAVITATIONAL_CONSTANT;
/// use nalgebra::{Point3, Vector3};
///
/// let mut sim = Simulator::new();
/// let sun = sim.add_body(1.989e30, Point3::origin(), Vector3::zeros(), 6.96e8).unwrap();
///
/// let r = 1.496e11;
/// let v = circular_orbit_speed(GRAVITATIONAL_CONSTANT, 1.989e30, r);
/// let earth = sim
///     .add_body(5.972e24, Point3::new(r, 0.0, 0.0), Vector3::new(0.0, v, 0.0), 6.37e6)
///     .unwrap();
///
/// sim.update(3600.0);
///
/// assert_eq!(sim.anchor(), Some(sun));
/// assert_eq!(sim.get_body(earth).unwrap().trajectory().len(), 1);
/// assert_eq!(sim.get_body(sun).unwrap().trajectory().len(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    gravity: DirectGravity,
    bodies: Vec<Body>,
    /// Body held fixed this tick
    anchor: Option<BodyId>,
    /// Elapsed simulated time in seconds
    time: f64,
    next_id: u32,
}

impl Simulator {
    /// Creates an empty simulator with the default SI constants
    pub fn new() -> Self {
        let config = SimulationConfig::default();
        Self {
            gravity: DirectGravity::from_config(&config),
            config,
            bodies: Vec::new(),
            anchor: None,
            time: 0.0,
            next_id: 0,
        }
    }

    /// Creates an empty simulator with custom constants
    ///
    /// # Errors
    ///
    /// Returns [`crate::OrreryError::InvalidConfig`] if the config fails
    /// [`SimulationConfig::validate`].
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            gravity: DirectGravity::from_config(&config),
            config,
            ..Self::new()
        })
    }

    /// Adds a new body and returns its ID
    ///
    /// # Arguments
    ///
    /// * `mass` - Mass in kg, positive
    /// * `position` - Position in m
    /// * `velocity` - Velocity in m/s
    /// * `radius` - Collision radius in m, non-negative
    ///
    /// # Errors
    ///
    /// Rejects masses and radii that [`Body::new`] rejects.
    pub fn add_body(
        &mut self,
        mass: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        radius: f64,
    ) -> Result<BodyId> {
        let body = Body::new(mass, position, velocity, radius)?;
        Ok(self.insert(body))
    }

    /// Adds a prebuilt body, assigning it a fresh ID
    ///
    /// The body's trail is re-bounded to the configured capacity.
    pub fn insert(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;

        body.set_id(id);
        body.trajectory_mut().set_capacity(self.config.trajectory_capacity);
        self.bodies.push(body);
        self.designate_anchor();

        id
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f64) -> TickReport {
        self.sort_by_mass();
        self.designate_anchor();

        let forces = self.gravity.accumulate(&mut self.bodies);
        let repairs = self.integrate(dt);
        let mergers = if self.config.merge_on_contact {
            self.check_collisions()
        } else {
            Vec::new()
        };

        self.time += dt;

        trace!(
            time = self.time,
            bodies = self.bodies.len(),
            clamps = forces.distance_clamps,
            rejected = forces.rejected,
            repairs,
            mergers = mergers.len(),
            "tick complete"
        );

        TickReport {
            forces,
            repairs,
            mergers,
        }
    }

    /// Merge every overlapping pair, returning the mergers applied
    ///
    /// Runs at the end of every [`update`](Simulator::update) when
    /// `merge_on_contact` is set. Can also be called directly between ticks.
    /// The anchor is re-designated after any merger, since the absorbed body
    /// may have been the anchor.
    pub fn check_collisions(&mut self) -> Vec<Merger> {
        let events = detect_overlaps(&self.bodies);
        if events.is_empty() {
            return Vec::new();
        }

        let mergers = resolve_collisions(&mut self.bodies, &events);
        if !mergers.is_empty() {
            self.designate_anchor();
        }
        mergers
    }

    /// Bodies in their current order, heaviest first after a tick
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get_bodies(&self) -> &[Body] {
        self.bodies()
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// The body held fixed during integration, if any
    pub fn anchor(&self) -> Option<BodyId> {
        self.anchor
    }

    /// Elapsed simulated time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    /// Returns the total momentum of all bodies
    ///
    /// Constant for a closed system without an anchor
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    /// Mass-weighted mean position, `None` when empty
    pub fn center_of_mass(&self) -> Option<Point3<f64>> {
        let total_mass = self.total_mass();
        if self.bodies.is_empty() {
            return None;
        }

        let weighted = self
            .bodies
            .iter()
            .map(|b| b.position().coords * b.mass())
            .fold(Vector3::zeros(), |acc, x| acc + x);
        Some(Point3::from(weighted / total_mass))
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.gravity.potential_energy(&self.bodies)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Stable sort, heaviest first; ties keep insertion order
    fn sort_by_mass(&mut self) {
        self.bodies.sort_by(|a, b| b.mass().total_cmp(&a.mass()));
    }

    /// Heaviest body by value, first one wins on ties
    fn designate_anchor(&mut self) {
        self.anchor = match self.config.anchor {
            AnchorPolicy::None => None,
            AnchorPolicy::MostMassive => self
                .bodies
                .iter()
                .fold(None::<&Body>, |best, b| match best {
                    Some(best) if best.mass() >= b.mass() => Some(best),
                    _ => Some(b),
                })
                .map(|b| b.id()),
        };
    }

    /// Integrate everything but the anchor and extend trails
    fn integrate(&mut self, dt: f64) -> usize {
        let integrator = self.config.integrator;
        let mut repairs = 0;

        for body in self.bodies.iter_mut() {
            if Some(body.id()) == self.anchor {
                body.clear_acceleration();
                continue;
            }

            repairs += body.integrate(dt, &integrator).count();
            let position = body.position();
            body.add_to_trajectory(position);
        }

        repairs
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

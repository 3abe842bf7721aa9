//! Ready-made starting configurations
//!
//! All presets place the central star at the origin at rest and put bodies
//! on prograde orbits in the xy-plane.

use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::forces::gravity::circular_orbit_speed;
use crate::simulator::Simulator;

/// Solar mass in kg
pub const SUN_MASS: f64 = 1.989e30;

/// Solar radius in m
pub const SUN_RADIUS: f64 = 6.96e8;

/// Astronomical unit in m
pub const AU: f64 = 1.496e11;

/// Mass, orbital distance and radius of a planet, in SI units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpec {
    pub name: &'static str,
    pub mass: f64,
    pub distance: f64,
    pub radius: f64,
}

/// The eight planets plus Pluto, innermost first
pub const PLANETS: [PlanetSpec; 9] = [
    PlanetSpec {
        name: "Mercury",
        mass: 3.285e23,
        distance: 57.9e9,
        radius: 2.44e6,
    },
    PlanetSpec {
        name: "Venus",
        mass: 4.867e24,
        distance: 108.2e9,
        radius: 6.05e6,
    },
    PlanetSpec {
        name: "Earth",
        mass: 5.972e24,
        distance: 149.6e9,
        radius: 6.37e6,
    },
    PlanetSpec {
        name: "Mars",
        mass: 6.39e23,
        distance: 227.9e9,
        radius: 3.39e6,
    },
    PlanetSpec {
        name: "Jupiter",
        mass: 1.898e27,
        distance: 778.5e9,
        radius: 69.91e6,
    },
    PlanetSpec {
        name: "Saturn",
        mass: 5.683e26,
        distance: 1.429e12,
        radius: 58.23e6,
    },
    PlanetSpec {
        name: "Uranus",
        mass: 8.681e25,
        distance: 2.871e12,
        radius: 25.36e6,
    },
    PlanetSpec {
        name: "Neptune",
        mass: 1.024e26,
        distance: 4.495e12,
        radius: 24.62e6,
    },
    PlanetSpec {
        name: "Pluto",
        mass: 1.309e22,
        distance: 5.906e12,
        radius: 1.18e6,
    },
];

/// Velocity for a circular orbit at `position` around a mass at the origin
///
/// Perpendicular to the radius vector in the xy-plane, counter-clockwise
/// seen from +z. Only the xy-projection of `position` is used; a position on
/// the z axis has no orbital direction and gets zero velocity.
///
/// # Examples
///
/// ```
/// use orrery::config::GRAVITATIONAL_CONSTANT;
/// use orrery::presets::{SUN_MASS, circular_orbit_velocity};
/// use nalgebra::Point3;
///
/// let v = circular_orbit_velocity(GRAVITATIONAL_CONSTANT, SUN_MASS, Point3::new(1.496e11, 0.0, 0.0));
/// assert_eq!(v.x, 0.0);
/// assert!(v.y > 29_000.0);
/// ```
pub fn circular_orbit_velocity(g: f64, central_mass: f64, position: Point3<f64>) -> Vector3<f64> {
    let r = position.coords.xy().magnitude();
    if r == 0.0 {
        return Vector3::zeros();
    }

    let speed = circular_orbit_speed(g, central_mass, r);
    Vector3::new(-position.y / r, position.x / r, 0.0) * speed
}

/// The Sun and the planets of [`PLANETS`] on circular orbits
///
/// Every planet starts on the +x axis moving in +y. The Sun is inserted
/// first and anchors the system under the default config.
///
/// # Examples
///
/// ```
/// use orrery::config::SimulationConfig;
/// use orrery::presets::solar_system;
///
/// let sim = solar_system(SimulationConfig::default()).unwrap();
/// assert_eq!(sim.body_count(), 10);
/// ```
pub fn solar_system(config: SimulationConfig) -> Result<Simulator> {
    let g = config.gravitational_constant;
    let mut sim = Simulator::with_config(config)?;

    sim.add_body(SUN_MASS, Point3::origin(), Vector3::zeros(), SUN_RADIUS)?;

    for planet in &PLANETS {
        let position = Point3::new(planet.distance, 0.0, 0.0);
        let velocity = circular_orbit_velocity(g, SUN_MASS, position);
        sim.add_body(planet.mass, position, velocity, planet.radius)?;
    }

    Ok(sim)
}

/// Parameters for [`protoplanet_swarm`]
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmParams {
    /// Number of embryos around the star
    pub count: usize,
    /// Orbital radii are drawn uniformly from this range (m)
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Embryo masses are drawn log-uniformly from this range (kg)
    pub min_mass: f64,
    pub max_mass: f64,
    /// Bulk density used to size embryos (kg/m³)
    pub density: f64,
    /// Multiplier on the physical radius, to make encounters frequent
    pub radius_inflation: f64,
    /// Fractional scatter applied to the circular speed
    pub velocity_jitter: f64,
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            count: 24,
            inner_radius: 0.9 * AU,
            outer_radius: 1.1 * AU,
            min_mass: 1.0e22,
            max_mass: 6.0e23,
            density: 5_500.0,
            radius_inflation: 1.0,
            velocity_jitter: 0.02,
        }
    }
}

/// A Sun-mass star surrounded by randomly placed planetary embryos
///
/// Deterministic for a given `seed`.
///
/// # Examples
///
/// ```
/// use orrery::config::SimulationConfig;
/// use orrery::presets::{SwarmParams, protoplanet_swarm};
///
/// let params = SwarmParams { count: 8, ..SwarmParams::default() };
/// let a = protoplanet_swarm(SimulationConfig::default(), &params, 42).unwrap();
/// let b = protoplanet_swarm(SimulationConfig::default(), &params, 42).unwrap();
///
/// assert_eq!(a.body_count(), 9);
/// assert_eq!(a.bodies()[3].position(), b.bodies()[3].position());
/// ```
pub fn protoplanet_swarm(
    config: SimulationConfig,
    params: &SwarmParams,
    seed: u64,
) -> Result<Simulator> {
    let g = config.gravitational_constant;
    let mut sim = Simulator::with_config(config)?;
    let mut rng = ChaChaRng::seed_from_u64(seed);

    sim.add_body(SUN_MASS, Point3::origin(), Vector3::zeros(), SUN_RADIUS)?;

    let (ln_min, ln_max) = (params.min_mass.ln(), params.max_mass.ln());

    for _ in 0..params.count {
        let u: f64 = rng.random();
        let r = params.inner_radius + u * (params.outer_radius - params.inner_radius);
        let angle = rng.random::<f64>() * 2.0 * PI;
        let position = Point3::new(r * angle.cos(), r * angle.sin(), 0.0);

        let jitter = 1.0 + params.velocity_jitter * (2.0 * rng.random::<f64>() - 1.0);
        let velocity = circular_orbit_velocity(g, SUN_MASS, position) * jitter;

        let mass = (ln_min + rng.random::<f64>() * (ln_max - ln_min)).exp();
        let radius = sphere_radius(mass, params.density) * params.radius_inflation;

        sim.add_body(mass, position, velocity, radius)?;
    }

    Ok(sim)
}

/// Radius of a uniform sphere of the given mass and density
pub fn sphere_radius(mass: f64, density: f64) -> f64 {
    (3.0 * mass / (4.0 * PI * density)).cbrt()
}

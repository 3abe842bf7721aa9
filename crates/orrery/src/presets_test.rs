use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::config::{GRAVITATIONAL_CONSTANT, SimulationConfig};
use crate::error::OrreryError;
use crate::presets::*;

#[test]
fn test_solar_system_layout() {
    let sim = solar_system(SimulationConfig::default()).unwrap();

    assert_eq!(sim.body_count(), 10);

    let sun = &sim.bodies()[0];
    assert_eq!(sun.mass(), SUN_MASS);
    assert_eq!(sun.position(), Point3::origin());
    assert_eq!(sim.anchor(), Some(sun.id()));

    for (body, planet) in sim.bodies()[1..].iter().zip(PLANETS.iter()) {
        assert_eq!(body.mass(), planet.mass);
        assert_eq!(body.radius(), planet.radius);
        assert_eq!(body.position(), Point3::new(planet.distance, 0.0, 0.0));
    }
}

#[test]
fn test_solar_system_circular_speeds() {
    let sim = solar_system(SimulationConfig::default()).unwrap();

    for body in &sim.bodies()[1..] {
        let r = body.position().x;
        let v = body.velocity();

        assert_eq!(v.x, 0.0);
        assert_eq!(v.z, 0.0);
        assert_relative_eq!(
            v.y * v.y * r,
            GRAVITATIONAL_CONSTANT * SUN_MASS,
            max_relative = 1e-12
        );
    }

    // Earth near 29.8 km/s
    let earth = &sim.bodies()[3];
    assert!((earth.velocity().y - 29_780.0).abs() < 100.0);
}

#[test]
fn test_solar_system_rejects_bad_config() {
    let config = SimulationConfig {
        trajectory_capacity: 0,
        ..SimulationConfig::default()
    };
    assert!(matches!(solar_system(config), Err(OrreryError::InvalidConfig(_))));
}

#[test]
fn test_solar_system_runs_without_mergers() {
    let mut sim = solar_system(SimulationConfig::default()).unwrap();

    for _ in 0..24 {
        let report = sim.update(3600.0);
        assert!(report.mergers.is_empty());
        assert_eq!(report.repairs, 0);
    }
    assert_eq!(sim.body_count(), 10);
}

#[test]
fn test_circular_orbit_velocity_is_perpendicular() {
    let position = Point3::new(3.0e10, -4.0e10, 0.0);
    let v = circular_orbit_velocity(GRAVITATIONAL_CONSTANT, SUN_MASS, position);

    assert_relative_eq!(v.dot(&position.coords), 0.0, epsilon = 1e-9 * v.magnitude() * 5.0e10);
    assert_relative_eq!(
        v.magnitude_squared() * 5.0e10,
        GRAVITATIONAL_CONSTANT * SUN_MASS,
        max_relative = 1e-12
    );

    // Counter-clockwise seen from +z
    assert!(position.coords.cross(&v).z > 0.0);
}

#[test]
fn test_circular_orbit_velocity_on_axis_is_zero() {
    for position in [Point3::origin(), Point3::new(0.0, 0.0, 1.496e11)] {
        let v = circular_orbit_velocity(GRAVITATIONAL_CONSTANT, SUN_MASS, position);
        assert_eq!(v, Vector3::zeros());
    }
}

#[test]
fn test_swarm_is_deterministic() {
    let params = SwarmParams::default();

    let a = protoplanet_swarm(SimulationConfig::default(), &params, 7).unwrap();
    let b = protoplanet_swarm(SimulationConfig::default(), &params, 7).unwrap();

    assert_eq!(a.body_count(), params.count + 1);
    for (x, y) in a.bodies().iter().zip(b.bodies()) {
        assert_eq!(x.mass(), y.mass());
        assert_eq!(x.position(), y.position());
        assert_eq!(x.velocity(), y.velocity());
    }
}

#[test]
fn test_swarm_differs_across_seeds() {
    let params = SwarmParams::default();

    let a = protoplanet_swarm(SimulationConfig::default(), &params, 1).unwrap();
    let b = protoplanet_swarm(SimulationConfig::default(), &params, 2).unwrap();

    assert_ne!(a.bodies()[1].position(), b.bodies()[1].position());
}

#[test]
fn test_swarm_respects_ranges() {
    let params = SwarmParams {
        count: 64,
        ..SwarmParams::default()
    };
    let sim = protoplanet_swarm(SimulationConfig::default(), &params, 99).unwrap();

    for body in &sim.bodies()[1..] {
        let r = body.position().coords.magnitude();
        assert!(r >= params.inner_radius * (1.0 - 1e-12));
        assert!(r <= params.outer_radius * (1.0 + 1e-12));
        assert!(body.mass() >= params.min_mass * (1.0 - 1e-12));
        assert!(body.mass() <= params.max_mass * (1.0 + 1e-12));
        assert_eq!(body.position().z, 0.0);

        let circular = circular_orbit_velocity(GRAVITATIONAL_CONSTANT, SUN_MASS, body.position());
        let ratio = body.velocity().magnitude() / circular.magnitude();
        assert!((ratio - 1.0).abs() <= params.velocity_jitter + 1e-12);
    }
}

#[test]
fn test_swarm_rejects_invalid_params() {
    let params = SwarmParams {
        min_mass: -1.0,
        ..SwarmParams::default()
    };
    let result = protoplanet_swarm(SimulationConfig::default(), &params, 0);
    assert!(matches!(result, Err(OrreryError::InvalidMass(_))));
}

#[test]
fn test_empty_swarm_is_just_the_star() {
    let params = SwarmParams {
        count: 0,
        ..SwarmParams::default()
    };
    let sim = protoplanet_swarm(SimulationConfig::default(), &params, 0).unwrap();
    assert_eq!(sim.body_count(), 1);
}

#[test]
fn test_sphere_radius() {
    // Earth-like: 5.972e24 kg at 5514 kg/m³ is about 6371 km
    let r = sphere_radius(5.972e24, 5_514.0);
    assert!((r - 6.371e6).abs() < 1.0e4);

    let volume = 4.0 / 3.0 * std::f64::consts::PI * r.powi(3);
    assert_relative_eq!(volume * 5_514.0, 5.972e24, max_relative = 1e-12);
}

//! Collision demo
//!
//! Scatters planetary embryos with inflated radii around a Sun-like star
//! and lets them merge. Reports every merger and checks that mass is
//! conserved.
//!
//! Run with: cargo run --package orrery --example collision_demo [seed]

use orrery::SimulationConfig;
use orrery::presets::{AU, SwarmParams, protoplanet_swarm};
use tracing_subscriber::EnvFilter;

const EARTH_MASS: f64 = 5.972e24;

fn main() -> orrery::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    println!("Orrery: Protoplanet Collisions\n");
    println!("{}", "=".repeat(60));

    // Inflated radii make encounters common within a few years
    let params = SwarmParams {
        count: 32,
        radius_inflation: 200.0,
        velocity_jitter: 0.05,
        ..SwarmParams::default()
    };
    let mut sim = protoplanet_swarm(SimulationConfig::default(), &params, seed)?;

    let initial_mass = sim.total_mass();
    let initial_embryos = sim.body_count() - 1;

    println!("\nSeed: {}", seed);
    println!("Initial embryos: {}", initial_embryos);
    println!(
        "Embryo mass: {:.3} M⊕",
        (initial_mass - sim.bodies()[0].mass()) / EARTH_MASS
    );

    let dt = 6.0 * 3600.0;
    let steps = 4 * 365 * 5;

    println!("\nIntegrating 5 years at dt = {} s...\n", dt);

    let mut merger_count = 0;
    for _ in 0..steps {
        let report = sim.update(dt);

        for merger in &report.mergers {
            merger_count += 1;
            println!(
                "  t = {:>6.1} d: body {} absorbed body {}, now {:.3} M⊕",
                sim.time() / 86_400.0,
                merger.survivor.0,
                merger.absorbed.0,
                merger.mass / EARTH_MASS
            );
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Mergers: {}", merger_count);
    println!("Final embryos: {}", sim.body_count() - 1);

    println!("\nSurvivors (heaviest first):");
    let star = sim.bodies()[0].position();
    for body in &sim.bodies()[1..] {
        println!(
            "  Body {:>2}: {:.3} M⊕ at {:.3} AU",
            body.id().0,
            body.mass() / EARTH_MASS,
            (body.position() - star).magnitude() / AU
        );
    }

    let mass_error = ((sim.total_mass() - initial_mass) / initial_mass).abs();
    if mass_error < 1e-12 {
        println!("\n✓ Mass conserved");
    } else {
        println!("\n✗ Mass error: {:.2e}", mass_error);
    }

    Ok(())
}

//! Solar system example
//!
//! Runs the Sun and nine planets for one year at one-hour steps, with the
//! Sun anchored, and reports how far each orbit drifts.
//!
//! Run with: cargo run --package orrery --example solar_system
//! Set RUST_LOG=orrery=debug to see distance clamps.

use orrery::SimulationConfig;
use orrery::presets::{AU, PLANETS, solar_system};
use tracing_subscriber::EnvFilter;

fn main() -> orrery::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("Orrery: Solar System\n");
    println!("{}", "=".repeat(60));

    let mut sim = solar_system(SimulationConfig::default())?;

    println!("\nInitial conditions:");
    for (planet, body) in PLANETS.iter().zip(&sim.bodies()[1..]) {
        println!(
            "  {:<8} r = {:>7.3} AU, v = {:>6.2} km/s",
            planet.name,
            planet.distance / AU,
            body.velocity().magnitude() / 1e3
        );
    }

    let initial_energy = sim.total_energy();
    println!("\nInitial energy: {:.6e} J", initial_energy);

    let dt = 3600.0;
    let hours_per_year = 24 * 365;

    println!("\nIntegrating one year at dt = {} s...", dt);

    let mut clamps = 0;
    for step in 1..=hours_per_year {
        let report = sim.update(dt);
        clamps += report.distance_clamps();

        if step % (24 * 73) == 0 {
            println!("  Day {:>3}: {} bodies", step / 24, sim.body_count());
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Final orbits:");

    let sun = sim.bodies()[0].position();
    for planet in PLANETS.iter() {
        let Some(body) = sim.bodies().iter().find(|b| b.mass() == planet.mass) else {
            println!("  {:<8} merged", planet.name);
            continue;
        };

        let r = (body.position() - sun).magnitude();
        let drift = ((r - planet.distance) / planet.distance).abs();
        println!(
            "  {:<8} r = {:>7.3} AU, Δr = {:.2e}, trail = {} points",
            planet.name,
            r / AU,
            drift,
            body.trajectory().len()
        );
    }

    let energy_error = ((sim.total_energy() - initial_energy) / initial_energy).abs();
    println!("\nEnergy error: {:.2e}", energy_error);
    println!("Distance clamps: {}", clamps);

    Ok(())
}

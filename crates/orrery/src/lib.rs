//! Gravitational N-body simulation with perfectly inelastic merging
//!
//! A [`Simulator`] owns a set of [`Body`] values and advances them with
//! direct pairwise Newtonian gravity. Bodies whose spheres overlap merge,
//! conserving mass, momentum and volume. The heaviest body can be held fixed
//! as an anchor, which suits a star with planets.
//!
//! Rendering is left to the caller: read [`Simulator::bodies`] between
//! calls to [`Simulator::update`].

pub mod body;
pub mod collisions;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod presets;
pub mod simulator;
pub mod trajectory;

#[cfg(test)]
mod presets_test;

pub use body::{Body, BodyId};
pub use config::SimulationConfig;
pub use error::{OrreryError, Result};
pub use simulator::{Simulator, TickReport};

//! Collision detection and resolution
//!
//! Detection reads a snapshot of positions and radii and returns events;
//! resolution applies them as momentum-conserving mergers.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod resolution_test;

pub use detection::{CollisionEvent, detect_overlaps};
pub use resolution::{Merger, merge_bodies, resolve_collisions};

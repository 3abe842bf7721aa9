//! Collision resolution through perfectly inelastic mergers
//!
//! When bodies collide, they merge into a single body that conserves:
//! - Total mass
//! - Total momentum
//! - Volume (assuming constant density)
//!
//! Kinetic energy is not conserved.

use nalgebra::Point3;
use tracing::info;

use crate::body::{Body, BodyId};
use crate::collisions::CollisionEvent;

/// Record of one merger applied during resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Merger {
    /// Body that was replaced in place by the merger product
    pub survivor: BodyId,
    /// Body that was removed
    pub absorbed: BodyId,
    /// Mass of the product (kg)
    pub mass: f64,
}

/// Merge two bodies, conserving mass and momentum
///
/// - Total mass: m = m_a + m_b
/// - Position: mass-weighted centroid
/// - Velocity: p / m with p = p_a + p_b
/// - Volume: r = (r_a³ + r_b³)^(1/3)
///
/// The product keeps `a`'s id and trail; `b`'s trail is dropped. Physical
/// state does not depend on argument order.
///
/// # Examples
///
/// ```
/// use orrery::body::Body;
/// use orrery::collisions::merge_bodies;
/// use nalgebra::{Point3, Vector3};
///
/// let a = Body::new(1.0, Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 5.0, 0.0), 0.01).unwrap();
/// let b = Body::new(1.0, Point3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 0.0), 0.01).unwrap();
///
/// let merged = merge_bodies(&a, &b);
///
/// // Mass is conserved
/// assert_eq!(merged.mass(), 2.0);
///
/// // Momentum is conserved
/// let p_initial = a.momentum() + b.momentum();
/// assert!((merged.momentum() - p_initial).magnitude() < 1e-12);
/// ```
pub fn merge_bodies(a: &Body, b: &Body) -> Body {
    let total_mass = a.mass() + b.mass();

    // Center of mass position
    let pos_coords =
        (a.position().coords * a.mass() + b.position().coords * b.mass()) / total_mass;

    // Momentum-conserving velocity
    let velocity = (a.momentum() + b.momentum()) / total_mass;

    // Volume-conserving radius for equal-density spheres
    let radius = (a.radius().powi(3) + b.radius().powi(3)).cbrt();

    a.with_state(total_mass, radius, Point3::from(pos_coords), velocity)
}

/// Apply every collision event to `bodies`, merging overlapping pairs
///
/// Events must come from [`crate::collisions::detect_overlaps`] on the same
/// slice. Merges are applied against slot indices, and removals happen once
/// at the end, so no slot shifts mid-pass. A body already absorbed this pass
/// is redirected to whatever absorbed it, which collapses chains like
/// A-B, B-C into a single body. The lower slot always survives.
///
/// Overlaps created by a merger itself are left for the next pass.
///
/// # Returns
///
/// The mergers applied, in order
///
/// # Examples
///
/// ```
/// use orrery::body::Body;
/// use orrery::collisions::{detect_overlaps, resolve_collisions};
/// use nalgebra::{Point3, Vector3};
///
/// let mut bodies = vec![
///     Body::new(1.0e24, Point3::origin(), Vector3::zeros(), 1.0e6).unwrap(),
///     Body::new(1.0e24, Point3::new(1.5e6, 0.0, 0.0), Vector3::zeros(), 1.0e6).unwrap(),
/// ];
///
/// let events = detect_overlaps(&bodies);
/// let mergers = resolve_collisions(&mut bodies, &events);
///
/// assert_eq!(mergers.len(), 1);
/// assert_eq!(bodies.len(), 1);
/// assert_eq!(bodies[0].mass(), 2.0e24);
/// ```
pub fn resolve_collisions(bodies: &mut Vec<Body>, events: &[CollisionEvent]) -> Vec<Merger> {
    let mut absorbed_into: Vec<Option<usize>> = vec![None; bodies.len()];
    let mut mergers = Vec::new();

    for event in events {
        let a = root(&absorbed_into, event.slot_a);
        let b = root(&absorbed_into, event.slot_b);
        if a == b {
            continue;
        }

        let (keep, gone) = if a < b { (a, b) } else { (b, a) };
        let merged = merge_bodies(&bodies[keep], &bodies[gone]);

        info!(
            survivor = bodies[keep].id().0,
            absorbed = bodies[gone].id().0,
            mass = merged.mass(),
            radius = merged.radius(),
            separation = event.separation,
            "bodies merged"
        );

        mergers.push(Merger {
            survivor: bodies[keep].id(),
            absorbed: bodies[gone].id(),
            mass: merged.mass(),
        });

        bodies[keep] = merged;
        absorbed_into[gone] = Some(keep);
    }

    if !mergers.is_empty() {
        let mut slot = 0;
        bodies.retain(|_| {
            let alive = absorbed_into[slot].is_none();
            slot += 1;
            alive
        });
    }

    mergers
}

/// Follow absorption links to the slot that currently holds the merged body
fn root(absorbed_into: &[Option<usize>], mut slot: usize) -> usize {
    while let Some(next) = absorbed_into[slot] {
        slot = next;
    }
    slot
}

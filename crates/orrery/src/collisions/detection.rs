//! Overlap detection between collision spheres

use crate::body::{Body, BodyId};

/// Two bodies whose spheres overlap
///
/// Slots are positions in the body slice at detection time. They stay valid
/// through resolution because removals are deferred to the end of the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// First body ID
    pub body_a: BodyId,
    /// Second body ID
    pub body_b: BodyId,
    /// Slot of the first body, always less than `slot_b`
    pub slot_a: usize,
    pub slot_b: usize,
    /// Center-to-center distance (m)
    pub separation: f64,
    /// Sum of radii that the separation fell under (m)
    pub collision_radius: f64,
}

/// Check if a pair of bodies overlaps
fn check_pair(slot_a: usize, a: &Body, slot_b: usize, b: &Body) -> Option<CollisionEvent> {
    let separation = a.distance_to(b);
    let collision_radius = a.radius() + b.radius();

    (separation < collision_radius).then(|| CollisionEvent {
        body_a: a.id(),
        body_b: b.id(),
        slot_a,
        slot_b,
        separation,
        collision_radius,
    })
}

/// Finds every overlapping pair, checking each unordered pair once
///
/// Events come back ordered by `(slot_a, slot_b)`. The slice is only read,
/// so all pairs see the same pre-merge geometry.
///
/// # Examples
///
/// ```
/// use orrery::body::Body;
/// use orrery::collisions::detect_overlaps;
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![
///     Body::new(1.0e24, Point3::origin(), Vector3::zeros(), 1.0e6).unwrap(),
///     Body::new(1.0e24, Point3::new(1.5e6, 0.0, 0.0), Vector3::zeros(), 1.0e6).unwrap(),
///     Body::new(1.0e24, Point3::new(1.0e9, 0.0, 0.0), Vector3::zeros(), 1.0e6).unwrap(),
/// ];
///
/// let events = detect_overlaps(&bodies);
/// assert_eq!(events.len(), 1);
/// assert_eq!((events[0].slot_a, events[0].slot_b), (0, 1));
/// ```
pub fn detect_overlaps(bodies: &[Body]) -> Vec<CollisionEvent> {
    let n = bodies.len();

    (0..n)
        .flat_map(|i| {
            ((i + 1)..n).filter_map(move |j| check_pair(i, &bodies[i], j, &bodies[j]))
        })
        .collect()
}

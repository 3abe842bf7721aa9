use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId};
use crate::collisions::detect_overlaps;
use crate::collisions::resolution::*;

fn make(id: u32, mass: f64, position: Point3<f64>, velocity: Vector3<f64>, radius: f64) -> Body {
    let mut body = Body::new(mass, position, velocity, radius).unwrap();
    body.set_id(BodyId(id));
    body
}

fn pair() -> (Body, Body) {
    let a = make(
        0,
        1.0e24,
        Point3::new(1.0e9, 2.0e9, -3.0e9),
        Vector3::new(10.0, -5.0, 0.0),
        4.0e6,
    );
    let b = make(
        1,
        3.0e24,
        Point3::new(1.1e9, 2.0e9, -2.5e9),
        Vector3::new(-2.0, 7.0, 1.0),
        6.0e6,
    );
    (a, b)
}

#[test]
fn test_merge_bodies_mass_conservation() {
    let (a, b) = pair();
    let merged = merge_bodies(&a, &b);

    assert_eq!(merged.mass(), 1.0e24 + 3.0e24);
}

#[test]
fn test_merge_bodies_momentum_conservation() {
    let (a, b) = pair();

    let p_initial = a.momentum() + b.momentum();
    let p_final = merge_bodies(&a, &b).momentum();

    for i in 0..3 {
        assert_relative_eq!(p_final[i], p_initial[i], epsilon = 1e-6 * p_initial.magnitude());
    }
}

#[test]
fn test_merge_bodies_center_of_mass() {
    let a = make(0, 1.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), 0.01);
    let b = make(1, 3.0, Point3::new(5.0, 4.0, 0.0), Vector3::zeros(), 0.01);

    let merged = merge_bodies(&a, &b);

    // (1 * 1 + 3 * 5) / 4 = 4, (3 * 4) / 4 = 3
    assert_relative_eq!(merged.position().x, 4.0);
    assert_relative_eq!(merged.position().y, 3.0);
    assert_eq!(merged.position().z, 0.0);
}

#[test]
fn test_merge_bodies_radius() {
    let (a, b) = pair();
    let merged = merge_bodies(&a, &b);

    // Volume conservation: r³ = r_a³ + r_b³
    let expected = (4.0e6_f64.powi(3) + 6.0e6_f64.powi(3)).cbrt();
    assert_relative_eq!(merged.radius(), expected, max_relative = 1e-12);
    assert_relative_eq!(merged.volume(), a.volume() + b.volume(), max_relative = 1e-12);
}

#[test]
fn test_merge_is_commutative() {
    let (a, b) = pair();

    let ab = merge_bodies(&a, &b);
    let ba = merge_bodies(&b, &a);

    assert_eq!(ab.mass(), ba.mass());
    assert_relative_eq!(ab.radius(), ba.radius());
    for i in 0..3 {
        assert_relative_eq!(ab.position()[i], ba.position()[i]);
        assert_relative_eq!(ab.velocity()[i], ba.velocity()[i]);
    }

    // Identity follows the first argument
    assert_eq!(ab.id(), BodyId(0));
    assert_eq!(ba.id(), BodyId(1));
}

#[test]
fn test_merge_keeps_first_trail() {
    let (mut a, mut b) = pair();
    a.add_to_trajectory(Point3::new(1.0, 1.0, 1.0));
    b.add_to_trajectory(Point3::new(2.0, 2.0, 2.0));
    b.add_to_trajectory(Point3::new(3.0, 3.0, 3.0));

    let merged = merge_bodies(&a, &b);

    assert_eq!(merged.trajectory().len(), 1);
    assert_eq!(merged.trajectory().latest(), Some(&Point3::new(1.0, 1.0, 1.0)));
    assert_eq!(merged.acceleration(), Vector3::zeros());
}

#[test]
fn test_head_on_scenario() {
    // Two 1e24 kg bodies 2e9 apart with radius sum just over 2e9, closing at 100 m/s
    let r = 1.0e9 + 1.0;
    let mut bodies = vec![
        make(0, 1.0e24, Point3::new(-1.0e9, 0.0, 0.0), Vector3::new(50.0, 0.0, 0.0), r),
        make(1, 1.0e24, Point3::new(1.0e9, 0.0, 0.0), Vector3::new(-50.0, 0.0, 0.0), r),
    ];

    let events = detect_overlaps(&bodies);
    let mergers = resolve_collisions(&mut bodies, &events);

    assert_eq!(mergers.len(), 1);
    assert_eq!(bodies.len(), 1);

    let merged = &bodies[0];
    assert_eq!(merged.mass(), 2.0e24);
    assert_relative_eq!(merged.radius(), (2.0 * r.powi(3)).cbrt(), max_relative = 1e-12);
    assert_eq!(merged.velocity(), Vector3::zeros());
    assert_eq!(merged.position(), Point3::origin());
}

#[test]
fn test_resolve_single_collision_keeps_first_slot() {
    let mut bodies = vec![
        make(4, 1.0e24, Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), 10.0),
        make(2, 1.0e24, Point3::new(1.0e12, 0.0, 0.0), Vector3::zeros(), 10.0),
        make(8, 1.0e24, Point3::new(5.0, 0.0, 0.0), Vector3::zeros(), 10.0),
    ];

    let events = detect_overlaps(&bodies);
    let mergers = resolve_collisions(&mut bodies, &events);

    assert_eq!(
        mergers,
        vec![Merger {
            survivor: BodyId(4),
            absorbed: BodyId(8),
            mass: 2.0e24,
        }]
    );

    let ids: Vec<BodyId> = bodies.iter().map(|b| b.id()).collect();
    assert_eq!(ids, vec![BodyId(4), BodyId(2)]);
}

#[test]
fn test_resolve_chain_collapses_to_one_body() {
    // A overlaps B, B overlaps C, A does not overlap C
    let mut bodies = vec![
        make(0, 1.0e24, Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), 6.0),
        make(1, 2.0e24, Point3::new(10.0, 0.0, 0.0), Vector3::zeros(), 6.0),
        make(2, 1.0e24, Point3::new(20.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0), 6.0),
    ];

    let events = detect_overlaps(&bodies);
    assert_eq!(events.len(), 2);

    let p_initial: Vector3<f64> = bodies.iter().map(|b| b.momentum()).sum();
    let mergers = resolve_collisions(&mut bodies, &events);

    assert_eq!(mergers.len(), 2);
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].id(), BodyId(0));
    assert_eq!(bodies[0].mass(), 4.0e24);
    assert_relative_eq!(bodies[0].position().x, 10.0);
    assert_relative_eq!(bodies[0].radius(), (3.0 * 216.0_f64).cbrt(), max_relative = 1e-12);

    let p_final = bodies[0].momentum();
    assert!((p_final - p_initial).magnitude() < 1e-6 * 1.0e24);
}

#[test]
fn test_resolve_triangle_counts_each_merger_once() {
    // All three overlap each other
    let mut bodies = vec![
        make(0, 1.0e24, Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), 10.0),
        make(1, 1.0e24, Point3::new(5.0, 0.0, 0.0), Vector3::zeros(), 10.0),
        make(2, 1.0e24, Point3::new(2.5, 4.0, 0.0), Vector3::zeros(), 10.0),
    ];

    let events = detect_overlaps(&bodies);
    assert_eq!(events.len(), 3);

    let mergers = resolve_collisions(&mut bodies, &events);

    // The third event links two slots that are already one body
    assert_eq!(mergers.len(), 2);
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].mass(), 3.0e24);
}

#[test]
fn test_resolve_disjoint_pairs() {
    let mut bodies = vec![
        make(0, 1.0e24, Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), 1.0),
        make(1, 1.0e24, Point3::new(1.0e12, 0.0, 0.0), Vector3::zeros(), 1.0),
        make(2, 1.0e24, Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), 1.0),
        make(3, 1.0e24, Point3::new(1.0e12 + 1.0, 0.0, 0.0), Vector3::zeros(), 1.0),
    ];

    let events = detect_overlaps(&bodies);
    let mergers = resolve_collisions(&mut bodies, &events);

    assert_eq!(mergers.len(), 2);
    let ids: Vec<BodyId> = bodies.iter().map(|b| b.id()).collect();
    assert_eq!(ids, vec![BodyId(0), BodyId(1)]);
}

#[test]
fn test_resolve_no_events_is_noop() {
    let (a, b) = pair();
    let mut bodies = vec![a, b];

    let mergers = resolve_collisions(&mut bodies, &[]);

    assert!(mergers.is_empty());
    assert_eq!(bodies.len(), 2);
}

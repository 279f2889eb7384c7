//! Scenario tests of whole ticks and properties that hold across every resolver path.

use euclid::{point3, vec3};
use pretty_assertions::assert_eq;
use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use crate::math::{FreeCoordinate, FreePoint, Sphere, find_time_of_collision};
use crate::physics::{
    ActorShape, Candidate, CellId, CollisionInfo, LandblockGrid, LocalSphere, ObjectInfo,
    ObjectInfoState, Position, ResolveOutcome, SpherePath, Transition, TransitionState,
    intersects_sphere,
};

const WEST: CellId = CellId(0xA9B4_0001);
const EAST: CellId = CellId(0xAAB4_0001);

fn unit_actor() -> ActorShape {
    ActorShape::new([LocalSphere::new([0., 0., 0.], 1.0)], 0.5, 0.5).unwrap()
}

fn tall_actor() -> ActorShape {
    ActorShape::new(
        [
            LocalSphere::new([0., 0., 0.5], 0.5),
            LocalSphere::new([0., 0., 1.3], 0.5),
        ],
        0.6,
        0.6,
    )
    .unwrap()
}

fn new_transition(
    shape: &ActorShape,
    state: ObjectInfoState,
    cur: [FreeCoordinate; 3],
    check: [FreeCoordinate; 3],
) -> Transition {
    Transition::new(
        shape,
        state,
        Position::new(WEST, cur),
        Position::new(WEST, check),
        &LandblockGrid,
    )
    .unwrap()
}

fn random_point(rng: &mut Xoshiro256Plus) -> [FreeCoordinate; 3] {
    [
        rng.random_range(-3.0..3.0),
        rng.random_range(-3.0..3.0),
        rng.random_range(-3.0..3.0),
    ]
}

fn assert_near(actual: FreePoint, expected: FreePoint, tolerance: FreeCoordinate) {
    assert!(
        (actual - expected).length() < tolerance,
        "{actual:?} is not within {tolerance} of {expected:?}"
    );
}

#[test]
fn falling_actor_settles_on_sphere() {
    let mut t = new_transition(
        &unit_actor(),
        ObjectInfoState::IS_PLAYER,
        [0., 0., 5.],
        [0., 0., 5.],
    );
    t.path.step_down_amt = 10.0;

    let target = Sphere::new([0., 0., 0.], 1.0);
    assert_eq!(intersects_sphere(&target, &mut t), TransitionState::Adjusted);
    assert_near(t.path.global_sphere(0).center, point3(0., 0., 2.), 1e-3);
    assert!((t.path.walk_interp() - 0.3).abs() < 1e-3, "{}", t.path.walk_interp());
}

#[test]
fn settling_by_a_small_drop_rests_outside_the_obstacle() {
    let mut t = new_transition(
        &unit_actor(),
        ObjectInfoState::IS_PLAYER,
        [1.1494, -0.2773, 2.5608],
        [1.1494, -0.2773, 2.5608],
    );
    t.path.step_down_amt = 10.0;
    let target = Sphere::new([0., 0., 0.], 1.8139);

    assert_eq!(intersects_sphere(&target, &mut t), TransitionState::Adjusted);
    let distance = (t.path.global_sphere(0).center - target.center).length();
    assert!((distance - 2.8139).abs() < 1e-9, "{distance}");
    assert_ne!(intersects_sphere(&target, &mut t), TransitionState::Collided);
}

/// Settling onto ground and then testing the same ground again never collides.
#[test]
fn random_settle_then_retest() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0x5e771e);
    let mut adjusted = 0;
    for case in 0..5000 {
        let radius: f64 = rng.random_range(0.2..2.0);
        let radsum = 1.0 + radius;
        let (x, y) = (
            rng.random_range(-0.65..0.65) * radsum,
            rng.random_range(-0.65..0.65) * radsum,
        );
        let contact_height = (radsum * radsum - x * x - y * y).sqrt();
        let start = [x, y, contact_height + rng.random_range(0.01..3.0)];
        let mut t = new_transition(&unit_actor(), ObjectInfoState::IS_PLAYER, start, start);
        t.path.step_down_amt = 10.0;
        let target = Sphere::new([0., 0., 0.], radius);

        let first = intersects_sphere(&target, &mut t);
        assert_ne!(first, TransitionState::Collided, "case {case}: {start:?}");
        if first == TransitionState::Adjusted {
            adjusted += 1;
            assert_ne!(
                intersects_sphere(&target, &mut t),
                TransitionState::Collided,
                "case {case}: {start:?} r {radius}"
            );
        }
    }
    assert!(adjusted > 1000, "{adjusted}");
}

#[test]
fn new_transition_looks_for_ground_within_step_down_height() {
    // 0.3 above resting on the target, and the shape may step down 0.5.
    let mut t = new_transition(
        &unit_actor(),
        ObjectInfoState::IS_PLAYER,
        [0., 0., 2.3],
        [0., 0., 2.3],
    );
    assert_eq!(t.path.step_down_amt, 0.5);
    let target = Sphere::new([0., 0., 0.], 1.0);
    assert_eq!(intersects_sphere(&target, &mut t), TransitionState::Adjusted);
    assert_near(t.path.global_sphere(0).center, point3(0., 0., 2.), 1e-9);
    assert!((t.path.walk_interp() - 0.6).abs() < 1e-9);

    // Out of reach of the step-down height.
    let mut t = new_transition(
        &unit_actor(),
        ObjectInfoState::IS_PLAYER,
        [0., 0., 2.6],
        [0., 0., 2.6],
    );
    assert_eq!(intersects_sphere(&target, &mut t), TransitionState::Ok);
}

#[test]
fn ethereal_overlap_without_movement_collides() {
    let mut t = new_transition(
        &unit_actor(),
        ObjectInfoState::ETHEREAL,
        [0., 0., 1.],
        [0., 0., 1.],
    );
    let target = Sphere::new([0., 0., 0.], 1.0);
    assert_eq!(intersects_sphere(&target, &mut t), TransitionState::Collided);
}

#[test]
fn ethereal_branch_is_idempotent() {
    let mut t = new_transition(
        &tall_actor(),
        ObjectInfoState::ETHEREAL | ObjectInfoState::CONTACT,
        [0., 0., 0.],
        [3., 0., 0.],
    );
    t.path.step_up = true;
    let collisions_before = t.collisions;
    let target = Sphere::new([6., 0., 0.], 1.0);

    let first = intersects_sphere(&target, &mut t);
    let second = intersects_sphere(&target, &mut t);
    assert_eq!(first, TransitionState::Ok);
    assert_eq!(first, second);
    assert_eq!(t.collisions, collisions_before);
}

#[test]
fn adjusted_position_is_stable() {
    // Each of these adjusts the move; testing the same obstacle again from the adjusted
    // position must not turn it into a collision.
    let target = Sphere::new([0., 0., 0.], 1.0);
    let cases: [(ObjectInfoState, [FreeCoordinate; 3], [FreeCoordinate; 3], FreeCoordinate); 3] = [
        (ObjectInfoState::IS_PLAYER, [0., 0., 3.], [0., 0., 1.], 0.0),
        (ObjectInfoState::IS_PLAYER, [0.5, 0., 5.], [0.5, 0., 5.], 10.0),
        (ObjectInfoState::IS_PLAYER, [0.2, 0.1, 4.], [0.3, 0.1, 1.5], 0.0),
    ];
    for (state, cur, check, step_down_amt) in cases {
        let mut t = new_transition(&unit_actor(), state, cur, check);
        t.path.step_down_amt = step_down_amt;
        assert_eq!(
            intersects_sphere(&target, &mut t),
            TransitionState::Adjusted,
            "{cur:?} -> {check:?}"
        );
        let again = intersects_sphere(&target, &mut t);
        assert_ne!(again, TransitionState::Collided, "{cur:?} -> {check:?}");
    }
}

#[test]
fn candidate_in_neighboring_landblock() {
    // The actor stands near the east edge of its landblock, above a sphere that belongs to
    // the next landblock east.
    let mut t = Transition::new(
        &unit_actor(),
        ObjectInfoState::IS_PLAYER,
        Position::new(WEST, [191.5, 50., 3.]),
        Position::new(WEST, [191.5, 50., 3.]),
        &LandblockGrid,
    )
    .unwrap();
    t.path.step_down_amt = 5.0;

    let outcome = t.resolve_candidates(
        [Candidate {
            sphere: Sphere::new([-0.5, 50., 0.], 1.0),
            cell: EAST,
        }],
        &LandblockGrid,
    );
    assert_eq!(
        outcome,
        ResolveOutcome {
            state: TransitionState::Adjusted,
            candidates_tested: 1
        }
    );
    let (position, collisions) = t.finish(&outcome);
    assert_eq!(position.cell, WEST);
    assert_near(position.frame.origin, point3(191.5, 50., 2.), 1e-3);
    let (plane, cell) = collisions.contact_plane().unwrap();
    assert_eq!(cell, WEST);
    assert_near(point3(0., 0., 0.) + plane.normal, point3(0., 0., 1.), 1e-9);
}

#[test]
fn collision_stops_the_tick() {
    let mut t = new_transition(
        &unit_actor(),
        ObjectInfoState::IS_PLAYER,
        [0., 0., 0.2],
        [0., 0., 0.3],
    );
    let outcome = t.resolve_candidates(
        [
            Candidate {
                sphere: Sphere::new([10., 0., 0.], 1.0),
                cell: WEST,
            },
            Candidate {
                sphere: Sphere::new([0., 0., 0.], 1.0),
                cell: WEST,
            },
            Candidate {
                sphere: Sphere::new([-10., 0., 0.], 1.0),
                cell: WEST,
            },
        ],
        &LandblockGrid,
    );
    assert_eq!(
        outcome,
        ResolveOutcome {
            state: TransitionState::Collided,
            candidates_tested: 2
        }
    );
    let (position, _) = t.finish(&outcome);
    assert_eq!(position.frame.origin, point3(0., 0., 0.2));
}

#[test]
fn tall_actor_walks_onto_sphere_with_later_candidates_seeing_adjustment() {
    let mut t = new_transition(
        &tall_actor(),
        ObjectInfoState::IS_PLAYER,
        [0., 0., 2.],
        [0., 0., 0.],
    );
    let target = Sphere::new([0., 0., -0.5], 1.0);
    let outcome = t.resolve_candidates(
        [
            Candidate {
                sphere: target,
                cell: WEST,
            },
            Candidate {
                sphere: target,
                cell: WEST,
            },
        ],
        &LandblockGrid,
    );
    assert_eq!(outcome.state, TransitionState::Adjusted);
    assert_eq!(outcome.candidates_tested, 2);

    // Primary sphere (radius 0.5) resting on top of the target (radius 1).
    let (position, _) = t.finish(&outcome);
    assert_near(position.frame.origin, point3(0., 0., 0.5), 1e-9);
}

#[test]
fn next_tick_keeps_last_known_contact_plane() {
    let mut t = new_transition(
        &unit_actor(),
        ObjectInfoState::IS_PLAYER,
        [0., 0., 3.],
        [0., 0., 5.],
    );
    t.path.step_down_amt = 4.0;
    let outcome = t.resolve_candidates(
        [Candidate {
            sphere: Sphere::new([0., 0., 0.], 1.0),
            cell: WEST,
        }],
        &LandblockGrid,
    );
    assert_eq!(outcome.state, TransitionState::Adjusted);
    let (position, collisions) = t.finish(&outcome);
    let plane = collisions.contact_plane();
    assert!(plane.is_some());

    let shape = unit_actor();
    let next = Transition::with_parts(
        ObjectInfo::new(ObjectInfoState::IS_PLAYER, shape.step_up_height()),
        SpherePath::new(&shape, position, position, &LandblockGrid).unwrap(),
        collisions,
    );
    assert_eq!(next.collisions.contact_plane(), None);
    assert_eq!(next.collisions.last_known_contact_plane(), plane);
    assert_eq!(
        next.collisions.effective_contact_plane(),
        plane.unwrap().0
    );
}

#[test]
fn fresh_transition_has_no_contact() {
    let t = new_transition(
        &unit_actor(),
        ObjectInfoState::empty(),
        [0., 0., 0.],
        [0., 0., 0.],
    );
    assert_eq!(t.collisions, CollisionInfo::new());
}

#[test]
fn find_time_of_collision_agrees_with_fine_resolution() {
    // Clipping an actor to its time of impact and moving it there leaves the spheres
    // exactly in contact.
    let movement = vec3(3., 1., -2.);
    let start = point3(-4., -1., 2.);
    let target = Sphere::new([0., 0., 0.], 1.0);
    let t = find_time_of_collision(movement, start - target.center, 2.0);
    assert!((0.0..=1.0).contains(&t), "{t}");
    let rest = start + movement * t;
    assert!(((rest - target.center).length() - 2.0).abs() < 1e-9);
}

/// Properties which must hold after any test, whatever the state of the actor.
#[test]
fn random_resolution_invariants() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0x5eed);
    let flags = [
        ObjectInfoState::CONTACT,
        ObjectInfoState::ON_WALKABLE,
        ObjectInfoState::PATH_CLIPPED,
        ObjectInfoState::PERFECT_CLIP,
        ObjectInfoState::IS_PLAYER,
        ObjectInfoState::IS_CREATURE,
    ];

    for case in 0..2000 {
        let mut state = ObjectInfoState::empty();
        for &flag in &flags {
            if rng.random_bool(0.4) {
                state |= flag;
            }
        }
        let shape = if rng.random_bool(0.5) {
            unit_actor()
        } else {
            tall_actor()
        };
        let cur = random_point(&mut rng);
        let check = random_point(&mut rng);
        let mut t = new_transition(&shape, state, cur, check);
        t.path.step_up = rng.random_bool(0.3);
        t.path.step_down_amt = rng.random_range(0.0..4.0);
        t.object.step_up_height = rng.random_range(0.0..2.0);

        for _ in 0..4 {
            let target = Sphere::new(random_point(&mut rng), rng.random_range(0.1..2.0));
            let walk_interp_before = t.path.walk_interp();
            let _ = intersects_sphere(&target, &mut t);

            assert!(
                t.path.walk_interp() <= walk_interp_before,
                "case {case}: walk_interp increased"
            );
            let normal_length = t.collisions.collision_normal().length();
            assert!(
                normal_length == 0.0 || (normal_length - 1.0).abs() < 1e-9,
                "case {case}: collision normal length {normal_length}"
            );
            let center = t.path.global_sphere(0).center;
            assert!(
                center.x.is_finite() && center.y.is_finite() && center.z.is_finite(),
                "case {case}: {center:?}"
            );
        }
    }
}

/// Overlap tests are symmetric, regardless of which sphere is the actor.
#[test]
fn ethereal_overlap_symmetric() {
    let mut rng = Xoshiro256Plus::seed_from_u64(7);
    for _ in 0..500 {
        let a = Sphere::new(random_point(&mut rng), 1.0);
        let b = Sphere::new(random_point(&mut rng), 1.0);
        let mut from_a = new_transition(
            &unit_actor(),
            ObjectInfoState::ETHEREAL,
            a.center.to_array(),
            a.center.to_array(),
        );
        let mut from_b = new_transition(
            &unit_actor(),
            ObjectInfoState::ETHEREAL,
            b.center.to_array(),
            b.center.to_array(),
        );
        assert_eq!(
            intersects_sphere(&b, &mut from_a),
            intersects_sphere(&a, &mut from_b)
        );
    }
}

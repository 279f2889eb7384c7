#![no_main]
extern crate cellphys;

use cellphys::math::Sphere;
use cellphys::physics::{
    ActorShape, Candidate, CellId, LandblockGrid, LocalSphere, ObjectInfoState, Position,
    Transition, TransitionState,
};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (
    u32,
    [i16; 3],
    [i16; 3],
    u8,
    bool,
    Vec<(Sphere, CellId)>
)| {
    let (state_bits, cur, check, step_down, step_up, obstacles) = input;

    // Keep the actor within a few landblocks so offsets stay small.
    let to_point = |p: [i16; 3]| p.map(|c| f64::from(c) / 64.);
    let cell = CellId(0xA9B4_0001);
    let shape = ActorShape::new(
        [
            LocalSphere::new([0., 0., 0.5], 0.5),
            LocalSphere::new([0., 0., 1.3], 0.5),
        ],
        0.6,
        0.6,
    )
    .unwrap();
    let mut t = Transition::new(
        &shape,
        ObjectInfoState::from_bits_truncate(state_bits),
        Position::new(cell, to_point(cur)),
        Position::new(cell, to_point(check)),
        &LandblockGrid,
    )
    .unwrap();
    t.path.step_down_amt = f64::from(step_down) / 64.;
    t.path.step_up = step_up;

    let candidates = obstacles.iter().map(|&(sphere, obstacle_cell)| Candidate {
        sphere,
        // Only neighboring landblocks are ever offered.
        cell: CellId(((cell.0 & 0xFFFF_0000) ^ (obstacle_cell.0 & 0x0101_0000)) | 0x0001),
    });
    let walk_interp_before = t.path.walk_interp();
    let outcome = t.resolve_candidates(candidates, &LandblockGrid);

    assert!(outcome.candidates_tested <= obstacles.len());
    assert!(t.path.walk_interp() <= walk_interp_before);
    let normal_length = t.collisions.collision_normal().length();
    assert!(normal_length == 0.0 || (normal_length - 1.0).abs() < 1e-9);

    let (position, _collisions) = t.finish(&outcome);
    if outcome.state != TransitionState::Collided {
        let origin = position.frame.origin;
        assert!(origin.x.is_finite() && origin.y.is_finite() && origin.z.is_finite());
    }
});

//! The collision decision tree: how a moving actor responds to one obstacle sphere.
//!
//! All positions here are in the frame of the check cell. Every routine either leaves the
//! check position alone and reports [`TransitionState::Ok`] or [`TransitionState::Collided`],
//! or refines it and reports [`TransitionState::Adjusted`] or [`TransitionState::Slid`].

use manyfmt::Refmt as _;

/// Acts as polyfill for float methods
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{
    EPSILON, FreeCoordinate, FreePoint, FreeVector, Plane, Sphere, find_time_of_collision,
    normalize_check_small,
};
use crate::physics::{
    ContactClass, LANDING_Z, ObjectInfoState, Transition, TransitionState, WALK_INTERP_TOLERANCE,
};
use crate::util::ConciseDebug;

/// Tests the moving actor described by `transition` against the obstacle `target`, which must
/// be expressed in the frame of the transition's check cell, and adjusts the check position
/// if the contact can be resolved.
///
/// In order of priority:
///
/// 1. Ethereal actors, and actors outside the world, only report overlap as
///    [`TransitionState::Collided`].
/// 2. If a backup check position is being re-validated, the position is acceptable only if
///    the actor's spheres overlap the obstacle.
/// 3. While stepping up, an overlapping obstacle is stepped onto, slid along, clipped against,
///    or landed on, depending on the actor's [`ContactClass`].
/// 4. Creatures that are not players accept the move.
/// 5. An overlapping obstacle is resolved by finding when the actor first touched it, and
///    standing the actor on it there if the surface is walkable.
/// 6. Otherwise, the actor looks for the obstacle as ground below it.
pub fn intersects_sphere(target: &Sphere, transition: &mut Transition) -> TransitionState {
    let state = dispatch(target, transition);
    log::trace!(
        "{:?} -> {state:?}; check {:?}",
        target.refmt(&ConciseDebug),
        transition.path.global_sphere(0).refmt(&ConciseDebug),
    );
    state
}

fn dispatch(target: &Sphere, transition: &mut Transition) -> TransitionState {
    let path = &transition.path;
    let has_secondary = path.num_sphere() > 1;

    if transition.object.is_ethereal() || path.check_cell().is_outside() {
        let overlapping = path.global_sphere(0).intersects(target)
            || (has_secondary && path.global_sphere(1).intersects(target));
        return if overlapping {
            TransitionState::Collided
        } else {
            TransitionState::Ok
        };
    }

    let primary_overlaps = overlaps(transition, 0, target);
    let secondary_overlaps = has_secondary && overlaps(transition, 1, target);

    if transition.path.backup_check_pos.is_some() {
        return if !primary_overlaps || (has_secondary && !secondary_overlaps) {
            TransitionState::Collided
        } else {
            TransitionState::Ok
        };
    }

    if transition.path.step_up {
        return match transition.object.contact_class() {
            ContactClass::InContact | ContactClass::OnWalkable => {
                if primary_overlaps {
                    step_sphere_up(transition, target)
                } else if secondary_overlaps {
                    slide_sphere(transition, target, 1)
                } else {
                    TransitionState::Ok
                }
            }
            ContactClass::PathClipped => {
                if primary_overlaps {
                    collide_with_point(transition, target, 0)
                } else {
                    TransitionState::Ok
                }
            }
            ContactClass::Airborne => {
                if primary_overlaps {
                    land_on_sphere(transition, target)
                } else if secondary_overlaps {
                    collide_with_point(transition, target, 1)
                } else {
                    TransitionState::Ok
                }
            }
        };
    }

    if transition.object.is_non_player_creature() {
        return TransitionState::Ok;
    }

    if primary_overlaps {
        resolve_overlap(transition, target, 0)
    } else if secondary_overlaps {
        resolve_overlap(transition, target, 1)
    } else {
        step_sphere_down(transition, target)
    }
}

/// Sum of the radii of check sphere `index` and `target`, less [`EPSILON`] so that spheres
/// resting exactly in contact do not count as overlapping.
fn radius_sum(transition: &Transition, index: usize, target: &Sphere) -> FreeCoordinate {
    transition.path.global_sphere(index).radius() + target.radius() - EPSILON
}

fn overlaps(transition: &Transition, index: usize, target: &Sphere) -> bool {
    let radsum = radius_sum(transition, index, target);
    (transition.path.global_sphere(index).center - target.center).square_length() < radsum * radsum
}

/// Moves check sphere `index` (and the rest of the actor with it) so that its center is at
/// `destination`.
fn move_check_sphere_to(transition: &mut Transition, index: usize, destination: FreePoint) {
    let offset = destination - transition.path.global_sphere(index).center;
    transition.path.add_offset_to_check_pos(offset);
}

/// Step 5 of [`intersects_sphere()`]: sphere `index` overlaps `target` at the check position.
/// Find where along its movement it first touched, and stand the actor there if the point of
/// contact is walkable.
fn resolve_overlap(transition: &mut Transition, target: &Sphere, index: usize) -> TransitionState {
    let path = &transition.path;
    let r = radius_sum(transition, index, target) + EPSILON;
    let start = path.curr_center_in_check_frame(index);
    let movement = path.global_sphere(index).center - start;
    let p = start - target.center;

    // Solve |p + t·movement|² = r² for the entering root.
    let a = movement.square_length();
    if a < EPSILON {
        return TransitionState::Collided;
    }
    let b = p.dot(movement);
    let discriminant = b * b - a * (p.square_length() - r * r);
    if discriminant < 0.0 {
        return TransitionState::Collided;
    }
    let t = (-b - discriminant.sqrt()) / a;

    let walk_interp = path.walk_interp();
    let timecheck = t * walk_interp;
    if !(-WALK_INTERP_TOLERANCE..walk_interp).contains(&timecheck) {
        return TransitionState::Collided;
    }

    let normal = (p + movement * t) / r;
    if !path.is_walkable_allowable(normal.z) {
        // Too steep to stand on, but not yet blocking.
        return TransitionState::Ok;
    }

    let contact_point = target.center + normal * target.radius();
    let cell = path.check_cell();
    transition
        .collisions
        .set_contact_plane(Plane::from_point_normal(contact_point, normal), cell);
    transition.path.tighten_walk_interp(timecheck);
    move_check_sphere_to(transition, index, start + movement * t);
    TransitionState::Adjusted
}

/// Sphere `index` has hit `target` while the actor's path is clipped to its first contact.
///
/// With [`ObjectInfoState::PERFECT_CLIP`], the actor is moved back to the exact moment of
/// impact; otherwise the move is rejected.
pub(crate) fn collide_with_point(
    transition: &mut Transition,
    target: &Sphere,
    index: usize,
) -> TransitionState {
    let path = &transition.path;
    let start = path.curr_center_in_check_frame(index);
    let offset = start - target.center;

    if !transition.object.state.contains(ObjectInfoState::PERFECT_CLIP) {
        transition.collisions.set_collision_normal(offset);
        return TransitionState::Collided;
    }

    let r = radius_sum(transition, index, target) + EPSILON;
    let movement = path.global_sphere(index).center - start;
    let t = find_time_of_collision(movement, offset, r);
    if !(-EPSILON..=1.0).contains(&t) {
        return TransitionState::Collided;
    }

    let rest = start + movement * t;
    transition
        .collisions
        .set_collision_normal((rest - target.center) / r);
    move_check_sphere_to(transition, index, rest);
    TransitionState::Adjusted
}

/// The falling actor's primary sphere has come down on `target`. Records the landing so the
/// caller can redo the move as a walk.
pub(crate) fn land_on_sphere(transition: &mut Transition, target: &Sphere) -> TransitionState {
    let Some(normal) =
        normalize_check_small(transition.path.curr_center_in_check_frame(0) - target.center)
    else {
        return TransitionState::Collided;
    };
    transition.path.set_collide(normal);
    transition.path.walkable_allowance = LANDING_Z;
    TransitionState::Adjusted
}

/// Slides sphere `index` along the surface of `target`.
pub(crate) fn slide_sphere(
    transition: &mut Transition,
    target: &Sphere,
    index: usize,
) -> TransitionState {
    let curr = transition.path.curr_center_in_check_frame(index);
    match normalize_check_small(curr - target.center) {
        Some(normal) => slide_sphere_with_normal(transition, index, normal, curr),
        None => TransitionState::Collided,
    }
}

/// Redirects the movement of sphere `index`, which started at `curr`, so that it does not
/// move into a surface with normal `collision_normal`.
///
/// If the actor also has a contact plane, the movement is confined to the line along which
/// the two surfaces meet.
pub(crate) fn slide_sphere_with_normal(
    transition: &mut Transition,
    index: usize,
    collision_normal: FreeVector,
    curr: FreePoint,
) -> TransitionState {
    let plane = transition.collisions.effective_contact_plane();
    let check = transition.path.global_sphere(index).center;

    if collision_normal == FreeVector::zero() && plane.is_degenerate() {
        // Nothing to slide along. Back off halfway so the actor cannot stay wedged.
        log::warn!(
            "sliding with no surface; moving {:?} halfway back toward {:?}",
            check.refmt(&ConciseDebug),
            curr.refmt(&ConciseDebug),
        );
        transition.path.add_offset_to_check_pos((curr - check) * 0.5);
        return TransitionState::Adjusted;
    }

    transition.collisions.set_collision_normal(collision_normal);
    let displacement = check - curr;
    let direction = plane.normal.cross(collision_normal);
    let direction_square_length = direction.square_length();

    if direction_square_length >= EPSILON {
        // Corner: move only along the crease between the contact plane and the obstacle.
        let projection = direction * (displacement.dot(direction) / direction_square_length);
        if projection.square_length() < EPSILON {
            return TransitionState::Collided;
        }
        transition
            .path
            .add_offset_to_check_pos(projection - displacement);
        TransitionState::Slid
    } else if displacement.dot(collision_normal) < 0.0 {
        // Flat surface being approached: remove the component of the movement into it.
        transition
            .path
            .add_offset_to_check_pos(-collision_normal * collision_normal.dot(displacement));
        TransitionState::Slid
    } else {
        transition.collisions.set_collision_normal(-collision_normal);
        TransitionState::Collided
    }
}

/// The walking actor's primary sphere has run into `target`. Step up onto it if it is low
/// enough, else slide along it.
pub(crate) fn step_sphere_up(transition: &mut Transition, target: &Sphere) -> TransitionState {
    let r = radius_sum(transition, 0, target) + EPSILON;
    let disp = transition.path.global_sphere(0).center - target.center;
    let lift = r - disp.z;

    if transition.object.step_up_height < lift {
        return slide_sphere(transition, target, 0);
    }

    let normal = transition.path.curr_center_in_check_frame(0) - target.center;
    if transition.step_up(target, normal, lift) {
        TransitionState::Ok
    } else {
        transition.step_up_slide()
    }
}

/// Looks for `target` as ground below the actor, within this tick's step-down budget.
/// Neither of the actor's spheres overlaps `target` at the check position.
pub(crate) fn step_sphere_down(transition: &mut Transition, target: &Sphere) -> TransitionState {
    let path = &transition.path;
    let radsum = radius_sum(transition, 0, target);
    let disp = path.global_sphere(0).center - target.center;
    let step_down = path.step_down_amt * path.walk_interp();
    let lateral_square = disp.x * disp.x + disp.y * disp.y;

    // Closest approach of the primary sphere while it is swept down by `step_down`.
    let lowest = disp.z - step_down;
    let (low, high) = if lowest < disp.z {
        (lowest, disp.z)
    } else {
        (disp.z, lowest)
    };
    let closest_z = if low > 0.0 {
        low
    } else if high < 0.0 {
        high
    } else {
        0.0
    };
    if lateral_square + closest_z * closest_z >= radsum * radsum {
        return TransitionState::Ok;
    }

    if step_down.abs() < EPSILON {
        return TransitionState::Collided;
    }
    if lateral_square >= radsum * radsum {
        return TransitionState::Collided;
    }

    // Rest at the true contact distance, outside the overlap test's tolerance.
    let r = radsum + EPSILON;
    let contact_height = (r * r - lateral_square).sqrt();
    let drop = disp.z - contact_height;
    let walk_interp = path.walk_interp();
    let timecheck = drop / step_down * walk_interp;
    if !(-WALK_INTERP_TOLERANCE..walk_interp).contains(&timecheck) {
        return TransitionState::Collided;
    }

    let normal = FreeVector::new(disp.x, disp.y, contact_height) / r;
    if !path.is_walkable_allowable(normal.z) {
        return TransitionState::Ok;
    }

    let contact_point = target.center + normal * target.radius();
    let cell = path.check_cell();
    transition
        .collisions
        .set_contact_plane(Plane::from_point_normal(contact_point, normal), cell);
    transition.path.tighten_walk_interp(timecheck);
    transition
        .path
        .add_offset_to_check_pos(FreeVector::new(0.0, 0.0, -drop));
    TransitionState::Adjusted
}

impl Transition {
    /// Raises the check position by `lift` to stand on top of `target`, which the actor
    /// meets from the direction `normal` (pointing from `target` toward the actor).
    ///
    /// Fails, and changes nothing but [`SpherePath::step_up_normal`], if `normal` is too short
    /// to have a direction or points downward.
    ///
    /// [`SpherePath::step_up_normal`]: crate::physics::SpherePath::step_up_normal
    pub fn step_up(&mut self, target: &Sphere, normal: FreeVector, lift: FreeCoordinate) -> bool {
        let Some(normal) = normalize_check_small(normal) else {
            self.path.step_up_normal = FreeVector::zero();
            return false;
        };
        self.path.step_up_normal = normal;
        if normal.z < 0.0 {
            return false;
        }

        self.path
            .add_offset_to_check_pos(FreeVector::new(0.0, 0.0, lift));
        let top = target.center + FreeVector::new(0.0, 0.0, target.radius());
        let cell = self.path.check_cell();
        self.collisions
            .set_contact_plane(Plane::from_point_normal(top, FreeVector::new(0.0, 0.0, 1.0)), cell);
        true
    }

    /// Gives up on stepping up and slides the primary sphere along the surface found by the
    /// step-up attempt instead.
    pub fn step_up_slide(&mut self) -> TransitionState {
        self.collisions.invalidate_contact_plane();
        self.path.step_up = false;
        let curr = self.path.curr_center_in_check_frame(0);
        let normal = self.path.step_up_normal;
        slide_sphere_with_normal(self, 0, normal, curr)
    }
}

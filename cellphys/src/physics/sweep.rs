use arrayvec::ArrayVec;

use crate::math::{FreeCoordinate, FreePoint, FreeVector, Sphere, SphereError};
use crate::physics::{
    ActorShape, CellId, CellOffsets, FLOOR_Z, LocalSphere, MAX_SPHERES, Position,
};

/// The working state of one actor's movement during one tick: where it is, where it is
/// trying to go, and how much of that movement remains permitted.
///
/// The “check” position is the candidate destination. Collision resolution refines it
/// obstacle by obstacle; at the end of the tick it becomes the actor's new position unless
/// the move collided.
///
/// Check spheres are in the frame of the check cell and current centers are in the frame
/// of the current cell; use [`SpherePath::curr_center_in_check_frame()`] to compare them.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct SpherePath {
    local_spheres: ArrayVec<LocalSphere, MAX_SPHERES>,
    global_sphere: ArrayVec<Sphere, MAX_SPHERES>,
    global_curr_center: ArrayVec<FreePoint, MAX_SPHERES>,
    cur_pos: Position,
    check_pos: Position,
    block_offset: FreeVector,

    /// If set, the check position is being re-validated rather than swept toward: it is
    /// acceptable only where the actor's spheres overlap the obstacle.
    pub backup_check_pos: Option<Position>,

    /// Fraction of this tick's movement which is still permitted, from 1 down to 0.
    /// Only ever decreases during a tick.
    walk_interp: FreeCoordinate,

    /// Minimum z component of a contact normal for the surface to count as walkable.
    pub walkable_allowance: FreeCoordinate,

    /// How far the actor is looking for ground below its check position this tick.
    /// Starts as the shape's [`ActorShape::step_down_height()`].
    pub step_down_amt: FreeCoordinate,

    /// Whether this pass is trying to step up over an obstacle.
    pub step_up: bool,

    /// Normal of the surface involved in the last step-up attempt or landing.
    pub step_up_normal: FreeVector,

    /// Set when the actor landed on something and the caller should back up and retry the
    /// move with the landing taken into account.
    pub collide: bool,
}

impl SpherePath {
    /// Places the spheres of `shape` at the current and check positions.
    ///
    /// Returns an error if either position puts a sphere at a non-finite location.
    pub fn new(
        shape: &ActorShape,
        cur_pos: Position,
        check_pos: Position,
        offsets: &impl CellOffsets,
    ) -> Result<Self, PathError> {
        let local_spheres: ArrayVec<LocalSphere, MAX_SPHERES> =
            shape.spheres().iter().copied().collect();

        let mut global_sphere = ArrayVec::new();
        let mut global_curr_center = ArrayVec::new();
        for local in &local_spheres {
            global_sphere.push(
                Sphere::checked_new(check_pos.frame.local_to_global(local.center), local.radius)
                    .map_err(PathError::Placement)?,
            );
            global_curr_center.push(
                Sphere::checked_new(cur_pos.frame.local_to_global(local.center), local.radius)
                    .map_err(PathError::Placement)?
                    .center,
            );
        }

        Ok(Self {
            local_spheres,
            global_sphere,
            global_curr_center,
            cur_pos,
            check_pos,
            block_offset: offsets.block_offset(cur_pos.cell, check_pos.cell),
            backup_check_pos: None,
            walk_interp: 1.0,
            walkable_allowance: FLOOR_Z,
            step_down_amt: shape.step_down_height(),
            step_up: false,
            step_up_normal: FreeVector::zero(),
            collide: false,
        })
    }

    /// Number of spheres in the actor's shape; 1 or 2.
    #[inline]
    pub fn num_sphere(&self) -> usize {
        self.global_sphere.len()
    }

    /// Sphere `index` at the check position, in the check cell's frame.
    ///
    /// Panics if `index` is not less than [`Self::num_sphere()`].
    #[track_caller]
    pub fn global_sphere(&self, index: usize) -> &Sphere {
        match self.global_sphere.get(index) {
            Some(sphere) => sphere,
            None => panic!(
                "sphere index {index} out of range for a path with {} spheres",
                self.num_sphere()
            ),
        }
    }

    /// Center of sphere `index` at the current position, in the current cell's frame.
    ///
    /// Panics if `index` is not less than [`Self::num_sphere()`].
    #[track_caller]
    pub fn global_curr_center(&self, index: usize) -> FreePoint {
        match self.global_curr_center.get(index) {
            Some(&center) => center,
            None => panic!(
                "sphere index {index} out of range for a path with {} spheres",
                self.num_sphere()
            ),
        }
    }

    /// Center of sphere `index` at the current position, in the check cell's frame.
    #[track_caller]
    pub fn curr_center_in_check_frame(&self, index: usize) -> FreePoint {
        self.global_curr_center(index) - self.block_offset
    }

    /// The spheres of the actor's shape, in local coordinates.
    pub fn local_spheres(&self) -> &[LocalSphere] {
        &self.local_spheres
    }

    /// Where the actor is at the start of the tick.
    pub fn cur_pos(&self) -> &Position {
        &self.cur_pos
    }

    /// Where the actor is trying to go.
    pub fn check_pos(&self) -> &Position {
        &self.check_pos
    }

    /// The cell whose frame the check position and check spheres are expressed in.
    #[inline]
    pub fn check_cell(&self) -> CellId {
        self.check_pos.cell
    }

    /// Translation from the current cell's frame to the check cell's frame.
    #[inline]
    pub fn block_offset(&self) -> FreeVector {
        self.block_offset
    }

    /// Moves the check position, and all check spheres with it, by `offset`.
    pub fn add_offset_to_check_pos(&mut self, offset: FreeVector) {
        self.check_pos.frame.origin += offset;
        for sphere in &mut self.global_sphere {
            *sphere = sphere.translate(offset);
        }
    }

    /// Fraction of this tick's movement which is still permitted.
    #[inline]
    pub fn walk_interp(&self) -> FreeCoordinate {
        self.walk_interp
    }

    /// Reduces the permitted fraction of this tick's movement to `value`, clamped to be
    /// non-negative. Has no effect if `value` is not smaller than the present fraction.
    pub fn tighten_walk_interp(&mut self, value: FreeCoordinate) {
        if value < self.walk_interp {
            self.walk_interp = value.max(0.0);
        }
    }

    /// Records that the actor landed on a surface with the given normal.
    pub fn set_collide(&mut self, normal: FreeVector) {
        self.collide = true;
        self.step_up_normal = normal;
    }

    /// Whether a contact normal with z component `z` describes ground the actor may
    /// stand on.
    #[inline]
    pub fn is_walkable_allowable(&self, z: FreeCoordinate) -> bool {
        z > self.walkable_allowance
    }
}

/// Error when a [`SpherePath`] or [`Transition`](super::Transition) cannot be constructed.
#[derive(Clone, Copy, Debug, displaydoc::Display, PartialEq)]
#[non_exhaustive]
pub enum PathError {
    /// actor position places a sphere at a non-finite location
    Placement(SphereError),
}

impl core::error::Error for PathError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            PathError::Placement(error) => Some(error),
        }
    }
}

use manyfmt::Refmt as _;

use crate::math::{FreeCoordinate, Sphere, SphereError};
use crate::physics::{
    ActorShape, CellId, CellOffsets, CollisionInfo, LocalSphere, ObjectInfo, ObjectInfoState,
    PathError, Position, SpherePath, TransitionState, intersects_sphere,
};
use crate::util::ConciseDebug;

/// One obstacle sphere found by the broad phase, in the frame of the cell it is in.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// The obstacle sphere.
    pub sphere: Sphere,
    /// The cell whose frame `sphere` is expressed in.
    pub cell: CellId,
}

impl Candidate {
    /// Places one sphere of an obstacle's collision proxy, which is scaled by `scale`
    /// about the obstacle's origin, at the obstacle's position.
    pub fn from_local(
        local: &LocalSphere,
        position: &Position,
        scale: FreeCoordinate,
    ) -> Result<Self, SphereError> {
        let center = position.frame.local_to_global(local.center * scale);
        Ok(Self {
            sphere: Sphere::checked_new(center, local.radius * scale)?,
            cell: position.cell,
        })
    }
}

/// Summary of resolving a tick's candidates; see [`Transition::resolve_candidates()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ResolveOutcome {
    /// The most significant outcome of the candidates tested.
    pub state: TransitionState,
    /// How many candidates were tested before finishing or colliding.
    pub candidates_tested: usize,
}

/// Everything known about one actor's movement during one tick.
///
/// Create one per actor per tick, feed it the candidate obstacles, and then
/// [`finish()`](Self::finish) it to obtain the actor's new position.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Transition {
    /// The actor's state flags and step heights.
    pub object: ObjectInfo,
    /// The movement being resolved.
    pub path: SpherePath,
    /// What the actor is touching.
    pub collisions: CollisionInfo,
}

impl Transition {
    /// Sets up the movement of an actor with the given shape and state from `cur_pos` to
    /// `check_pos`, with no existing contacts.
    pub fn new(
        shape: &ActorShape,
        state: ObjectInfoState,
        cur_pos: Position,
        check_pos: Position,
        offsets: &impl CellOffsets,
    ) -> Result<Self, PathError> {
        Ok(Self::with_parts(
            ObjectInfo::new(state, shape.step_up_height()),
            SpherePath::new(shape, cur_pos, check_pos, offsets)?,
            CollisionInfo::new(),
        ))
    }

    /// Sets up a movement from its parts. `collisions` is typically the [`CollisionInfo`]
    /// returned by the previous tick's [`finish()`](Self::finish); this begins a new tick
    /// of it.
    pub fn with_parts(object: ObjectInfo, path: SpherePath, mut collisions: CollisionInfo) -> Self {
        collisions.begin_tick();
        Self {
            object,
            path,
            collisions,
        }
    }

    /// Tests each candidate in order, stopping at the first that collides.
    ///
    /// Each candidate is converted to the check cell's frame using `offsets`. Candidates
    /// which adjust the check position affect the tests of those after them.
    pub fn resolve_candidates(
        &mut self,
        candidates: impl IntoIterator<Item = Candidate>,
        offsets: &impl CellOffsets,
    ) -> ResolveOutcome {
        let mut outcome = ResolveOutcome {
            state: TransitionState::Ok,
            candidates_tested: 0,
        };
        let check_cell = self.path.check_cell();
        for candidate in candidates {
            let target = candidate
                .sphere
                .translate(-offsets.block_offset(candidate.cell, check_cell));
            let state = intersects_sphere(&target, self);
            outcome.candidates_tested += 1;
            outcome.state = outcome.state.combine(state);
            if state == TransitionState::Collided {
                log::trace!(
                    "collided with {:?} after {} candidates",
                    target.refmt(&ConciseDebug),
                    outcome.candidates_tested
                );
                break;
            }
        }
        outcome
    }

    /// Ends the tick, returning the actor's new position and contacts.
    ///
    /// If the tick collided, the actor stays at its current position.
    pub fn finish(self, outcome: &ResolveOutcome) -> (Position, CollisionInfo) {
        let position = if outcome.state == TransitionState::Collided {
            *self.path.cur_pos()
        } else {
            *self.path.check_pos()
        };
        (position, self.collisions)
    }
}

//! Swept-sphere collision resolution for moving actors.
//!
//! The entry point for a whole tick is [`Transition`]; [`intersects_sphere()`] tests one
//! candidate obstacle against a [`Transition`] and is public for callers that run their own
//! candidate loop.

mod cells;
pub use cells::*;
mod constants;
pub use constants::*;
mod contact;
pub use contact::*;
mod context;
pub use context::*;
mod flags;
pub use flags::*;
mod proxy;
pub use proxy::*;
mod resolve;
pub use resolve::intersects_sphere;
mod sweep;
pub use sweep::*;

#[cfg(test)]
mod tests;

// -------------------------------------------------------------------------------------------------

/// The outcome of testing a moving actor against one obstacle.
///
/// [`Ok`](Self::Ok) and [`Collided`](Self::Collided) end the test of that obstacle with the
/// check position unchanged; [`Adjusted`](Self::Adjusted) and [`Slid`](Self::Slid) mean the
/// check position was refined, and later obstacles are tested against the refined position.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TransitionState {
    /// The obstacle does not affect the move.
    Ok,
    /// The move cannot be made. For a whole tick, this means the actor stays where it was.
    Collided,
    /// The check position was moved to resolve the contact: stepped up or down, landed,
    /// or clipped to the moment of impact.
    Adjusted,
    /// The check position was redirected along the obstacle's surface.
    Slid,
}

impl TransitionState {
    /// Returns whichever of `self` and `other` describes the larger change to the move,
    /// ordered `Ok < Adjusted < Slid < Collided`.
    ///
    /// This is how the outcomes of the individual obstacles in a tick are summarized.
    ///
    /// ```
    /// use cellphys::physics::TransitionState;
    ///
    /// assert_eq!(TransitionState::Ok.combine(TransitionState::Slid), TransitionState::Slid);
    /// assert_eq!(TransitionState::Slid.combine(TransitionState::Adjusted), TransitionState::Slid);
    /// ```
    #[inline]
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Adjusted => 1,
            Self::Slid => 2,
            Self::Collided => 3,
        }
    }
}

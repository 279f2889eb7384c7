use crate::math::FreeCoordinate;

bitflags::bitflags! {
    /// The present contact state and nature of a moving actor, which decide how the
    /// resolver treats its collisions.
    #[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ObjectInfoState: u32 {
        /// Touching some surface at the start of the tick.
        const CONTACT = 1 << 0;
        /// Standing on walkable ground at the start of the tick.
        const ON_WALKABLE = 1 << 1;
        /// Movement is clipped to the moment of impact rather than redirected.
        const PATH_CLIPPED = 1 << 2;
        /// Compute the exact time of impact for clipped collisions.
        const PERFECT_CLIP = 1 << 3;
        /// Passes through solid objects; only reports overlap.
        const ETHEREAL = 1 << 4;
        /// Controlled by a player.
        const IS_PLAYER = 1 << 5;
        /// A creature (including players).
        const IS_CREATURE = 1 << 6;
    }
}

/// The one contact situation of an actor which selects how step-up collisions are handled.
///
/// Derived from [`ObjectInfoState`] with the priority
/// `InContact > OnWalkable > PathClipped > Airborne`.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContactClass {
    /// [`ObjectInfoState::CONTACT`].
    InContact,
    /// [`ObjectInfoState::ON_WALKABLE`] without contact.
    OnWalkable,
    /// [`ObjectInfoState::PATH_CLIPPED`] without contact.
    PathClipped,
    /// None of the above: falling or flying.
    Airborne,
}

/// Per-tick information about the moving actor, other than its geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct ObjectInfo {
    /// Contact state and kind of actor.
    pub state: ObjectInfoState,
    /// How high a ledge the actor may step up onto, in meters.
    pub step_up_height: FreeCoordinate,
}

impl ObjectInfo {
    #[allow(missing_docs)]
    #[inline]
    pub fn new(state: ObjectInfoState, step_up_height: FreeCoordinate) -> Self {
        Self {
            state,
            step_up_height,
        }
    }

    /// Classifies the contact state for step-up handling.
    ///
    /// ```
    /// use cellphys::physics::{ContactClass, ObjectInfo, ObjectInfoState};
    ///
    /// let state = ObjectInfoState::ON_WALKABLE | ObjectInfoState::PATH_CLIPPED;
    /// let info = ObjectInfo::new(state, 0.5);
    /// assert_eq!(info.contact_class(), ContactClass::OnWalkable);
    /// ```
    #[inline]
    pub fn contact_class(&self) -> ContactClass {
        if self.state.contains(ObjectInfoState::CONTACT) {
            ContactClass::InContact
        } else if self.state.contains(ObjectInfoState::ON_WALKABLE) {
            ContactClass::OnWalkable
        } else if self.state.contains(ObjectInfoState::PATH_CLIPPED) {
            ContactClass::PathClipped
        } else {
            ContactClass::Airborne
        }
    }

    /// Whether solid collision response is disabled.
    #[inline]
    pub fn is_ethereal(&self) -> bool {
        self.state.contains(ObjectInfoState::ETHEREAL)
    }

    /// Whether the actor is a creature not controlled by a player.
    ///
    /// Such actors accept any sphere contact outside of step-up handling without the
    /// walkable-slope resolution that players get.
    #[inline]
    pub fn is_non_player_creature(&self) -> bool {
        self.state.contains(ObjectInfoState::IS_CREATURE)
            && !self.state.contains(ObjectInfoState::IS_PLAYER)
    }
}

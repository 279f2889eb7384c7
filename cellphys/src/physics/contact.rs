use crate::math::{FreeVector, Plane, normalize_check_small};
use crate::physics::CellId;

/// What an actor is touching: the normal of the last collision and the surface it is
/// resting or sliding on.
///
/// The contact plane is *valid* only if it was established during the present tick.
/// [`CollisionInfo::begin_tick()`] moves a valid plane into the *last-known* slot, where it
/// still serves as a fallback for sliding.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct CollisionInfo {
    collision_normal: FreeVector,
    contact_plane: Option<(Plane, CellId)>,
    last_known_contact_plane: Option<(Plane, CellId)>,
}

impl Default for CollisionInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionInfo {
    /// No contact at all.
    pub const fn new() -> Self {
        Self {
            collision_normal: FreeVector::new(0., 0., 0.),
            contact_plane: None,
            last_known_contact_plane: None,
        }
    }

    /// Prepares for a new tick: the contact plane, if any, becomes the last-known one, and
    /// the collision normal is cleared.
    pub fn begin_tick(&mut self) {
        if let Some(plane) = self.contact_plane.take() {
            self.last_known_contact_plane = Some(plane);
        }
        self.collision_normal = FreeVector::zero();
    }

    /// The normal of the most recent collision; either a unit vector or zero.
    #[inline]
    pub fn collision_normal(&self) -> FreeVector {
        self.collision_normal
    }

    /// Records the normal of a collision. It is normalized, or recorded as zero if it is too
    /// short to have a meaningful direction.
    pub fn set_collision_normal(&mut self, normal: FreeVector) {
        self.collision_normal = normalize_check_small(normal).unwrap_or_else(FreeVector::zero);
    }

    /// The contact plane established this tick, and the cell whose frame it is expressed in.
    #[inline]
    pub fn contact_plane(&self) -> Option<(Plane, CellId)> {
        self.contact_plane
    }

    /// The contact plane from an earlier tick.
    #[inline]
    pub fn last_known_contact_plane(&self) -> Option<(Plane, CellId)> {
        self.last_known_contact_plane
    }

    /// Records the surface the actor is now resting on.
    pub fn set_contact_plane(&mut self, plane: Plane, cell: CellId) {
        self.contact_plane = Some((plane, cell));
    }

    /// Forgets the contact plane established this tick.
    pub fn invalidate_contact_plane(&mut self) {
        self.contact_plane = None;
    }

    /// The plane to slide along: the valid contact plane if there is one, else the last-known
    /// one, else [`Plane::ZERO`].
    #[inline]
    pub fn effective_contact_plane(&self) -> Plane {
        self.contact_plane
            .or(self.last_known_contact_plane)
            .map_or(Plane::ZERO, |(plane, _)| plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point3, vec3};
    use pretty_assertions::assert_eq;

    #[test]
    fn collision_normal_is_unit_or_zero() {
        let mut info = CollisionInfo::new();
        info.set_collision_normal(vec3(0., 3., 4.));
        assert_eq!(info.collision_normal(), vec3(0., 0.6, 0.8));
        info.set_collision_normal(vec3(0., 0., 0.0001));
        assert_eq!(info.collision_normal(), FreeVector::zero());
    }

    #[test]
    fn begin_tick_demotes_plane() {
        let floor = Plane::from_point_normal(point3(0., 0., 1.), vec3(0., 0., 1.));
        let wall = Plane::from_point_normal(point3(2., 0., 0.), vec3(-1., 0., 0.));
        let cell = CellId(0xA9B4_0001);
        let mut info = CollisionInfo::new();
        assert_eq!(info.effective_contact_plane(), Plane::ZERO);

        info.set_contact_plane(floor, cell);
        info.set_collision_normal(vec3(0., 0., 1.));
        assert_eq!(info.effective_contact_plane(), floor);

        info.begin_tick();
        assert_eq!(
            info,
            CollisionInfo {
                collision_normal: FreeVector::zero(),
                contact_plane: None,
                last_known_contact_plane: Some((floor, cell)),
            }
        );
        assert_eq!(info.effective_contact_plane(), floor);

        info.set_contact_plane(wall, cell);
        assert_eq!(info.effective_contact_plane(), wall);
        info.invalidate_contact_plane();
        assert_eq!(info.effective_contact_plane(), floor);

        // A tick with no contact keeps the older plane as last-known.
        info.begin_tick();
        assert_eq!(info.last_known_contact_plane(), Some((floor, cell)));
    }
}

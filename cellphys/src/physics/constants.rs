use crate::math::FreeCoordinate;

pub use crate::math::EPSILON;

/// Minimum z component of a contact normal for the surface to be walkable while the actor
/// has just landed. Nearly vertical surfaces qualify, so that a falling actor can land on
/// the shoulder of a sphere.
pub const LANDING_Z: FreeCoordinate = 0.0871557;

/// Minimum z component of a contact normal for the surface to be walkable ground.
/// This corresponds to a slope of about 48 degrees.
pub const FLOOR_Z: FreeCoordinate = 0.66417414;

/// How far behind the start of the tick (as a fraction of the walk interpolation) a contact
/// may be found and still be accepted.
pub const WALK_INTERP_TOLERANCE: FreeCoordinate = 0.1;

/// Side length of a landblock, in meters.
pub const BLOCK_LENGTH: FreeCoordinate = 192.0;

/// Maximum number of spheres in an [`ActorShape`](super::ActorShape).
pub const MAX_SPHERES: usize = 2;

use core::fmt;

use manyfmt::Refmt as _;

use crate::math::{FreeCoordinate, FreePoint, FreeVector};
use crate::util::ConciseDebug;

/// A plane, described by a normal vector and offset such that the points `p` on the plane
/// satisfy `normal.dot(p) + d == 0`.
///
/// The normal is unit length, except for [`Plane::ZERO`], which stands for the absence
/// of any plane.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// Direction the plane faces.
    pub normal: FreeVector,
    /// Negated distance from the origin along `normal`.
    pub d: FreeCoordinate,
}

impl Plane {
    /// The degenerate plane with zero normal, used where no plane is known.
    pub const ZERO: Plane = Plane {
        normal: FreeVector::new(0., 0., 0.),
        d: 0.,
    };

    /// Constructs the plane through `point` facing `normal`.
    ///
    /// `normal` should be a unit vector; it is not normalized.
    #[inline]
    pub fn from_point_normal(point: FreePoint, normal: FreeVector) -> Self {
        Self {
            normal,
            d: -normal.dot(point.to_vector()),
        }
    }

    /// Distance from the plane to `point`, positive on the side `normal` faces.
    #[inline]
    pub fn signed_distance(&self, point: FreePoint) -> FreeCoordinate {
        self.normal.dot(point.to_vector()) + self.d
    }

    /// Whether this is [`Plane::ZERO`] or otherwise has no direction.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == FreeVector::zero()
    }
}

impl fmt::Debug for Plane {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Plane")
            .field("normal", &self.normal.refmt(&ConciseDebug))
            .field("d", &self.d)
            .finish()
    }
}

impl manyfmt::Fmt<ConciseDebug> for Plane {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        write!(fmt, "{:?} d {:+.3}", self.normal.refmt(fopt), self.d)
    }
}

use core::fmt;

use manyfmt::Refmt as _;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{EPSILON, FreeCoordinate, FreePoint, FreeVector, Ray};
use crate::util::ConciseDebug;

/// Value returned by [`find_time_of_collision()`] when the movement produces no collision.
pub const NO_COLLISION: FreeCoordinate = -1.0;

/// Roots of the swept-sphere equation earlier than this are considered to lie behind the
/// start of the movement, and the later root is used instead.
const BEHIND_START_TOLERANCE: FreeCoordinate = -0.5;

/// A sphere; the collision proxy of everything that moves or is collided with.
///
/// Spheres are immutable values; transforming one produces a new [`Sphere`].
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    /// The center point of the sphere.
    pub center: FreePoint,
    /// The radius of the sphere. Never negative or NaN.
    radius: FreeCoordinate,
}

impl Sphere {
    /// Constructs a [`Sphere`] from its center and radius.
    ///
    /// Panics if the radius is negative or NaN.
    /// Use [`Sphere::checked_new()`] to handle invalid input without panicking.
    #[inline]
    #[track_caller]
    pub fn new(center: impl Into<FreePoint>, radius: FreeCoordinate) -> Self {
        let center = center.into();
        match Self::checked_new(center, radius) {
            Ok(sphere) => sphere,
            Err(error) => panic!("{error}"),
        }
    }

    /// Constructs a [`Sphere`] from its center and radius.
    ///
    /// Returns an error if the radius is negative or NaN, or if the center is not finite.
    #[inline]
    pub fn checked_new(center: FreePoint, radius: FreeCoordinate) -> Result<Self, SphereError> {
        // `!(radius >= 0.)` rather than `radius < 0.` so that NaN is rejected.
        if !(radius >= 0.0) || !radius.is_finite() {
            return Err(SphereError::InvalidRadius { radius });
        }
        if !(center.x.is_finite() && center.y.is_finite() && center.z.is_finite()) {
            return Err(SphereError::InvalidCenter { center });
        }
        Ok(Self { center, radius })
    }

    /// Returns the radius of the sphere.
    #[inline]
    pub const fn radius(&self) -> FreeCoordinate {
        self.radius
    }

    /// Returns a copy of this sphere moved by `offset`.
    #[must_use]
    #[inline]
    pub fn translate(self, offset: FreeVector) -> Self {
        Self {
            center: self.center + offset,
            ..self
        }
    }

    /// Returns a copy of this sphere with its center (relative to the origin) and radius
    /// both multiplied by `scale`.
    ///
    /// Panics if `scale` is negative or NaN.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn scale(self, scale: FreeCoordinate) -> Self {
        Self::new(self.center * scale, self.radius * scale)
    }

    /// Returns whether the two spheres overlap; that is, whether the distance between their
    /// centers is strictly less than the sum of their radii.
    ///
    /// Spheres which exactly touch do not intersect.
    ///
    /// ```
    /// # use cellphys_base as cellphys;
    /// use cellphys::math::Sphere;
    ///
    /// let a = Sphere::new([0., 0., 0.], 1.0);
    /// assert!(a.intersects(&Sphere::new([0., 0., 1.5], 1.0)));
    /// assert!(!a.intersects(&Sphere::new([0., 0., 2.0], 1.0)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Sphere) -> bool {
        let radius_sum = self.radius + other.radius;
        (other.center - self.center).square_length() < radius_sum * radius_sum
    }

    /// Finds where `ray` first meets the surface of this sphere, as a multiple of
    /// `ray.direction`.
    ///
    /// Returns [`None`] if the ray misses, if its direction is too short to be meaningful,
    /// or if the ray starts inside the sphere or exactly on its surface (a line of sight that
    /// begins inside a solid is not considered to hit it).
    ///
    /// If the sphere is behind the origin of the ray, this can still return [`Some`], with a
    /// negative distance. Callers which only care about hits ahead of the origin must check the
    /// sign.
    #[inline]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<FreeCoordinate> {
        let dir_square_length = ray.direction.square_length();
        if dir_square_length < EPSILON {
            return None;
        }

        let delta = ray.origin - self.center;
        let c = delta.square_length() - self.radius * self.radius;
        if c <= 0.0 {
            return None;
        }

        let b = -delta.dot(ray.direction);
        let discriminant = b * b - c * dir_square_length;
        if discriminant < 0.0 {
            return None;
        }

        let dist = discriminant.sqrt();
        Some(if b <= dist {
            (b + dist) / dir_square_length
        } else {
            (b - dist) / dir_square_length
        })
    }
}

impl fmt::Debug for Sphere {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Sphere")
            .field("center", &self.center.refmt(&ConciseDebug))
            .field("radius", &self.radius)
            .finish()
    }
}

impl manyfmt::Fmt<ConciseDebug> for Sphere {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        write!(fmt, "{:?} r {:.3}", self.center.refmt(fopt), self.radius)
    }
}

#[cfg(feature = "arbitrary")]
#[mutants::skip]
#[allow(clippy::missing_inline_in_public_items)]
impl<'a> arbitrary::Arbitrary<'a> for Sphere {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Sixteenths of a meter within a few landblocks, so that fuzzed geometry stays finite
        // and is dominated by cases where spheres are near each other.
        let mut coordinate = || -> arbitrary::Result<FreeCoordinate> {
            Ok(FreeCoordinate::from(u.int_in_range(-4096i16..=4096)?) / 16.0)
        };
        let center = FreePoint::new(coordinate()?, coordinate()?, coordinate()?);
        let radius = FreeCoordinate::from(u.int_in_range(0u8..=64)?) / 16.0;
        Ok(Self { center, radius })
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (7, Some(7))
    }
}

/// Finds the fraction of `movement` at which a sphere, starting at `relative_position` from
/// the center of a stationary sphere and moving by `movement`, first comes within
/// `radius_sum` of that center.
///
/// Returns [`NO_COLLISION`] if:
///
/// * `movement` is shorter than [`EPSILON`] (nothing is moving),
/// * the spheres are already touching or overlapping at the start, so there is no moment of
///   entry to find, or
/// * the path misses the stationary sphere entirely.
///
/// Otherwise the earlier of the two solutions is returned, unless it lies more than half of the
/// movement behind the starting point, in which case the later solution is returned.
/// The result may be greater than 1 if contact would occur beyond the end of `movement`;
/// callers decide which times they accept.
///
/// ```
/// # use cellphys_base as cellphys;
/// use cellphys::euclid::vec3;
/// use cellphys::math::find_time_of_collision;
///
/// // Moving 10 units toward a sphere 5 units away, with a combined radius of 1.
/// let t = find_time_of_collision(vec3(0., 0., -10.), vec3(0., 0., 5.), 1.0);
/// assert_eq!(t, 0.4);
/// ```
#[inline]
pub fn find_time_of_collision(
    movement: FreeVector,
    relative_position: FreeVector,
    radius_sum: FreeCoordinate,
) -> FreeCoordinate {
    let a = movement.square_length();
    if a < EPSILON {
        return NO_COLLISION;
    }

    let c = relative_position.square_length() - radius_sum * radius_sum;
    if c < EPSILON {
        return NO_COLLISION;
    }

    let b = -relative_position.dot(movement);
    let discriminant = b * b - c * a;
    if discriminant < 0.0 {
        return NO_COLLISION;
    }

    let root = discriminant.sqrt();
    let earlier = (b - root) / a;
    if earlier < BEHIND_START_TOLERANCE {
        (b + root) / a
    } else {
        earlier
    }
}

/// Error when a [`Sphere`] cannot be constructed from the given input.
#[derive(Clone, Copy, Debug, displaydoc::Display, PartialEq)]
#[non_exhaustive]
pub enum SphereError {
    /// sphere radius {radius} is negative, infinite, or NaN
    InvalidRadius {
        /// The rejected radius.
        radius: FreeCoordinate,
    },
    /// sphere center {center:?} is not finite
    InvalidCenter {
        /// The rejected center.
        center: FreePoint,
    },
}

impl core::error::Error for SphereError {}

//! Mathematical utilities and decisions.

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

mod coord;
pub use coord::*;
mod plane;
pub use plane::*;
mod ray;
pub use ray::*;
mod sphere;
pub use sphere::*;

/// Distances, and squared lengths, smaller than this are treated as zero.
///
/// This is also the margin by which touching spheres are kept apart, so that a sphere
/// resting exactly on another is not reported as overlapping it.
pub const EPSILON: FreeCoordinate = 0.0002;

/// Returns the unit vector in the direction of `v`, or [`None`] if `v` is shorter than
/// [`EPSILON`] and its direction is therefore not meaningful.
///
/// ```
/// # use cellphys_base as cellphys;
/// use cellphys::euclid::vec3;
/// use cellphys::math::{FreeVector, normalize_check_small};
///
/// assert_eq!(normalize_check_small(vec3(0., 3., 0.)), Some(vec3(0., 1., 0.)));
/// assert_eq!(normalize_check_small(FreeVector::zero()), None);
/// ```
#[inline]
pub fn normalize_check_small(v: FreeVector) -> Option<FreeVector> {
    let length = v.square_length().sqrt();
    if length < EPSILON {
        None
    } else {
        Some(v / length)
    }
}

use crate::math::{FreeCoordinate, FreePoint, FreeVector};

/// A ray; a half-infinite line segment (sometimes used as finite by the length of the
/// direction vector).
///
/// Rays are used for line-of-sight and placement queries via [`Sphere::intersect_ray()`].
///
/// [`Sphere::intersect_ray()`]: crate::math::Sphere::intersect_ray
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    /// The sole endpoint of the ray.
    pub origin: FreePoint,

    /// The direction in which the ray extends infinitely.
    ///
    /// The meaning, if any, of the magnitude of this vector depends on context;
    /// considered as a geometric object it is a parameter.
    pub direction: FreeVector,
}

impl Ray {
    /// Constructs a [`Ray`] from convertible types (e.g. tuples or 3-element arrays).
    /// Other than the use of [`Into`], this is equivalent to a struct literal.
    ///
    /// ```
    /// # use cellphys_base as cellphys;
    /// use cellphys::euclid::{point3, vec3};
    /// use cellphys::math::Ray;
    ///
    /// assert_eq!(
    ///     Ray::new([1., 2., 3.], [4., 5., 6.]),
    ///     Ray {
    ///         origin: point3(1., 2., 3.),
    ///         direction: vec3(4., 5., 6.),
    ///     }
    /// );
    /// ```
    #[allow(clippy::missing_inline_in_public_items)] // is generic already
    pub fn new(origin: impl Into<FreePoint>, direction: impl Into<FreeVector>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    /// Scale the ray's direction vector by the given factor.
    #[must_use]
    #[inline]
    pub fn scale_direction(self, scale: FreeCoordinate) -> Self {
        Self {
            origin: self.origin,
            direction: self.direction * scale,
        }
    }

    /// Return `self.origin + self.direction * t`, the point at parameter `t` along the ray.
    ///
    /// Combined with [`Sphere::intersect_ray()`](crate::math::Sphere::intersect_ray),
    /// this gives the point at which the ray meets a sphere.
    #[must_use]
    #[inline]
    pub fn point_at(self, t: FreeCoordinate) -> FreePoint {
        self.origin + self.direction * t
    }

    /// Return `self.origin + self.direction`, the “far end” of the ray.
    ///
    /// This only makes sense in contexts which are specifically using the length of the
    /// direction vector as a distance.
    #[must_use]
    #[inline]
    pub fn unit_endpoint(self) -> FreePoint {
        self.origin + self.direction
    }

    /// Returns a copy of this ray with its origin moved by `offset`.
    #[must_use]
    #[inline]
    pub fn translate(self, offset: FreeVector) -> Self {
        Self {
            origin: self.origin + offset,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Sphere;
    use euclid::{point3, vec3};
    use pretty_assertions::assert_eq;

    #[test]
    fn point_at_surface_hit() {
        let ray = Ray::new([0., 0., 5.], [0., 0., -1.]);
        let t = Sphere::new([0., 0., 0.], 1.0).intersect_ray(&ray).unwrap();
        assert_eq!(ray.point_at(t), point3(0., 0., 1.));
    }

    #[test]
    fn translate_moves_origin_only() {
        let ray = Ray::new([1., 1., 1.], [0., 2., 0.]).translate(vec3(-1., 0., 0.));
        assert_eq!(ray, Ray::new([0., 1., 1.], [0., 2., 0.]));
        assert_eq!(ray.unit_endpoint(), point3(0., 3., 1.));
        assert_eq!(ray.scale_direction(0.5).unit_endpoint(), point3(0., 2., 1.));
    }
}

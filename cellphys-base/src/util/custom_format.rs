#![allow(clippy::missing_inline_in_public_items)]

use core::fmt;

use manyfmt::{Fmt, Refmt as _};

/// Format type for [`manyfmt::Fmt`] which is similar to [`fmt::Debug`], but uses an
/// alternate concise format.
///
/// This format may be on one line despite the pretty-printing option, and may lose
/// precision or Rust syntax in favor of a short at-a-glance representation.
/// It is used for the collision log messages, which are emitted once per sphere tested.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConciseDebug;

impl<T: Fmt<ConciseDebug>, const N: usize> Fmt<ConciseDebug> for [T; N] {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        fmt.debug_list().entries(self.iter().map(|item| item.refmt(fopt))).finish()
    }
}

impl<T: Fmt<ConciseDebug>> Fmt<ConciseDebug> for [T] {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        fmt.debug_list().entries(self.iter().map(|item| item.refmt(fopt))).finish()
    }
}

impl<T: Fmt<ConciseDebug>> Fmt<ConciseDebug> for Option<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        match self {
            Some(value) => write!(fmt, "{:?}", value.refmt(fopt)),
            None => write!(fmt, "-"),
        }
    }
}

impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Point3D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?}, {:+.3?})", self.x, self.y, self.z)
    }
}
impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Vector3D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?}, {:+.3?})", self.x, self.y, self.z)
    }
}
impl<T: fmt::Debug, Src, Dst> Fmt<ConciseDebug> for euclid::Rotation3D<T, Src, Dst> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "[{:+.3?}, {:+.3?}, {:+.3?}; {:+.3?}]",
            self.i, self.j, self.k, self.r
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point3, vec3};
    use pretty_assertions::assert_eq;

    #[test]
    fn point_and_vector() {
        let p: euclid::default::Point3D<f64> = point3(1.0, -0.5, 1.0 / 3.0);
        assert_eq!(
            format!("{:?}", p.refmt(&ConciseDebug)),
            "(+1.000, -0.500, +0.333)"
        );
        let v: euclid::default::Vector3D<f64> = vec3(0.0, 0.0, 2.0);
        assert_eq!(
            format!("{:?}", Some(v).refmt(&ConciseDebug)),
            "(+0.000, +0.000, +2.000)"
        );
        assert_eq!(
            format!("{:?}", None::<euclid::default::Vector3D<f64>>.refmt(&ConciseDebug)),
            "-"
        );
    }
}

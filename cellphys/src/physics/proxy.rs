use core::fmt;

use arrayvec::ArrayVec;
use manyfmt::Refmt as _;

use crate::math::{FreeCoordinate, LocalPoint, Sphere, SphereError};
use crate::physics::MAX_SPHERES;
use crate::util::ConciseDebug;

/// A sphere positioned relative to an object's own origin and axes, such as one of the
/// spheres of an [`ActorShape`] or of an obstacle's collision proxy.
///
/// Unlike [`Sphere`], this is not validated on construction; [`ActorShape::new()`] and
/// [`Candidate::from_local()`](super::Candidate::from_local) validate it when it is placed.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSphere {
    /// Center relative to the object's origin.
    pub center: LocalPoint,
    /// Radius in meters.
    pub radius: FreeCoordinate,
}

impl LocalSphere {
    /// Constructs a [`LocalSphere`] from convertible types (e.g. tuples or 3-element arrays).
    pub fn new(center: impl Into<LocalPoint>, radius: FreeCoordinate) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }

    fn validate(self) -> Result<Self, SphereError> {
        Sphere::checked_new(self.center.cast_unit(), self.radius)?;
        Ok(self)
    }
}

impl fmt::Debug for LocalSphere {
    #[mutants::skip]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "LocalSphere({:?} r {:.3})", self.center.refmt(&ConciseDebug), self.radius)
    }
}

// -------------------------------------------------------------------------------------------------

/// The collision proxy of a kind of actor: one or two spheres, and how far it may step
/// up or down while walking.
///
/// Sphere 0 is the primary sphere; a second sphere, if present, is usually stacked above
/// it to approximate a standing figure.
///
/// With the `serde` feature, this may be deserialized from configuration; invalid shapes
/// are rejected with the same checks as [`ActorShape::new()`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "schema::ActorShapeSer", into = "schema::ActorShapeSer")
)]
pub struct ActorShape {
    spheres: ArrayVec<LocalSphere, MAX_SPHERES>,
    step_up_height: FreeCoordinate,
    step_down_height: FreeCoordinate,
}

impl ActorShape {
    /// Constructs an [`ActorShape`], checking that there are between 1 and [`MAX_SPHERES`]
    /// spheres and that each of them is valid.
    ///
    /// ```
    /// use cellphys::physics::{ActorShape, LocalSphere, ShapeError};
    ///
    /// let shape = ActorShape::new(
    ///     [LocalSphere::new([0., 0., 0.5], 0.5), LocalSphere::new([0., 0., 1.2], 0.5)],
    ///     0.6,
    ///     0.4,
    /// )?;
    /// assert_eq!(shape.num_sphere(), 2);
    ///
    /// assert_eq!(ActorShape::new([], 0.6, 0.4), Err(ShapeError::NoSpheres));
    /// # Ok::<(), ShapeError>(())
    /// ```
    pub fn new(
        spheres: impl IntoIterator<Item = LocalSphere>,
        step_up_height: FreeCoordinate,
        step_down_height: FreeCoordinate,
    ) -> Result<Self, ShapeError> {
        let mut validated = ArrayVec::new();
        let mut count = 0;
        for (index, sphere) in spheres.into_iter().enumerate() {
            let sphere = sphere
                .validate()
                .map_err(|error| ShapeError::InvalidSphere { index, error })?;
            if index < MAX_SPHERES {
                validated.push(sphere);
            }
            count = index + 1;
        }
        if count > MAX_SPHERES {
            return Err(ShapeError::TooManySpheres { count });
        }
        if validated.is_empty() {
            return Err(ShapeError::NoSpheres);
        }
        Ok(Self {
            spheres: validated,
            step_up_height,
            step_down_height,
        })
    }

    /// The spheres, primary first.
    #[inline]
    pub fn spheres(&self) -> &[LocalSphere] {
        &self.spheres
    }

    /// Number of spheres; always 1 or 2.
    #[inline]
    pub fn num_sphere(&self) -> usize {
        self.spheres.len()
    }

    /// How high a ledge the actor may step up onto, in meters.
    #[inline]
    pub fn step_up_height(&self) -> FreeCoordinate {
        self.step_up_height
    }

    /// How far the actor may step down to stay on the ground, in meters.
    #[inline]
    pub fn step_down_height(&self) -> FreeCoordinate {
        self.step_down_height
    }
}

/// Error when an [`ActorShape`] cannot be constructed from the given spheres.
#[derive(Clone, Copy, Debug, displaydoc::Display, PartialEq)]
#[non_exhaustive]
pub enum ShapeError {
    /// an actor shape must have at least one sphere
    NoSpheres,

    /// an actor shape may have at most 2 spheres, but {count} were given
    TooManySpheres {
        /// Number of spheres given.
        count: usize,
    },

    /// sphere {index} of the actor shape is invalid
    InvalidSphere {
        /// Position of the sphere in the list.
        index: usize,
        /// Why the sphere is invalid.
        error: SphereError,
    },
}

impl core::error::Error for ShapeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ShapeError::InvalidSphere { error, .. } => Some(error),
            ShapeError::NoSpheres | ShapeError::TooManySpheres { .. } => None,
        }
    }
}

#[cfg(feature = "serde")]
mod schema {
    use super::*;

    /// Serialization schema for [`ActorShape`]. Every deserialized value is passed through
    /// [`ActorShape::new()`].
    #[derive(serde::Serialize, serde::Deserialize)]
    pub(super) struct ActorShapeSer {
        spheres: ArrayVec<LocalSphere, MAX_SPHERES>,
        step_up_height: FreeCoordinate,
        step_down_height: FreeCoordinate,
    }

    impl TryFrom<ActorShapeSer> for ActorShape {
        type Error = ShapeError;
        fn try_from(value: ActorShapeSer) -> Result<Self, Self::Error> {
            ActorShape::new(value.spheres, value.step_up_height, value.step_down_height)
        }
    }

    impl From<ActorShape> for ActorShapeSer {
        fn from(value: ActorShape) -> Self {
            let ActorShape {
                spheres,
                step_up_height,
                step_down_height,
            } = value;
            ActorShapeSer {
                spheres,
                step_up_height,
                step_down_height,
            }
        }
    }
}

use core::fmt;

use euclid::Rotation3D;
use manyfmt::Refmt as _;

use crate::math::{Cell, FreeCoordinate, FreePoint, FreeVector, Local, LocalPoint, LocalVector};
use crate::physics::BLOCK_LENGTH;
use crate::util::ConciseDebug;

/// Identifier of a cell: one region of a landblock, indoors or out.
///
/// The high 16 bits identify the landblock (x coordinate in the top byte, y in the next);
/// the low 16 bits identify the cell within it.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct CellId(pub u32);

impl CellId {
    /// The reserved cell standing for “outside the world”. Actors in it do not collide with
    /// anything.
    pub const OUTSIDE: Self = Self(1);

    /// The landblock this cell belongs to.
    #[inline]
    pub const fn landblock(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// X coordinate of the landblock, in units of [`BLOCK_LENGTH`].
    #[inline]
    pub const fn block_x(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Y coordinate of the landblock, in units of [`BLOCK_LENGTH`].
    #[inline]
    pub const fn block_y(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Whether this is [`CellId::OUTSIDE`].
    #[inline]
    pub const fn is_outside(self) -> bool {
        self.0 == Self::OUTSIDE.0
    }
}

impl fmt::Debug for CellId {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId({:#010X})", self.0)
    }
}

/// Translation between the coordinate frames of two cells.
///
/// This is supplied by the application, which knows how its cells are arranged; the
/// resolver needs it because positions in different landblocks are not directly comparable.
pub trait CellOffsets {
    /// Returns the vector which, subtracted from a point in `from`'s frame, gives the same
    /// point in `to`'s frame.
    fn block_offset(&self, from: CellId, to: CellId) -> FreeVector;
}

impl<T: CellOffsets + ?Sized> CellOffsets for &T {
    #[inline]
    fn block_offset(&self, from: CellId, to: CellId) -> FreeVector {
        (**self).block_offset(from, to)
    }
}

/// [`CellOffsets`] for cells laid out in the standard grid of landblocks, each
/// [`BLOCK_LENGTH`] meters square, with every cell using its landblock's frame.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct LandblockGrid;

impl CellOffsets for LandblockGrid {
    #[inline]
    fn block_offset(&self, from: CellId, to: CellId) -> FreeVector {
        if from.landblock() == to.landblock() {
            return FreeVector::zero();
        }
        FreeVector::new(
            (FreeCoordinate::from(to.block_x()) - FreeCoordinate::from(from.block_x()))
                * BLOCK_LENGTH,
            (FreeCoordinate::from(to.block_y()) - FreeCoordinate::from(from.block_y()))
                * BLOCK_LENGTH,
            0.0,
        )
    }
}

// -------------------------------------------------------------------------------------------------

/// The placement of an object's local coordinate system within a cell's frame.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_structs)]
pub struct Frame {
    /// Where the object's origin is.
    pub origin: FreePoint,
    /// Rotation from the object's local axes to the cell's axes.
    pub rotation: Rotation3D<FreeCoordinate, Local, Cell>,
}

impl Frame {
    /// A frame with its origin at `origin` and no rotation.
    #[inline]
    pub fn at(origin: impl Into<FreePoint>) -> Self {
        Self {
            origin: origin.into(),
            rotation: Rotation3D::identity(),
        }
    }

    /// Converts a displacement in local coordinates to this frame's cell coordinates.
    #[inline]
    pub fn local_to_global_vector(&self, v: LocalVector) -> FreeVector {
        self.rotation.transform_vector3d(v)
    }

    /// Converts a point in local coordinates to this frame's cell coordinates.
    #[inline]
    pub fn local_to_global(&self, p: LocalPoint) -> FreePoint {
        self.origin + self.local_to_global_vector(p.to_vector())
    }
}

impl fmt::Debug for Frame {
    #[mutants::skip]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Frame")
            .field("origin", &self.origin.refmt(&ConciseDebug))
            .field("rotation", &self.rotation.refmt(&ConciseDebug))
            .finish()
    }
}

/// Where an actor or obstacle is: a [`Frame`] relative to the landblock of a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_structs)]
pub struct Position {
    /// The cell containing the object's origin.
    pub cell: CellId,
    /// The object's origin and orientation, in the cell's frame.
    pub frame: Frame,
}

impl Position {
    /// A position in `cell` at `origin`, with no rotation.
    #[inline]
    pub fn new(cell: CellId, origin: impl Into<FreePoint>) -> Self {
        Self {
            cell,
            frame: Frame::at(origin),
        }
    }

    /// Returns the same place expressed relative to the landblock of `cell`.
    #[must_use]
    #[inline]
    pub fn in_cell_frame(self, cell: CellId, offsets: &impl CellOffsets) -> Self {
        let offset = offsets.block_offset(self.cell, cell);
        Self {
            cell,
            frame: Frame {
                origin: self.frame.origin - offset,
                ..self.frame
            },
        }
    }
}

//! Numeric types used for coordinates and related quantities.

use euclid::{Point3D, Vector3D};

/// Unit-of-measure type for coordinates in the frame of a cell (more precisely, of the
/// landblock containing the cell). Distances are in meters.
///
/// Two values with this unit are only directly comparable if they belong to cells of the same
/// landblock; otherwise one must first be corrected by the offset between the landblocks.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Cell {}

/// Unit-of-measure type for coordinates relative to an object's own origin and orientation,
/// such as the layout of the spheres making up its collision proxy.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Local {}

/// Scalar type for all continuous coordinates.
pub type FreeCoordinate = f64;

/// Positions within a cell's frame.
pub type FreePoint = Point3D<FreeCoordinate, Cell>;

/// Displacements within a cell's frame.
pub type FreeVector = Vector3D<FreeCoordinate, Cell>;

/// Positions relative to an object's origin.
pub type LocalPoint = Point3D<FreeCoordinate, Local>;

/// Displacements relative to an object's origin.
pub type LocalVector = Vector3D<FreeCoordinate, Local>;

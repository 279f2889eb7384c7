//! `cellphys` resolves the movement of actors made of spheres against the spheres around them,
//! one simulation tick at a time.
//!
//! ## Model
//!
//! * The world is divided into landblocks of [`BLOCK_LENGTH`](physics::BLOCK_LENGTH) meters,
//!   and each landblock into cells identified by a [`CellId`](physics::CellId). Coordinates
//!   are always relative to the landblock of some cell; converting between landblocks is the
//!   job of a [`CellOffsets`](physics::CellOffsets) implementation.
//! * An actor's collision proxy is an [`ActorShape`](physics::ActorShape): one or two
//!   [`Sphere`](math::Sphere)s in the actor's local coordinates, plus how high it may step up
//!   and down.
//! * Each tick, the simulation builds a [`Transition`](physics::Transition) from where the
//!   actor is and where it wants to be, feeds it the nearby obstacle spheres found by its own
//!   broad phase, and commits the result with [`Transition::finish()`].
//!
//! Each obstacle test produces a [`TransitionState`](physics::TransitionState): the move is
//! unobstructed, rejected, adjusted (stepped up or down, landed, clipped), or slid along a
//! surface. Adjustments change the candidate position seen by the following tests.
//!
//! ## Package features
//!
//! * `std` (enabled by default): makes `std` available to the geometry library. The collision
//!   code itself is `no_std` and does not allocate.
//! * `serde`: implements serialization for the geometry types and for
//!   [`ActorShape`](physics::ActorShape) configuration.
//! * `arbitrary`: implements [`arbitrary::Arbitrary`] for geometry types, for fuzzing.
//!
//! ## Logging
//!
//! Collision decisions are logged through the [`log`] facade at trace level, and the
//! forced recovery of a wedged actor at warn level. Nothing is logged every tick at debug level
//! or above. Applications may wish to use [`util::log::standard_filter`].
//!
//! [`Transition::finish()`]: physics::Transition::finish
#![cfg_attr(
    not(feature = "arbitrary"),
    doc = "[`arbitrary::Arbitrary`]: https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html"
)]
#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
#![cfg_attr(
    not(any(test, feature = "arbitrary")),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
// Lenience for tests.
#![cfg_attr(test,
    allow(clippy::float_cmp), // deterministic tests
)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod math;
pub mod physics;
pub mod util;

/// Re-export the version of the `euclid` vector math library we're using.
pub use euclid;

//! This library is an internal component of [`cellphys`],
//! which defines the core geometric types and functions used by the collision resolver.
//! Do not depend on this library; use only [`cellphys`] instead.
//!
//! [`cellphys`]: https://crates.io/crates/cellphys/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
#![warn(clippy::missing_inline_in_public_items)]

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

/// Do not use this module directly; its contents are re-exported from `cellphys`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `cellphys`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;

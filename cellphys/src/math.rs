//! Mathematical utilities and decisions.
//!
//! The geometry types live in the `cellphys-base` library and are re-exported here.

pub use cellphys_base::math::*;

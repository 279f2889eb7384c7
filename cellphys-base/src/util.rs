//! Tools that we could imagine being in the Rust standard library, but aren't.

// -------------------------------------------------------------------------------------------------

mod custom_format;
pub use custom_format::*;

pub mod log;

// -------------------------------------------------------------------------------------------------

/// Check that a type is [`Send`] and [`Sync`].
#[doc(hidden)]
#[expect(clippy::missing_inline_in_public_items)]
pub fn assert_send_sync<T: Send + Sync>() {
    // We don't need to do anything in this function; the call site will fail to compile
    // if the type doesn't meet the bounds.
}

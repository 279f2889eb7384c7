//! Tools that we could imagine being in the Rust standard library, but aren't.

// -------------------------------------------------------------------------------------------------
// Re-exports

#[doc(no_inline)]
pub use manyfmt::{Fmt, Refmt, refmt};

pub use cellphys_base::util::{ConciseDebug, log};
#[doc(hidden)]
pub use cellphys_base::util::assert_send_sync;

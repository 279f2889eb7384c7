//! Logging helpers.
//!
//! This library only emits messages through the [`log`] facade; choosing a logger is up to
//! the application.

/// Provides the recommended log filter for programs which want to exclude the per-sphere
/// details of collision resolution.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every step unless something is wrong. The resolver
/// logs every sphere test at [`log::Level::Trace`], so trace messages from it are dropped
/// while its warnings still pass.
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    !(metadata.level() >= log::Level::Trace && target.starts_with("cellphys::physics"))
}

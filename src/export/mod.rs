//! Frame sinks and file exports.

/// Animated GIF sink.
pub mod gif;
/// PNG snapshots.
pub mod png;
/// Frame sink contract and the in-memory sink.
pub mod sink;

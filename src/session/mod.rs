//! Interactive session policy on top of the pure generator.

/// Swappable three-state intention classifier.
pub mod classifier;
/// Session: validation, classification, history and the session timer.
pub mod controller;
/// Persisted intention history.
pub mod history;

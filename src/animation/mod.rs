//! Frame-driven animation lifecycle.

/// Breathing/dissolve state machine, frame tokens and the sink-driving player.
pub mod driver;

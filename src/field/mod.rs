//! Golden-angle spherical point field.

/// Point generation from digest bytes.
pub mod points;

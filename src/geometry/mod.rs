//! Rotation primitives and the per-ring point projection.

/// Sphere → plane mapping, 4D fold, tilt and perspective.
pub mod project;
/// Explicit coordinate rotations.
pub mod rotate;

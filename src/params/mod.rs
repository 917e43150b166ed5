//! Digest → parameter derivation.

/// Visual parameter bundle and its extractor.
pub mod bundle;
/// Engine feature flags combined with a bundle at generation time.
pub mod features;
/// Fixed byte-offset table.
pub mod offsets;

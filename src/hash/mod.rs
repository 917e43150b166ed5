//! SHA-256 digest of intention text.

/// Fixed 32-byte digest type and derivation.
pub mod digest;

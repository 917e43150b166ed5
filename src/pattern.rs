//! The generated pattern: everything derived from one intention.

use crate::{
    field::points::{FieldPoint, build_points},
    foundation::error::{MandalaError, MandalaResult},
    hash::digest::Digest,
    params::{bundle::ParameterBundle, features::EngineFeatures},
};

/// Text, digest, derived parameters and point field for one intention.
///
/// Built once by [`Pattern::generate`] and read-only afterwards; animation state lives in the
/// controller, never here.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Pattern {
    pub text: String,
    pub digest: Digest,
    pub params: ParameterBundle,
    pub points: Vec<FieldPoint>,
    pub features: EngineFeatures,
}

impl Pattern {
    /// Hash `text` and derive the full pattern.
    ///
    /// The text is hashed exactly as given (whitespace and case included). Empty or
    /// whitespace-only input is rejected with [`MandalaError::EmptyInput`].
    #[tracing::instrument(skip(text, features), fields(bytes = text.len()))]
    pub fn generate(text: &str, features: EngineFeatures) -> MandalaResult<Self> {
        if text.trim().is_empty() {
            return Err(MandalaError::EmptyInput);
        }
        let pattern = Self::from_digest(text, Digest::of_text(text), features);
        tracing::debug!(digest = %pattern.digest, "generated pattern");
        Ok(pattern)
    }

    /// Derive a pattern from an already computed digest.
    pub fn from_digest(text: impl Into<String>, digest: Digest, features: EngineFeatures) -> Self {
        let params = ParameterBundle::extract(&digest);
        let points = build_points(&digest, params.point_count);
        Self {
            text: text.into(),
            digest,
            params,
            points,
            features,
        }
    }

    /// Same text and digest with different engine switches.
    pub fn with_features(mut self, features: EngineFeatures) -> Self {
        self.features = features;
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/pattern.rs"]
mod tests;

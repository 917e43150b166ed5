//! JSON configuration with defaults for every section.

use std::path::{Path, PathBuf};

use crate::{
    animation::driver::AnimationConfig,
    audio::params::AudioConfig,
    foundation::{
        core::Fps,
        error::{MandalaError, MandalaResult},
    },
    params::features::EngineFeatures,
    render::scene::SceneConfig,
    session::classifier::KeywordClassifier,
};

/// Top-level configuration. Every field has a default, so `{}` is a valid file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MandalaConfig {
    pub fps: Fps,
    pub scene: SceneConfig,
    pub features: EngineFeatures,
    pub animation: AnimationConfig,
    pub audio: AudioConfig,
    pub classifier: KeywordClassifier,
    /// Font file for the intention overlay. Without one the overlay is not rasterized.
    pub overlay_font: Option<PathBuf>,
    /// History file; `None` falls back to the per-user data directory.
    pub history_path: Option<PathBuf>,
    /// Breathing time before the session dissolves.
    pub session_secs: f64,
    /// Maximum words accepted by a session.
    pub word_limit: usize,
}

impl Default for MandalaConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 60, den: 1 },
            scene: SceneConfig::default(),
            features: EngineFeatures::default(),
            animation: AnimationConfig::default(),
            audio: AudioConfig::default(),
            classifier: KeywordClassifier::default(),
            overlay_font: None,
            history_path: None,
            session_secs: 60.0,
            word_limit: 50,
        }
    }
}

impl MandalaConfig {
    pub fn load(path: &Path) -> MandalaResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MandalaError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> MandalaResult<Self> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| MandalaError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> MandalaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MandalaError::serde(e.to_string()))
    }

    pub fn validate(&self) -> MandalaResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        self.scene.canvas.to_u16().map_err(|e| MandalaError::validation(e.to_string()))?;
        if self.scene.wrap_column == 0 {
            return Err(MandalaError::validation("scene wrap_column must be > 0"));
        }
        if !self.scene.overlay_size.is_finite() || self.scene.overlay_size <= 0.0 {
            return Err(MandalaError::validation(
                "scene overlay_size must be finite and > 0",
            ));
        }
        if !self.session_secs.is_finite() || self.session_secs <= 0.0 {
            return Err(MandalaError::validation(
                "session_secs must be finite and > 0",
            ));
        }
        if self.word_limit == 0 {
            return Err(MandalaError::validation("word_limit must be > 0"));
        }
        self.animation.validate()?;
        self.audio.validate()
    }

    /// Session length in animation frames.
    pub fn session_frames(&self) -> u64 {
        self.fps.secs_to_frames_floor(self.session_secs).max(1)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

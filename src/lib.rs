//! Deterministic intention → mandala generator.
//!
//! A line of text is hashed with SHA-256 and every visual and audio parameter is read from
//! fixed digest offsets, so the same intention always produces the same pattern:
//!
//! - [`Pattern::generate`] hashes the text and derives a [`ParameterBundle`] and point field
//! - [`render_frame`] turns a pattern and per-frame inputs into a [`FrameScene`]
//! - [`CpuRasterizer`] rasterizes scenes into a trail buffer
//! - [`AnimationController`] runs the breathing / dissolve lifecycle; [`Player`] streams it
//!   into a [`FrameSink`]
//! - [`audio::synth::synthesize`] renders the matching audio texture
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod audio;
/// JSON configuration.
pub mod config;
pub mod export;
pub mod field;
pub mod geometry;
pub mod hash;
pub mod params;
/// The generated pattern.
pub mod pattern;
pub mod render;
pub mod session;

pub use crate::foundation::core::{BezPath, Canvas, Fps, Point, Rgba8, Vec2};
pub use crate::foundation::error::{MandalaError, MandalaResult};

pub use crate::animation::driver::{
    AnimationConfig, AnimationController, DissolveConfig, FrameRequest, FrameSource, Pacing,
    Phase, PlaybackPlan, PlaybackStats, Player, play,
};
pub use crate::audio::params::{AudioConfig, AudioParams};
pub use crate::config::MandalaConfig;
pub use crate::export::gif::GifSink;
pub use crate::export::png::save_png;
pub use crate::export::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::field::points::FieldPoint;
pub use crate::hash::digest::Digest;
pub use crate::params::bundle::ParameterBundle;
pub use crate::params::features::{EngineFeatures, Style};
pub use crate::pattern::Pattern;
pub use crate::render::cpu::{CpuRasterizer, FrameRGBA};
pub use crate::render::scene::{FrameInput, FrameScene, SceneConfig, render_frame};
pub use crate::render::text::OverlayFont;
pub use crate::session::classifier::{IntentionClassifier, KeywordClassifier, Verdict};
pub use crate::session::controller::Session;
pub use crate::session::history::History;

//! Audio texture derived from the digest bytes the visuals never read.

/// Tone/rhythm parameters and hash-independent audio configuration.
pub mod params;
/// Burst scheduling, PCM synthesis and WAV / raw f32 writers.
pub mod synth;

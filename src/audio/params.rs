use crate::{
    foundation::{
        error::{MandalaError, MandalaResult},
        math::{be_u16, unit_half_open},
    },
    hash::digest::Digest,
    params::offsets,
};

/// Consonant burst intervals relative to the root: fifth, fourth, major third, octave,
/// minor third.
pub const INTERVALS: [f64; 5] = [3.0 / 2.0, 4.0 / 3.0, 5.0 / 4.0, 2.0, 6.0 / 5.0];

pub const MIN_ROOT_HZ: f64 = 110.0;
pub const ROOT_SPAN_HZ: f64 = 330.0;
pub const MAX_RHYTHM_OFFSET_MS: f64 = 750.0;

/// Tone and rhythm parameters read from digest bytes 26-31.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioParams {
    /// In `[110, 440)`.
    pub root_hz: f64,
    /// One of [`INTERVALS`].
    pub interval: f64,
    /// Start offsets of the two burst voices, each in `[0, 750)`.
    pub rhythm_offsets_ms: [f64; 2],
    /// Harmonic mix in `[0, 1)`.
    pub brightness: f64,
}

impl AudioParams {
    pub fn extract(digest: &Digest) -> Self {
        let b = |off: usize| digest.byte(off);
        let root = be_u16(b(offsets::AUDIO_ROOT[0]), b(offsets::AUDIO_ROOT[1]));
        Self {
            root_hz: MIN_ROOT_HZ + f64::from(root) / 65_536.0 * ROOT_SPAN_HZ,
            interval: INTERVALS[usize::from(b(offsets::AUDIO_INTERVAL)) % INTERVALS.len()],
            rhythm_offsets_ms: offsets::AUDIO_RHYTHM
                .map(|off| unit_half_open(b(off)) * MAX_RHYTHM_OFFSET_MS),
            brightness: unit_half_open(b(offsets::AUDIO_BRIGHTNESS)),
        }
    }

    pub fn burst_hz(&self) -> [f64; 2] {
        [self.root_hz, self.root_hz * self.interval]
    }
}

/// Hash-independent audio constants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Left/right drone offset producing the binaural beat.
    pub entrainment_hz: f64,
    pub burst_period_secs: f64,
    pub burst_secs: f64,
    pub sample_rate: u32,
    /// Master gain applied before clamping.
    pub gain: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            entrainment_hz: 7.83,
            burst_period_secs: 4.0,
            burst_secs: 1.5,
            sample_rate: 48_000,
            gain: 0.3,
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> MandalaResult<()> {
        if self.sample_rate == 0 {
            return Err(MandalaError::validation("audio sample_rate must be > 0"));
        }
        if !self.entrainment_hz.is_finite() || self.entrainment_hz < 0.0 {
            return Err(MandalaError::validation(
                "audio entrainment_hz must be finite and >= 0",
            ));
        }
        if !self.burst_period_secs.is_finite() || self.burst_period_secs <= 0.0 {
            return Err(MandalaError::validation(
                "audio burst_period_secs must be finite and > 0",
            ));
        }
        if !self.burst_secs.is_finite() || self.burst_secs <= 0.0 {
            return Err(MandalaError::validation(
                "audio burst_secs must be finite and > 0",
            ));
        }
        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(MandalaError::validation(
                "audio gain must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/params.rs"]
mod tests;

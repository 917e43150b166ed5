use std::f64::consts::{PI, TAU};

use crate::{
    foundation::math::{lerp, unit_half_open},
    hash::digest::Digest,
    params::offsets,
};

pub const PRIMARY_SYMMETRIES: [u32; 4] = [6, 8, 12, 16];
pub const SECONDARY_SYMMETRIES: [u32; 4] = [3, 5, 7, 9];

/// Consonant `a:b` frequency ratios for the Lissajous overlay.
pub const LISSAJOUS_RATIOS: [(u32, u32); 6] = [(1, 2), (2, 3), (3, 4), (3, 2), (4, 3), (5, 4)];

/// Upper bound for the XW/YW/ZW fold speeds in radians per frame. Faster folding reads as
/// disorienting; tune here rather than in the extractor formula.
pub const MAX_FOLD_SPEED: f64 = 0.003;

/// Sphere-to-plane mapping selected by one digest byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    Orthographic,
    Stereographic,
    Cylindrical,
}

impl ProjectionKind {
    pub fn from_index(i: u8) -> Self {
        match i % 3 {
            0 => Self::Orthographic,
            1 => Self::Stereographic,
            _ => Self::Cylindrical,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LissajousSpec {
    pub a: u32,
    pub b: u32,
    pub delta: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TiltAxis {
    /// Peak tilt in radians; kept well below `π/2` so the form never flips.
    pub amplitude: f64,
    pub phase: f64,
    /// Phase advance per frame.
    pub speed: f64,
}

/// Every visual parameter derived from a [`Digest`].
///
/// Each field is a pure function of the digest and the fixed table in
/// [`offsets`](crate::params::offsets). Nothing here depends on wall-clock time or prior state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterBundle {
    pub point_count: usize,
    pub ring_count: usize,
    pub primary_symmetry: u32,
    pub secondary_symmetry: u32,
    pub base_hue: f64,
    pub complexity: u32,

    pub pulse_amplitude: f64,
    pub pulse_speed: f64,
    pub spin_speed: f64,
    pub tilt: [TiltAxis; 2],
    pub hue_drift: f64,

    pub connection_skip: usize,
    pub projection: ProjectionKind,
    pub lissajous: LissajousSpec,
    /// XW, YW, ZW plane rotation speeds.
    pub fold_speeds: [f64; 3],
    pub w_scale: f64,

    pub evolve_skip_speed: f64,
    pub evolve_symmetry_speed: f64,
}

impl ParameterBundle {
    #[tracing::instrument(skip(digest), fields(digest = %digest))]
    pub fn extract(digest: &Digest) -> Self {
        let b = |off: usize| digest.byte(off);
        let range = |off: usize, lo: f64, hi: f64| lerp(lo, hi, unit_half_open(b(off)));

        let tilt_axis = |i: usize| TiltAxis {
            amplitude: range(offsets::TILT_AMPLITUDE[i], 0.1, 0.35),
            phase: range(offsets::TILT_PHASE[i], 0.0, TAU),
            speed: range(offsets::TILT_SPEED[i], 0.002, 0.008),
        };

        let ratio = usize::from(b(offsets::LISSAJOUS_RATIO)) % LISSAJOUS_RATIOS.len();
        let (la, lb) = LISSAJOUS_RATIOS[ratio];

        let bundle = Self {
            point_count: 8 + usize::from(b(offsets::POINT_COUNT) % 8),
            ring_count: 3 + usize::from(b(offsets::RING_COUNT) % 5),
            primary_symmetry: PRIMARY_SYMMETRIES[usize::from(b(offsets::PRIMARY_SYMMETRY) % 4)],
            secondary_symmetry: SECONDARY_SYMMETRIES
                [usize::from(b(offsets::SECONDARY_SYMMETRY) % 4)],
            base_hue: range(offsets::BASE_HUE, 0.0, 360.0),
            complexity: 1 + u32::from(b(offsets::COMPLEXITY) % 3),

            pulse_amplitude: range(offsets::PULSE_AMPLITUDE, 0.05, 0.20),
            pulse_speed: range(offsets::PULSE_SPEED, 0.015, 0.045),
            spin_speed: range(offsets::SPIN_SPEED, 0.001, 0.005),
            tilt: [tilt_axis(0), tilt_axis(1)],
            hue_drift: range(offsets::HUE_DRIFT, 0.1, 0.5),

            connection_skip: 1 + usize::from(b(offsets::CONNECTION_SKIP) % 7),
            projection: ProjectionKind::from_index(b(offsets::PROJECTION)),
            lissajous: LissajousSpec {
                a: la,
                b: lb,
                delta: range(offsets::LISSAJOUS_DELTA, 0.0, PI),
            },
            fold_speeds: offsets::FOLD_SPEED
                .map(|off| range(off, 0.0005, MAX_FOLD_SPEED).min(MAX_FOLD_SPEED)),
            w_scale: range(offsets::W_SCALE, 0.3, 0.8),

            evolve_skip_speed: range(offsets::EVOLVE_SKIP_SPEED, 0.02, 0.08),
            evolve_symmetry_speed: range(offsets::EVOLVE_SYMMETRY_SPEED, 0.02, 0.08),
        };
        tracing::debug!(
            points = bundle.point_count,
            rings = bundle.ring_count,
            symmetry = bundle.primary_symmetry,
            "extracted parameter bundle"
        );
        bundle
    }

    /// Connection skip for the evolving style: a slow sinusoid over `time`, always in `[1, 7]`.
    pub fn evolving_skip(&self, time: f64) -> usize {
        let u = ((time * self.evolve_skip_speed).sin() + 1.0) / 2.0;
        (1 + (u * 7.0).floor() as usize).clamp(1, 7)
    }

    /// Secondary symmetry for the evolving style, always one of [`SECONDARY_SYMMETRIES`].
    pub fn evolving_secondary_symmetry(&self, time: f64) -> u32 {
        let u = ((time * self.evolve_symmetry_speed).sin() + 1.0) / 2.0;
        let idx = ((u * 4.0).floor() as usize).min(SECONDARY_SYMMETRIES.len() - 1);
        SECONDARY_SYMMETRIES[idx]
    }

    /// Two-harmonic breathing waveform.
    pub fn pulse(&self, time: f64) -> f64 {
        1.0 + time.sin() * self.pulse_amplitude + (1.6 * time).sin() * 0.2 * self.pulse_amplitude
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/bundle.rs"]
mod tests;

//! Fixed digest byte offsets read by the parameter extractors.
//!
//! Offsets are scattered rather than consumed sequentially so unrelated properties do not
//! move together. Audio offsets must stay disjoint from visual offsets.

pub const POINT_COUNT: usize = 0;
pub const RING_COUNT: usize = 1;
pub const PRIMARY_SYMMETRY: usize = 2;
pub const BASE_HUE: usize = 3;
pub const SECONDARY_SYMMETRY: usize = 4;
pub const COMPLEXITY: usize = 5;
pub const PULSE_AMPLITUDE: usize = 6;
pub const PULSE_SPEED: usize = 7;
pub const SPIN_SPEED: usize = 8;
pub const TILT_AMPLITUDE: [usize; 2] = [9, 10];
pub const TILT_PHASE: [usize; 2] = [11, 12];
pub const TILT_SPEED: [usize; 2] = [13, 14];
pub const CONNECTION_SKIP: usize = 15;
pub const PROJECTION: usize = 16;
pub const LISSAJOUS_RATIO: usize = 17;
pub const LISSAJOUS_DELTA: usize = 18;
pub const HUE_DRIFT: usize = 19;
pub const FOLD_SPEED: [usize; 3] = [20, 21, 22];
pub const W_SCALE: usize = 23;
pub const EVOLVE_SKIP_SPEED: usize = 24;
pub const EVOLVE_SYMMETRY_SPEED: usize = 25;

pub const AUDIO_ROOT: [usize; 2] = [26, 27];
pub const AUDIO_INTERVAL: usize = 28;
pub const AUDIO_RHYTHM: [usize; 2] = [29, 30];
pub const AUDIO_BRIGHTNESS: usize = 31;

/// Every offset read by [`ParameterBundle::extract`](crate::ParameterBundle::extract).
pub const VISUAL: [usize; 26] = [
    POINT_COUNT,
    RING_COUNT,
    PRIMARY_SYMMETRY,
    BASE_HUE,
    SECONDARY_SYMMETRY,
    COMPLEXITY,
    PULSE_AMPLITUDE,
    PULSE_SPEED,
    SPIN_SPEED,
    TILT_AMPLITUDE[0],
    TILT_AMPLITUDE[1],
    TILT_PHASE[0],
    TILT_PHASE[1],
    TILT_SPEED[0],
    TILT_SPEED[1],
    CONNECTION_SKIP,
    PROJECTION,
    LISSAJOUS_RATIO,
    LISSAJOUS_DELTA,
    HUE_DRIFT,
    FOLD_SPEED[0],
    FOLD_SPEED[1],
    FOLD_SPEED[2],
    W_SCALE,
    EVOLVE_SKIP_SPEED,
    EVOLVE_SYMMETRY_SPEED,
];

/// Every offset read by [`AudioParams::extract`](crate::AudioParams::extract).
pub const AUDIO: [usize; 6] = [
    AUDIO_ROOT[0],
    AUDIO_ROOT[1],
    AUDIO_INTERVAL,
    AUDIO_RHYTHM[0],
    AUDIO_RHYTHM[1],
    AUDIO_BRIGHTNESS,
];

#[cfg(test)]
#[path = "../../tests/unit/params/offsets.rs"]
mod tests;

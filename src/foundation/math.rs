//! Small numeric helpers shared by the derivation and raster code.

/// Golden angle in degrees (`360 · (2 − φ)`).
pub const GOLDEN_ANGLE_DEG: f64 = 137.507_764_050_037_85;

/// Maps a byte onto `[0, 1)`; used for half-open parameter ranges.
pub(crate) fn unit_half_open(b: u8) -> f64 {
    f64::from(b) / 256.0
}

/// Maps a byte onto `[0, 1]`; used for closed parameter ranges.
pub(crate) fn unit_closed(b: u8) -> f64 {
    f64::from(b) / 255.0
}

/// Big-endian pair of bytes as a 16-bit value.
pub(crate) fn be_u16(hi: u8, lo: u8) -> u16 {
    (u16::from(hi) << 8) | u16::from(lo)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

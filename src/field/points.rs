use crate::{
    foundation::error::MandalaResult,
    foundation::math::{GOLDEN_ANGLE_DEG, be_u16, lerp, unit_closed},
    hash::digest::Digest,
};

/// Bytes consumed per point, starting at `(i * 5) mod 32`.
pub const BYTES_PER_POINT: usize = 5;

pub const MIN_RADIUS: f64 = 0.5;
pub const MAX_RADIUS: f64 = 1.4;

/// One point of the spherical field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldPoint {
    /// Degrees in `[0, 360)`.
    pub longitude: f64,
    /// Degrees in `[-90, 90]`.
    pub latitude: f64,
    /// In `[0.5, 1.4]`.
    pub radius: f64,
    /// Hue offset in degrees, `[-30, 30]`.
    pub color_shift: f64,
    /// Dot size multiplier, `[0.7, 1.3]`.
    pub size_variance: f64,
    /// Halo strength, `[0.4, 1.0]`.
    pub glow: f64,
}

impl FieldPoint {
    /// Polar angle (colatitude) in radians, `[0, π]`.
    pub fn polar_rad(&self) -> f64 {
        (90.0 - self.latitude).to_radians()
    }

    /// Azimuth in radians, `[0, 2π)`.
    pub fn azimuth_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

/// Build the ordered point field for `digest`.
///
/// Index order is significant: it drives the golden-angle offset here and the
/// `(i + skip) mod n` connector edges in the renderer.
pub fn build_points(digest: &Digest, count: usize) -> Vec<FieldPoint> {
    (0..count).map(|i| point_at(digest, i)).collect()
}

/// Same as [`build_points`] for a raw byte slice, which must be exactly 32 bytes.
pub fn build_points_from_bytes(bytes: &[u8], count: usize) -> MandalaResult<Vec<FieldPoint>> {
    let digest = Digest::try_from(bytes)?;
    Ok(build_points(&digest, count))
}

fn point_at(digest: &Digest, i: usize) -> FieldPoint {
    let base = (i * BYTES_PER_POINT) % crate::hash::digest::DIGEST_LEN;
    let [b0, b1, b2, b3, b4] = std::array::from_fn(|k| digest.byte(base + k));

    let lon_raw = f64::from(be_u16(b0, b1)) / 65_536.0 * 360.0;
    let longitude = (lon_raw + i as f64 * GOLDEN_ANGLE_DEG).rem_euclid(360.0);
    let latitude = f64::from(be_u16(b2, b3)) / f64::from(u16::MAX) * 180.0 - 90.0;
    let radius = lerp(MIN_RADIUS, MAX_RADIUS, unit_closed(b4));

    FieldPoint {
        longitude,
        latitude,
        radius,
        color_shift: lerp(-30.0, 30.0, unit_closed(b0 ^ b3)),
        size_variance: lerp(0.7, 1.3, unit_closed(b1 ^ b4)),
        glow: lerp(0.4, 1.0, unit_closed(b2 ^ b0)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/points.rs"]
mod tests;

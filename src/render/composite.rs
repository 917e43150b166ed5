//! Premultiplied RGBA8 buffer operations for the persistent trail.

use crate::foundation::{
    error::{MandalaError, MandalaResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Source-over of `src` onto `dst`, with `src` additionally scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> MandalaResult<()> {
    check_rgba_len(dst)?;
    if dst.len() != src.len() {
        return Err(MandalaError::surface(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Paint opaque black over the buffer at `opacity`. Near 1.0 this clears the trail; lower
/// values let earlier frames fade out gradually.
pub fn veil_in_place(buf: &mut [u8], opacity: f32) -> MandalaResult<()> {
    check_rgba_len(buf)?;
    let black = [0, 0, 0, 255];
    for px in buf.chunks_exact_mut(4) {
        let out = over([px[0], px[1], px[2], px[3]], black, opacity);
        px.copy_from_slice(&out);
    }
    Ok(())
}

pub fn fill_in_place(buf: &mut [u8], premul: PremulRgba8) -> MandalaResult<()> {
    check_rgba_len(buf)?;
    for px in buf.chunks_exact_mut(4) {
        px.copy_from_slice(&premul);
    }
    Ok(())
}

fn check_rgba_len(buf: &[u8]) -> MandalaResult<()> {
    if !buf.len().is_multiple_of(4) {
        return Err(MandalaError::surface(format!(
            "rgba8 buffer length {} is not a multiple of 4",
            buf.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

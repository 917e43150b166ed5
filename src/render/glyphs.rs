//! Built-in seven-segment hex font for the digest signature.
//!
//! The signature must rasterize without any system font, so it is drawn as stroked line
//! segments. Each of the 16 hex digits has a distinct segment mask.

use crate::foundation::core::{BezPath, Point};

/// Cell width relative to the glyph height.
pub const CELL_ASPECT: f64 = 0.6;
/// Horizontal advance relative to the glyph height.
pub const ADVANCE: f64 = 0.9;
/// Line pitch relative to the glyph height.
pub const LINE_PITCH: f64 = 1.5;

// Segment bits: a=top, b=upper right, c=lower right, d=bottom, e=lower left, f=upper left,
// g=middle.
const MASKS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, // 0-7
    0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, // 8-f
];

// Endpoints in unit cell coordinates (x in [0, 1] scaled by CELL_ASPECT, y down).
const SEGMENTS: [((f64, f64), (f64, f64)); 7] = [
    ((0.0, 0.0), (1.0, 0.0)),
    ((1.0, 0.0), (1.0, 0.5)),
    ((1.0, 0.5), (1.0, 1.0)),
    ((0.0, 1.0), (1.0, 1.0)),
    ((0.0, 0.5), (0.0, 1.0)),
    ((0.0, 0.0), (0.0, 0.5)),
    ((0.0, 0.5), (1.0, 0.5)),
];

/// Segment mask for a hex digit (either case), `None` for anything else.
pub fn segment_mask(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| MASKS[d as usize])
}

/// Inverse of [`segment_mask`]; always yields a lowercase digit.
pub fn char_for_mask(mask: u8) -> Option<char> {
    MASKS
        .iter()
        .position(|m| *m == mask)
        .and_then(|i| char::from_digit(i as u32, 16))
}

/// Open line segments for `c` with its top-left corner at `origin` and glyph height `size`.
pub fn glyph_path(c: char, origin: Point, size: f64) -> Option<BezPath> {
    let mask = segment_mask(c)?;
    let w = size * CELL_ASPECT;
    let mut path = BezPath::new();
    for (bit, ((x0, y0), (x1, y1))) in SEGMENTS.iter().enumerate() {
        if mask & (1 << bit) == 0 {
            continue;
        }
        path.move_to((origin.x + x0 * w, origin.y + y0 * size));
        path.line_to((origin.x + x1 * w, origin.y + y1 * size));
    }
    Some(path)
}

/// Width of a fixed-width line of `chars` glyphs.
pub fn line_width(chars: usize, size: f64) -> f64 {
    if chars == 0 {
        return 0.0;
    }
    (chars - 1) as f64 * ADVANCE * size + CELL_ASPECT * size
}

/// One path holding every glyph of a multi-line fixed-width text block.
pub fn block_path(lines: &[&str], origin: Point, size: f64) -> BezPath {
    let mut out = BezPath::new();
    for (row, line) in lines.iter().enumerate() {
        let y = origin.y + row as f64 * LINE_PITCH * size;
        for (col, c) in line.chars().enumerate() {
            let x = origin.x + col as f64 * ADVANCE * size;
            if let Some(glyph) = glyph_path(c, Point::new(x, y), size) {
                out.extend(glyph.elements().iter().copied());
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyphs.rs"]
mod tests;

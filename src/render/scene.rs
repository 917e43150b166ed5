use std::f64::consts::TAU;

use crate::{
    field::points::MAX_RADIUS,
    foundation::core::{BezPath, Canvas, Point, Rgba8, Vec2},
    geometry::{
        project::{ProjectionContext, RotationState, project},
        rotate::rotate_about,
    },
    params::features::Style,
    pattern::Pattern,
    render::{
        glyphs,
        text::{TEXT_LINE_PITCH, wrap_words},
    },
};

/// Samples along the Lissajous overlay.
pub const LISSAJOUS_SAMPLES: usize = 240;
/// Hex characters per signature line.
pub const SIGNATURE_LINE_CHARS: usize = 16;
/// Signature lines; `4 × 16` covers the full 64-character digest.
pub const SIGNATURE_LINES: usize = 4;

/// One backend-agnostic drawing command. Coordinates are canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Opaque black painted over the previous frame at `opacity`, leaving a motion trail.
    Veil { opacity: f64 },
    /// Overwrite the whole surface.
    Fill { color: Rgba8 },
    /// Filled dot with a soft halo whose reach and strength scale with `glow`.
    Dot {
        center: Point,
        radius: f64,
        color: Rgba8,
        glow: f64,
    },
    /// Stroked open path.
    Stroke {
        path: BezPath,
        width: f64,
        color: Rgba8,
    },
    /// Full lowercase hex digest drawn with the built-in segment font.
    Signature {
        hex: String,
        origin: Point,
        size: f64,
        color: Rgba8,
    },
    /// Pre-wrapped intention text.
    Text {
        lines: Vec<String>,
        origin: Point,
        size: f64,
        color: Rgba8,
    },
}

/// Drawing commands for one frame, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameScene {
    pub canvas: Canvas,
    pub ops: Vec<DrawOp>,
}

impl FrameScene {
    /// The terminal dissolve frame: solid black.
    pub fn black(canvas: Canvas) -> Self {
        Self {
            canvas,
            ops: vec![DrawOp::Fill {
                color: Rgba8::BLACK,
            }],
        }
    }

    /// Hex digest carried by the signature overlay, if present.
    pub fn signature_hex(&self) -> Option<&str> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Signature { hex, .. } => Some(hex.as_str()),
            _ => None,
        })
    }

    /// Whether this scene is the solid black terminal frame.
    pub fn is_black(&self) -> bool {
        matches!(
            self.ops.as_slice(),
            [DrawOp::Fill { color }] if *color == Rgba8::BLACK
        )
    }
}

/// Split a hex digest into the fixed-width signature rows.
pub fn signature_lines(hex: &str) -> Vec<&str> {
    let mut rows = Vec::with_capacity(SIGNATURE_LINES);
    let mut rest = hex;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(SIGNATURE_LINE_CHARS)
            .map_or(rest.len(), |(i, _)| i);
        let (row, tail) = rest.split_at(cut);
        rows.push(row);
        rest = tail;
    }
    rows
}

/// Per-frame animation inputs supplied by the driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub time: f64,
    pub rotation: RotationState,
    pub pulse: f64,
    /// Uniform composition scale, 1.0 while breathing and shrinking during dissolve.
    pub scale: f64,
    pub veil_opacity: f64,
}

impl FrameInput {
    /// Inputs for time zero with no rotation.
    pub fn at_rest(veil_opacity: f64) -> Self {
        Self {
            time: 0.0,
            rotation: RotationState::default(),
            pulse: 1.0,
            scale: 1.0,
            veil_opacity,
        }
    }
}

/// Static presentation settings for [`render_frame`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub canvas: Canvas,
    pub signature: bool,
    pub intention_overlay: bool,
    /// Characters per line of the intention overlay.
    pub wrap_column: usize,
    /// Overlay glyph height as a fraction of the canvas short side.
    pub overlay_size: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::square(800),
            signature: true,
            intention_overlay: true,
            wrap_column: 32,
            overlay_size: 0.018,
        }
    }
}

/// Build one frame's drawing commands. Pure: the same inputs always give the same scene.
#[tracing::instrument(level = "trace", skip_all, fields(time = input.time))]
pub fn render_frame(pattern: &Pattern, input: &FrameInput, config: &SceneConfig) -> FrameScene {
    let canvas = config.canvas;
    let mut ops = vec![DrawOp::Veil {
        opacity: input.veil_opacity.clamp(0.0, 1.0),
    }];

    push_rings(&mut ops, pattern, input, canvas);
    if pattern.features.lissajous {
        push_lissajous(&mut ops, pattern, input, canvas);
    }
    push_center_marker(&mut ops, pattern, input, canvas);
    push_overlays(&mut ops, pattern, config);

    FrameScene { canvas, ops }
}

fn ring_t(ring: usize, ring_count: usize) -> f64 {
    if ring_count < 2 {
        1.0
    } else {
        ring as f64 / (ring_count - 1) as f64
    }
}

fn push_rings(ops: &mut Vec<DrawOp>, pattern: &Pattern, input: &FrameInput, canvas: Canvas) {
    let params = &pattern.params;
    let center = canvas.center();
    let base_radius = canvas.inner_radius() * input.scale.max(0.0);
    let n_rings = params.ring_count;
    let n_points = pattern.points.len();
    if n_points == 0 || base_radius <= 0.0 {
        return;
    }

    let (skip, secondary) = match pattern.features.style {
        Style::Fixed => (params.connection_skip, params.secondary_symmetry),
        Style::Evolving => (
            params.evolving_skip(input.time),
            params.evolving_secondary_symmetry(input.time),
        ),
    };
    let mut symmetries = vec![(params.primary_symmetry, 1.0)];
    if params.complexity >= 2 {
        symmetries.push((secondary, 0.6));
    }

    let ctx = ProjectionContext {
        params,
        features: &pattern.features,
        rotation: &input.rotation,
        ring_count: n_rings,
    };
    let line_width = (canvas.inner_radius() * 0.002).max(0.5);

    for ring in 0..n_rings {
        let t = ring_t(ring, n_rings);
        let ring_radius = base_radius * (n_rings - ring) as f64 / n_rings as f64 * 0.9;
        let unit = ring_radius * input.pulse / MAX_RADIUS;
        let alpha = 0.35 + 0.65 * t;
        let hue = (params.base_hue
            + ring as f64 * (360.0 / n_rings as f64) * 0.5
            + input.rotation.hue)
            .rem_euclid(360.0);
        let pull = 0.2 + 0.3 * t;

        let projected: Vec<_> = pattern
            .points
            .iter()
            .map(|p| project(p, ring, &ctx))
            .collect();

        for &(copies, weight) in &symmetries {
            let copies = copies.max(1);
            for copy in 0..copies {
                let angle = copy as f64 * TAU / f64::from(copies);
                let place = |local: Vec2| rotate_about(center + local * unit, center, angle);
                let positions: Vec<Point> = projected.iter().map(|p| place(p.pos)).collect();

                for (i, from) in positions.iter().enumerate() {
                    let to = positions[(i + skip) % n_points];
                    let mid = from.midpoint(to);
                    let ctrl = mid + (center - mid) * pull;
                    let mut path = BezPath::new();
                    path.move_to(*from);
                    path.quad_to(ctrl, to);
                    ops.push(DrawOp::Stroke {
                        path,
                        width: line_width * projected[i].scale,
                        color: Rgba8::from_hsla(hue, 0.7, 0.5, alpha * 0.45 * weight),
                    });
                }

                for ((point, proj), pos) in pattern.points.iter().zip(&projected).zip(&positions) {
                    let depth = ((proj.depth / MAX_RADIUS + 1.0) / 2.0).clamp(0.0, 1.0);
                    let radius = canvas.inner_radius()
                        * 0.008
                        * input.scale
                        * point.size_variance
                        * input.pulse
                        * proj.scale
                        * (0.6 + 0.4 * t)
                        * (0.7 + 0.3 * depth);
                    ops.push(DrawOp::Dot {
                        center: *pos,
                        radius,
                        color: Rgba8::from_hsla(
                            hue + point.color_shift,
                            0.8,
                            0.6,
                            alpha * weight,
                        ),
                        glow: point.glow * (0.5 + 0.5 * t),
                    });
                }
            }
        }
    }
}

fn push_lissajous(ops: &mut Vec<DrawOp>, pattern: &Pattern, input: &FrameInput, canvas: Canvas) {
    let curve = pattern.params.lissajous;
    let delta = match pattern.features.style {
        Style::Fixed => curve.delta,
        Style::Evolving => curve.delta + input.time * 0.1,
    };
    let center = canvas.center();
    let extent = canvas.inner_radius() * 0.35 * input.scale * input.pulse;
    let (a, b) = (f64::from(curve.a), f64::from(curve.b));

    let mut path = BezPath::new();
    for i in 0..=LISSAJOUS_SAMPLES {
        let s = i as f64 / LISSAJOUS_SAMPLES as f64 * TAU;
        let p = center + Vec2::new((a * s + delta).sin(), (b * s).sin()) * extent;
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    ops.push(DrawOp::Stroke {
        path,
        width: (canvas.inner_radius() * 0.0025).max(0.5),
        color: Rgba8::from_hsla(
            pattern.params.base_hue + 180.0 + input.rotation.hue,
            0.6,
            0.7,
            0.35,
        ),
    });
}

fn push_center_marker(
    ops: &mut Vec<DrawOp>,
    pattern: &Pattern,
    input: &FrameInput,
    canvas: Canvas,
) {
    ops.push(DrawOp::Dot {
        center: canvas.center(),
        radius: canvas.inner_radius() * 0.025 * input.scale * input.pulse,
        color: Rgba8::from_hsla(pattern.params.base_hue + input.rotation.hue, 0.3, 0.9, 0.9),
        glow: 1.0,
    });
}

fn push_overlays(ops: &mut Vec<DrawOp>, pattern: &Pattern, config: &SceneConfig) {
    let canvas = config.canvas;
    let short = f64::from(canvas.width.min(canvas.height));
    let size = (short * config.overlay_size).max(4.0);
    let margin = size * 1.5;

    if config.signature {
        let block_w = glyphs::line_width(SIGNATURE_LINE_CHARS, size);
        let block_h = (SIGNATURE_LINES - 1) as f64 * glyphs::LINE_PITCH * size + size;
        ops.push(DrawOp::Signature {
            hex: pattern.digest.to_hex(),
            origin: Point::new(
                f64::from(canvas.width) - margin - block_w,
                f64::from(canvas.height) - margin - block_h,
            ),
            size,
            color: Rgba8::opaque(200, 200, 200).with_alpha(0.8),
        });
    }

    if config.intention_overlay {
        let lines = wrap_words(&pattern.text, config.wrap_column);
        if !lines.is_empty() {
            let block_h = lines.len() as f64 * size * TEXT_LINE_PITCH;
            ops.push(DrawOp::Text {
                origin: Point::new(margin, f64::from(canvas.height) - margin - block_h),
                lines,
                size,
                color: Rgba8::opaque(230, 230, 230).with_alpha(0.85),
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;

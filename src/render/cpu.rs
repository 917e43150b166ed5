use crate::{
    foundation::{
        core::{BezPath, Canvas, Point, Rgba8},
        error::{MandalaError, MandalaResult},
    },
    render::{
        composite,
        glyphs,
        scene::{DrawOp, FrameScene, signature_lines},
        text::OverlayFont,
    },
};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy for encoders that expect unassociated RGBA.
    pub fn to_straight(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Whether every pixel is opaque black.
    pub fn is_black(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255])
    }
}

/// Executes [`FrameScene`]s into a persistent premultiplied trail buffer.
///
/// `Veil` darkens the trail in place, geometry is rasterized by `vello_cpu` into a scratch
/// pixmap and composited over, `Fill` overwrites.
pub struct CpuRasterizer {
    canvas: Canvas,
    width: u16,
    height: u16,
    trail: Vec<u8>,
    font: Option<OverlayFont>,
    /// Set once the missing-font warning has been logged.
    warned_missing_font: bool,
}

impl std::fmt::Debug for CpuRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRasterizer")
            .field("canvas", &self.canvas)
            .field("font", &self.font)
            .finish()
    }
}

impl CpuRasterizer {
    pub fn new(canvas: Canvas) -> MandalaResult<Self> {
        let (width, height) = canvas.to_u16()?;
        let mut trail = vec![0u8; usize::from(width) * usize::from(height) * 4];
        composite::fill_in_place(&mut trail, Rgba8::BLACK.to_premul())?;
        Ok(Self {
            canvas,
            width,
            height,
            trail,
            font: None,
            warned_missing_font: false,
        })
    }

    /// Enable the intention overlay. Without a font `Text` ops are skipped.
    pub fn with_font(mut self, font: OverlayFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Reset the trail to opaque black.
    pub fn clear(&mut self) -> MandalaResult<()> {
        composite::fill_in_place(&mut self.trail, Rgba8::BLACK.to_premul())
    }

    /// Resize the surface, discarding the trail. No-op when the size is unchanged.
    pub fn resize(&mut self, canvas: Canvas) -> MandalaResult<()> {
        if canvas == self.canvas {
            return Ok(());
        }
        let (width, height) = canvas.to_u16()?;
        tracing::debug!(width, height, "resizing raster surface");
        self.canvas = canvas;
        self.width = width;
        self.height = height;
        self.trail = vec![0u8; usize::from(width) * usize::from(height) * 4];
        self.clear()
    }

    /// Execute `scene` on top of the trail and return a copy of the result.
    #[tracing::instrument(level = "trace", skip_all, fields(ops = scene.ops.len()))]
    pub fn render(&mut self, scene: &FrameScene) -> MandalaResult<FrameRGBA> {
        self.resize(scene.canvas)?;

        let mut pending: Option<vello_cpu::RenderContext> = None;
        for op in &scene.ops {
            match op {
                DrawOp::Veil { opacity } => {
                    self.flush(pending.take())?;
                    composite::veil_in_place(&mut self.trail, *opacity as f32)?;
                }
                DrawOp::Fill { color } => {
                    pending = None;
                    composite::fill_in_place(&mut self.trail, color.to_premul())?;
                }
                DrawOp::Text { .. } if self.font.is_none() => {
                    if !self.warned_missing_font {
                        tracing::warn!("no overlay font configured; intention text is not drawn");
                        self.warned_missing_font = true;
                    }
                }
                _ => {
                    let ctx = pending.get_or_insert_with(|| {
                        vello_cpu::RenderContext::new(self.width, self.height)
                    });
                    draw_op(ctx, op, self.font.as_mut())?;
                }
            }
        }
        self.flush(pending)?;

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.trail.clone(),
            premultiplied: true,
        })
    }

    fn flush(&mut self, ctx: Option<vello_cpu::RenderContext>) -> MandalaResult<()> {
        let Some(mut ctx) = ctx else {
            return Ok(());
        };
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        composite::over_in_place(&mut self.trail, pixmap.data_as_u8_slice(), 1.0)
    }
}

fn draw_op(
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
    font: Option<&mut OverlayFont>,
) -> MandalaResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::Dot {
            center,
            radius,
            color,
            glow,
        } => {
            if !radius.is_finite() || *radius <= 0.0 {
                return Ok(());
            }
            let glow = glow.clamp(0.0, 1.0);
            if glow > 0.0 {
                set_color(ctx, color.with_alpha(f64::from(color.a) / 255.0 * 0.25 * glow));
                ctx.fill_path(&circle_path(*center, radius * (1.0 + 2.0 * glow)));
            }
            set_color(ctx, *color);
            ctx.fill_path(&circle_path(*center, *radius));
            Ok(())
        }
        DrawOp::Stroke { path, width, color } => {
            stroke(ctx, path, *width, *color);
            Ok(())
        }
        DrawOp::Signature {
            hex,
            origin,
            size,
            color,
        } => {
            let rows = signature_lines(hex);
            let path = glyphs::block_path(&rows, *origin, *size);
            stroke(ctx, &path, (size * 0.12).max(1.0), *color);
            Ok(())
        }
        DrawOp::Text {
            lines,
            origin,
            size,
            color,
        } => match font {
            Some(font) => font.draw_lines(ctx, lines, *origin, *size, *color),
            None => Ok(()),
        },
        DrawOp::Veil { .. } | DrawOp::Fill { .. } => Err(MandalaError::surface(
            "surface-wide ops are not drawn through the vector context",
        )),
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn stroke(ctx: &mut vello_cpu::RenderContext, path: &BezPath, width: f64, color: Rgba8) {
    if !width.is_finite() || width <= 0.0 {
        return;
    }
    set_color(ctx, color);
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
    ctx.stroke_path(&bezpath_to_cpu(path));
}

fn circle_path(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    use kurbo::Shape;
    bezpath_to_cpu(&kurbo::Circle::new(center, radius).to_path(0.1))
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

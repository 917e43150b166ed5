use std::path::Path;

use crate::foundation::{
    core::{Point, Rgba8},
    error::{MandalaError, MandalaResult},
};

/// Line pitch of the intention overlay relative to its font size.
pub const TEXT_LINE_PITCH: f64 = 1.3;

/// Greedy word wrap at `column` characters. Words longer than a line are split.
pub fn wrap_words(text: &str, column: usize) -> Vec<String> {
    let column = column.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > column {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(column);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        if chars.is_empty() {
            continue;
        }

        let needed = if current_len == 0 {
            chars.len()
        } else {
            current_len + 1 + chars.len()
        };
        if needed > column {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += chars.len();
        current.extend(chars);
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Stateful helper for building Parley text layouts from one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    pub(crate) fn new(font_bytes: &[u8]) -> MandalaResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            MandalaError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MandalaError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape and lay out a single pre-wrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> MandalaResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MandalaError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Font used for the intention overlay: Parley for shaping, `vello_cpu` for glyph fill.
pub struct OverlayFont {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for OverlayFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayFont")
            .field("family", &self.engine.family_name)
            .finish()
    }
}

impl OverlayFont {
    pub fn from_bytes(bytes: Vec<u8>) -> MandalaResult<Self> {
        let engine = TextLayoutEngine::new(&bytes)?;
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(Self { engine, font })
    }

    pub fn load(path: &Path) -> MandalaResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            MandalaError::validation(format!("read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes)
    }

    pub fn family_name(&self) -> &str {
        &self.engine.family_name
    }

    /// Fill every line's glyphs into `ctx`, top-left of the first line at `origin`.
    pub(crate) fn draw_lines(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        lines: &[String],
        origin: Point,
        size: f64,
        color: Rgba8,
    ) -> MandalaResult<()> {
        for (row, line) in lines.iter().enumerate() {
            let layout = self.engine.layout_line(line, size as f32, color)?;
            let y = origin.y + row as f64 * size * TEXT_LINE_PITCH;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, y)));

            for layout_line in layout.lines() {
                for item in layout_line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;

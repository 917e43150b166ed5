use std::path::Path;

use anyhow::Context;

use crate::{foundation::error::MandalaResult, render::cpu::FrameRGBA};

/// Save one frame as an RGBA PNG, creating parent directories as needed.
pub fn save_png(frame: &FrameRGBA, out: &Path) -> MandalaResult<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.to_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    tracing::debug!(path = %out.display(), "wrote png snapshot");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;

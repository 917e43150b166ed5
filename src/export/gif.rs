use std::{fs::File, io::BufWriter, path::PathBuf, time::Duration};

use anyhow::Context;

use crate::{
    export::sink::{FrameSink, SinkConfig},
    foundation::{
        core::Fps,
        error::{MandalaError, MandalaResult},
    },
    render::cpu::FrameRGBA,
};

/// Default sampling rate of exported animations.
pub const DEFAULT_GIF_FPS: u32 = 10;
/// Default exported window in seconds.
pub const DEFAULT_GIF_SECS: f64 = 3.0;

/// Streams frames into an infinitely looping animated GIF.
pub struct GifSink {
    path: PathBuf,
    encoder: Option<image::codecs::gif::GifEncoder<BufWriter<File>>>,
    delay: Option<image::Delay>,
    size: (u32, u32),
    frames: u64,
}

impl std::fmt::Debug for GifSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSink")
            .field("path", &self.path)
            .field("frames", &self.frames)
            .finish()
    }
}

impl GifSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoder: None,
            delay: None,
            size: (0, 0),
            frames: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames
    }
}

fn frame_delay(fps: Fps) -> image::Delay {
    image::Delay::from_numer_denom_ms(fps.den.saturating_mul(1000), fps.num.max(1))
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> MandalaResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let file = File::create(&self.path)
            .with_context(|| format!("create gif '{}'", self.path.display()))?;
        let mut encoder = image::codecs::gif::GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .context("set gif repeat")?;

        self.encoder = Some(encoder);
        self.delay = Some(frame_delay(cfg.fps));
        self.size = (cfg.width, cfg.height);
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> MandalaResult<()> {
        let delay = self
            .delay
            .ok_or_else(|| MandalaError::validation("gif sink used before begin"))?;
        self.encode(idx, frame, delay)
    }

    fn push_frame_held(
        &mut self,
        idx: u64,
        frame: &FrameRGBA,
        hold: Duration,
    ) -> MandalaResult<()> {
        self.encode(idx, frame, image::Delay::from_saturating_duration(hold))
    }

    fn end(&mut self) -> MandalaResult<()> {
        // Dropping the encoder writes the trailer.
        if self.encoder.take().is_some() {
            tracing::debug!(path = %self.path.display(), frames = self.frames, "wrote gif");
        }
        Ok(())
    }
}

impl GifSink {
    fn encode(&mut self, idx: u64, frame: &FrameRGBA, delay: image::Delay) -> MandalaResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(MandalaError::validation("gif sink used before begin"));
        };
        if (frame.width, frame.height) != self.size {
            return Err(MandalaError::validation(format!(
                "frame {idx} is {}x{}, expected {}x{}",
                frame.width, frame.height, self.size.0, self.size.1
            )));
        }
        let buffer = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight())
            .ok_or_else(|| MandalaError::validation("frame byte length mismatch"))?;
        encoder
            .encode_frame(image::Frame::from_parts(buffer, 0, 0, delay))
            .with_context(|| format!("encode gif frame {idx}"))?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/gif.rs"]
mod tests;

use std::time::Duration;

use crate::foundation::core::Fps;
use crate::foundation::error::MandalaResult;
use crate::render::cpu::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    /// Rate at which pushed frames are meant to be shown.
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices between one
/// `begin` and its `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> MandalaResult<()>;
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> MandalaResult<()>;

    /// Push `frame` to be shown for `hold`. Sinks without per-frame timing ignore `hold`.
    fn push_frame_held(
        &mut self,
        idx: u64,
        frame: &FrameRGBA,
        hold: Duration,
    ) -> MandalaResult<()> {
        let _ = hold;
        self.push_frame(idx, frame)
    }

    fn end(&mut self) -> MandalaResult<()>;
}

/// In-memory sink for tests and one-shot exports.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    holds: Vec<Duration>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// Display time of each captured frame. Frames pushed without a hold get one tick of the
    /// configured rate.
    pub fn holds(&self) -> &[Duration] {
        &self.holds
    }

    pub fn total_hold(&self) -> Duration {
        self.holds.iter().sum()
    }

    pub fn into_frames(self) -> Vec<FrameRGBA> {
        self.frames.into_iter().map(|(_, f)| f).collect()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MandalaResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.holds.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> MandalaResult<()> {
        let tick = self
            .cfg
            .as_ref()
            .map_or(Duration::ZERO, |cfg| cfg.fps.frame_duration());
        self.push_frame_held(idx, frame, tick)
    }

    fn push_frame_held(
        &mut self,
        idx: u64,
        frame: &FrameRGBA,
        hold: Duration,
    ) -> MandalaResult<()> {
        self.frames.push((idx, frame.clone()));
        self.holds.push(hold);
        Ok(())
    }

    fn end(&mut self) -> MandalaResult<()> {
        self.ended = true;
        Ok(())
    }
}

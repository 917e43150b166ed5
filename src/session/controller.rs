use std::time::Duration;

use chrono::Utc;

use crate::{
    animation::driver::{
        AnimationController, FrameSource, Pacing, Phase, PlaybackPlan, PlaybackStats, play,
    },
    config::MandalaConfig,
    export::sink::FrameSink,
    foundation::{
        core::Fps,
        error::{MandalaError, MandalaResult},
    },
    pattern::Pattern,
    render::{cpu::CpuRasterizer, scene::FrameScene},
    session::{
        classifier::{IntentionClassifier, Verdict},
        history::History,
    },
};

/// One interactive session: validates and classifies intentions, records them, and runs
/// breathing until the session timer elapses, then dissolves.
pub struct Session {
    config: MandalaConfig,
    classifier: Box<dyn IntentionClassifier>,
    history: History,
    current: Option<Pattern>,
    controller: AnimationController,
    elapsed_frames: u64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("history", &self.history.len())
            .field("current", &self.current.as_ref().map(|p| p.digest))
            .field("phase", &self.controller.phase())
            .field("elapsed_frames", &self.elapsed_frames)
            .finish()
    }
}

impl Session {
    /// Session using the configured keyword classifier.
    pub fn new(config: MandalaConfig, history: History) -> MandalaResult<Self> {
        let classifier = Box::new(config.classifier.clone());
        Self::with_classifier(config, classifier, history)
    }

    pub fn with_classifier(
        config: MandalaConfig,
        classifier: Box<dyn IntentionClassifier>,
        history: History,
    ) -> MandalaResult<Self> {
        config.validate()?;
        let controller = AnimationController::new(config.animation.clone());
        Ok(Self {
            config,
            classifier,
            history,
            current: None,
            controller,
            elapsed_frames: 0,
        })
    }

    pub fn config(&self) -> &MandalaConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn current(&self) -> Option<&Pattern> {
        self.current.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn elapsed_frames(&self) -> u64 {
        self.elapsed_frames
    }

    /// Replace the current pattern with one generated from `text` and start breathing.
    ///
    /// On any error the running animation is left untouched.
    #[tracing::instrument(skip_all, fields(bytes = text.len()))]
    pub fn generate(&mut self, text: &str) -> MandalaResult<&Pattern> {
        let words = text.split_whitespace().count();
        if words > self.config.word_limit {
            return Err(MandalaError::validation(format!(
                "intention has {words} words; the limit is {}",
                self.config.word_limit
            )));
        }
        if text.trim().is_empty() {
            return Err(MandalaError::EmptyInput);
        }

        match self.classifier.classify(text) {
            Verdict::Pass => {}
            Verdict::Warn(reason) => tracing::warn!(%reason, "intention flagged"),
            Verdict::Block(reason) => return Err(MandalaError::rejected(reason)),
        }

        self.controller.stop();
        let pattern = Pattern::generate(text, self.config.features)?;

        if self.history.record(text, pattern.digest, Utc::now())
            && let Err(err) = self.history.save()
        {
            tracing::warn!(error = %err, "history not saved; continuing");
        }

        self.elapsed_frames = 0;
        self.controller.start(&pattern);
        Ok(&*self.current.insert(pattern))
    }

    /// Stop the animation. The current pattern is kept.
    pub fn stop(&mut self) {
        self.controller.stop();
    }

    /// Start dissolving now instead of waiting for the timer.
    pub fn dissolve(&mut self) -> bool {
        self.controller.begin_dissolve()
    }

    /// Advance one frame. Returns `None` once nothing is pending.
    pub fn tick(&mut self) -> Option<FrameScene> {
        self.next_frame().map(|(scene, _)| scene)
    }

    /// Rasterize the running animation into `sink`. The session timer keeps counting, so a
    /// long breathing plan dissolves once `session_secs` have elapsed.
    pub fn play(
        &mut self,
        rasterizer: &mut CpuRasterizer,
        plan: PlaybackPlan,
        pacing: Pacing,
        sink: &mut dyn FrameSink,
    ) -> MandalaResult<PlaybackStats> {
        if self.current.is_none() {
            return Err(MandalaError::validation("no intention to play"));
        }
        play(self, rasterizer, plan, pacing, sink)
    }
}

impl FrameSource for Session {
    fn fps(&self) -> Fps {
        self.config.fps
    }

    fn phase(&self) -> Phase {
        self.controller.phase()
    }

    fn begin_dissolve(&mut self) -> bool {
        self.controller.begin_dissolve()
    }

    fn stop(&mut self) {
        self.controller.stop();
    }

    fn next_frame(&mut self) -> Option<(FrameScene, Duration)> {
        let pattern = self.current.as_ref()?;
        if self.controller.phase() == Phase::Breathing {
            self.elapsed_frames += 1;
            if self.elapsed_frames > self.config.session_frames() {
                tracing::debug!(frames = self.elapsed_frames, "session timer elapsed");
                self.controller.begin_dissolve();
            }
        }
        let interval = self.controller.frame_interval(self.config.fps);
        let scene = self.controller.tick(pattern, &self.config.scene)?;
        Some((scene, interval))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;

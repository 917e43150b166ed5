use std::time::{Duration, Instant};

use crate::{
    export::sink::{FrameSink, SinkConfig},
    foundation::{
        core::Fps,
        error::{MandalaError, MandalaResult},
    },
    geometry::project::RotationState,
    pattern::Pattern,
    render::{
        cpu::{CpuRasterizer, FrameRGBA},
        scene::{FrameInput, FrameScene, SceneConfig, render_frame},
    },
};

/// Animation lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Breathing,
    /// `step` counts completed dissolve steps.
    Dissolving { step: u32 },
}

/// Handle for the single pending frame. Tokens only ever increase; a token that is not the
/// pending one can never drive a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    pub fn token(self) -> u64 {
        self.0
    }
}

/// Time and rotation accumulators. Reset on every new pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderState {
    pub time: f64,
    pub rotation: RotationState,
    pub frame: u64,
}

impl RenderState {
    fn advance(&mut self, pattern: &Pattern, speed: f64) {
        self.time += pattern.params.pulse_speed * speed;
        self.rotation.advance(&pattern.params, speed);
        self.frame += 1;
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DissolveConfig {
    pub steps: u32,
    /// Wall-clock length of the whole dissolve.
    pub duration_ms: u64,
    /// Veil opacity while dissolving; lower leaves a longer trail.
    pub veil_opacity: f64,
    /// Rotation speed multiplier reached at the last step, minus one.
    pub speedup: f64,
}

impl Default for DissolveConfig {
    fn default() -> Self {
        Self {
            steps: 60,
            duration_ms: 3000,
            veil_opacity: 0.3,
            speedup: 8.0,
        }
    }
}

impl DissolveConfig {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.duration_ms) / self.steps.max(1)
    }

    pub fn validate(&self) -> MandalaResult<()> {
        if self.steps == 0 {
            return Err(MandalaError::validation("dissolve steps must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.veil_opacity) {
            return Err(MandalaError::validation(
                "dissolve veil_opacity must be in [0, 1]",
            ));
        }
        if !self.speedup.is_finite() || self.speedup < 0.0 {
            return Err(MandalaError::validation(
                "dissolve speedup must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Veil opacity while breathing. Near 1.0 leaves only a short trail.
    pub trail_veil: f64,
    pub dissolve: DissolveConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            trail_veil: 0.9,
            dissolve: DissolveConfig::default(),
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> MandalaResult<()> {
        if !(0.0..=1.0).contains(&self.trail_veil) {
            return Err(MandalaError::validation("trail_veil must be in [0, 1]"));
        }
        self.dissolve.validate()
    }
}

/// `Idle → Breathing → Dissolving → Idle` state machine with at most one pending frame.
#[derive(Debug)]
pub struct AnimationController {
    config: AnimationConfig,
    phase: Phase,
    state: RenderState,
    pending: Option<FrameRequest>,
    next_token: u64,
}

impl AnimationController {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            state: RenderState::default(),
            pending: None,
            next_token: 0,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Display interval of the next frame: one `fps` tick while breathing, one dissolve step
    /// while dissolving.
    pub fn frame_interval(&self, fps: Fps) -> Duration {
        match self.phase {
            Phase::Dissolving { .. } => self.config.dissolve.step_interval(),
            _ => fps.frame_duration(),
        }
    }

    /// Begin breathing from time zero. Any previous loop is cancelled first.
    #[tracing::instrument(level = "debug", skip_all, fields(digest = %pattern.digest))]
    pub fn start(&mut self, pattern: &Pattern) -> FrameRequest {
        self.stop();
        self.state = RenderState::default();
        self.phase = Phase::Breathing;
        self.request()
    }

    /// Cancel the pending frame and go idle. Safe to call in any phase, any number of times.
    pub fn stop(&mut self) {
        if let Some(req) = self.pending.take() {
            tracing::debug!(token = req.0, "cancelled pending frame");
        }
        self.phase = Phase::Idle;
    }

    /// `Breathing → Dissolving`. Returns `false` (and does nothing) in any other phase.
    pub fn begin_dissolve(&mut self) -> bool {
        if self.phase != Phase::Breathing {
            return false;
        }
        tracing::debug!(frame = self.state.frame, "dissolve started");
        self.phase = Phase::Dissolving { step: 0 };
        if self.pending.is_none() {
            self.request();
        }
        true
    }

    /// Run the pending frame, if any.
    pub fn tick(&mut self, pattern: &Pattern, scene: &SceneConfig) -> Option<FrameScene> {
        self.pending.take()?;

        match self.phase {
            Phase::Idle => None,
            Phase::Breathing => {
                self.state.advance(pattern, 1.0);
                let input = self.frame_input(pattern, 1.0, self.config.trail_veil);
                self.request();
                Some(render_frame(pattern, &input, scene))
            }
            Phase::Dissolving { step } => {
                let dissolve = &self.config.dissolve;
                let steps = dissolve.steps.max(1);
                let step = step + 1;
                if step >= steps {
                    tracing::debug!("dissolve complete");
                    self.phase = Phase::Idle;
                    return Some(FrameScene::black(scene.canvas));
                }

                let frac = f64::from(step) / f64::from(steps);
                let speed = 1.0 + dissolve.speedup * frac;
                let veil = dissolve.veil_opacity;
                self.state.advance(pattern, speed);
                let input = self.frame_input(pattern, 1.0 - frac, veil);
                self.phase = Phase::Dissolving { step };
                self.request();
                Some(render_frame(pattern, &input, scene))
            }
        }
    }

    /// Run the frame for `request` only if it is the pending one.
    pub fn tick_request(
        &mut self,
        request: FrameRequest,
        pattern: &Pattern,
        scene: &SceneConfig,
    ) -> Option<FrameScene> {
        if self.pending != Some(request) {
            tracing::trace!(token = request.0, "ignoring stale frame request");
            return None;
        }
        self.tick(pattern, scene)
    }

    fn request(&mut self) -> FrameRequest {
        self.next_token += 1;
        let req = FrameRequest(self.next_token);
        self.pending = Some(req);
        req
    }

    fn frame_input(&self, pattern: &Pattern, scale: f64, veil_opacity: f64) -> FrameInput {
        FrameInput {
            time: self.state.time,
            rotation: self.state.rotation,
            pulse: pattern.params.pulse(self.state.time),
            scale,
            veil_opacity,
        }
    }
}

/// Whether playback sleeps between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Render as fast as possible.
    Offline,
    /// Hold each frame for its display interval.
    RealTime,
}

/// What [`play`] plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackPlan {
    /// Breathing ticks before the dissolve (or before stopping).
    pub breathing_frames: u64,
    pub dissolve: bool,
    /// Push every `stride`-th rendered frame to the sink. The last frame is always pushed.
    pub stride: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    pub ticks: u64,
    pub frames_pushed: u64,
    pub ended_black: bool,
}

/// Timed scenes that can be steered into the dissolve.
pub trait FrameSource {
    /// Animation rate while breathing.
    fn fps(&self) -> Fps;
    fn phase(&self) -> Phase;
    fn begin_dissolve(&mut self) -> bool;
    fn stop(&mut self);
    /// Next scene and how long it stays on screen. `None` once nothing is pending.
    fn next_frame(&mut self) -> Option<(FrameScene, Duration)>;
}

/// Sink frame rate when every `stride`-th frame of `fps` is kept.
pub fn strided_fps(fps: Fps, stride: u64) -> MandalaResult<Fps> {
    let stride =
        u32::try_from(stride.max(1)).map_err(|_| MandalaError::validation("stride exceeds u32"))?;
    Fps::new(fps.num, fps.den.saturating_mul(stride))
}

struct HeldFrame {
    idx: u64,
    frame: FrameRGBA,
    hold: Duration,
}

impl HeldFrame {
    fn push(self, sink: &mut dyn FrameSink, stats: &mut PlaybackStats) -> MandalaResult<()> {
        sink.push_frame_held(self.idx, &self.frame, self.hold)?;
        stats.frames_pushed += 1;
        Ok(())
    }
}

/// Rasterize `source` into `sink` following `plan`.
///
/// Each pushed frame is held for the summed display intervals of every tick it stands for, so
/// striding and the faster dissolve steps keep their wall-clock length. A frame is handed to
/// the sink once the next kept frame has been rendered.
pub fn play(
    source: &mut dyn FrameSource,
    rasterizer: &mut CpuRasterizer,
    plan: PlaybackPlan,
    pacing: Pacing,
    sink: &mut dyn FrameSink,
) -> MandalaResult<PlaybackStats> {
    let stride = plan.stride.max(1);
    let canvas = rasterizer.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: strided_fps(source.fps(), stride)?,
    })?;
    rasterizer.clear()?;

    let mut stats = PlaybackStats::default();
    let mut held: Option<HeldFrame> = None;
    let mut tail: Option<HeldFrame> = None;

    loop {
        if stats.ticks == plan.breathing_frames && source.phase() == Phase::Breathing {
            if !plan.dissolve {
                source.stop();
                break;
            }
            source.begin_dissolve();
        }

        let started = Instant::now();
        let Some((scene, interval)) = source.next_frame() else {
            break;
        };
        let frame = rasterizer.render(&scene)?;
        let idx = stats.ticks;
        stats.ticks += 1;
        stats.ended_black = scene.is_black();

        if idx % stride == 0 {
            if let Some(prev) = held.take() {
                prev.push(sink, &mut stats)?;
            }
            held = Some(HeldFrame {
                idx,
                frame,
                hold: interval,
            });
            tail = None;
        } else {
            if let Some(prev) = held.as_mut() {
                prev.hold += interval;
            }
            tail = Some(HeldFrame {
                idx,
                frame,
                hold: interval,
            });
        }

        if pacing == Pacing::RealTime
            && let Some(rest) = interval.checked_sub(started.elapsed())
        {
            std::thread::sleep(rest);
        }
    }

    if let Some(mut prev) = held.take() {
        // The trailing frame is pushed on its own and keeps its own interval.
        if let Some(last) = &tail {
            prev.hold = prev.hold.saturating_sub(last.hold);
        }
        prev.push(sink, &mut stats)?;
    }
    if let Some(last) = tail {
        last.push(sink, &mut stats)?;
    }
    sink.end()?;
    tracing::debug!(
        ticks = stats.ticks,
        pushed = stats.frames_pushed,
        "playback finished"
    );
    Ok(stats)
}

struct ControllerSource<'a> {
    controller: &'a mut AnimationController,
    pattern: &'a Pattern,
    scene: &'a SceneConfig,
    fps: Fps,
}

impl FrameSource for ControllerSource<'_> {
    fn fps(&self) -> Fps {
        self.fps
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
        let req = self.controller.pending()?;
        let interval = self.controller.frame_interval(self.fps);
        let scene = self.controller.tick_request(req, self.pattern, self.scene)?;
        Some((scene, interval))
    }
}

/// Drives a controller and rasterizer into a [`FrameSink`].
#[derive(Debug)]
pub struct Player {
    controller: AnimationController,
    rasterizer: CpuRasterizer,
    scene: SceneConfig,
    fps: Fps,
}

impl Player {
    pub fn new(
        config: AnimationConfig,
        scene: SceneConfig,
        fps: Fps,
        rasterizer: CpuRasterizer,
    ) -> Self {
        Self {
            controller: AnimationController::new(config),
            rasterizer,
            scene,
            fps,
        }
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    /// Sink frame rate after striding.
    pub fn output_fps(&self, stride: u64) -> MandalaResult<Fps> {
        strided_fps(self.fps, stride)
    }

    #[tracing::instrument(
        skip_all,
        fields(digest = %pattern.digest, frames = plan.breathing_frames)
    )]
    pub fn run(
        &mut self,
        pattern: &Pattern,
        plan: PlaybackPlan,
        pacing: Pacing,
        sink: &mut dyn FrameSink,
    ) -> MandalaResult<PlaybackStats> {
        self.controller.start(pattern);
        let mut source = ControllerSource {
            controller: &mut self.controller,
            pattern,
            scene: &self.scene,
            fps: self.fps,
        };
        play(&mut source, &mut self.rasterizer, plan, pacing, sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;

use std::time::{Duration, Instant};

use glam::Mat4;

use crate::input::InputState;
use crate::render::draw_scene;
use crate::scene::{EntityId, Scene, SceneError};
use crate::tick::tick_tree;
use crate::transform::compute_world_matrices;

/// Source of per-frame elapsed time.
///
/// Returns `None` on the first frame, when there is no previous frame to
/// measure from.
pub trait FrameClock {
    fn delta_seconds(&mut self) -> Option<f32>;
}

/// Wall-clock timing between successive frames.
#[derive(Debug, Default)]
pub struct RealtimeClock {
    last_tick: Option<Instant>,
}

impl RealtimeClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for RealtimeClock {
    fn delta_seconds(&mut self) -> Option<f32> {
        let now = Instant::now();
        let delta = self.last_tick.map(|last| (now - last).as_secs_f32());
        self.last_tick = Some(now);
        delta
    }
}

/// Constant step, for deterministic playback.
#[derive(Debug, Clone)]
pub struct FixedClock {
    step: Duration,
    started: bool,
}

impl FixedClock {
    pub fn new(step: Duration) -> Self {
        Self { step, started: false }
    }
}

impl FrameClock for FixedClock {
    fn delta_seconds(&mut self) -> Option<f32> {
        if !self.started {
            self.started = true;
            return None;
        }
        Some(self.step.as_secs_f32())
    }
}

/// What happened during one [`App::frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Elapsed seconds passed to the tick pass, if it ran.
    pub delta_seconds: Option<f32>,
    pub draws: usize,
}

/// Owns a scene and drives it one frame at a time: tick, compose, draw.
pub struct App {
    pub scene: Scene,
    pub input: InputState,
    /// Entity whose lens renders the frame. No draws without one.
    pub active_camera: Option<EntityId>,
    pub aspect: f32,
    frames: u64,
}

impl App {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            input: InputState::new(),
            active_camera: None,
            aspect: 4.0 / 3.0,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame of the loop.
    ///
    /// The tick pass completes over the whole tree before composition starts,
    /// and composition completes before anything is drawn. The first frame
    /// skips the tick pass.
    ///
    /// A failed draw still ends the frame: input deltas are consumed and the
    /// frame is counted before the error is returned.
    pub fn frame(&mut self, clock: &mut dyn FrameClock) -> Result<FrameReport, SceneError> {
        let delta_seconds = clock.delta_seconds();
        if let Some(dt) = delta_seconds {
            tick_tree(&mut self.scene, dt, &self.input);
        }

        compute_world_matrices(&mut self.scene, Mat4::IDENTITY);

        let draws = match self.active_camera {
            Some(camera) => draw_scene(&self.scene, camera, self.aspect),
            None => Ok(0),
        };

        self.input.end_frame();
        self.frames += 1;

        Ok(FrameReport { delta_seconds, draws: draws? })
    }
}

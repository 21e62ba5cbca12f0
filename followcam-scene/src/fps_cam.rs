use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use followcam_math::FORWARD;

use crate::camera::Camera;
use crate::scene::{EntityId, Scene, SceneError, Transform};
use crate::tick::{Behavior, TickContext};

/// Pitch stops just short of straight up/down.
const MAX_PITCH: f32 = FRAC_PI_2 * (89.0 / 90.0);

/// Tuning for an [`FpsCam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsSettings {
    /// Units per second.
    pub move_speed: f32,
    /// Radians per pixel of mouse motion.
    pub look_sensitivity: f32,
}

impl Default for FpsSettings {
    fn default() -> Self {
        Self {
            move_speed: FpsCam::DEFAULT_MOVE_SPEED,
            look_sensitivity: FpsCam::DEFAULT_LOOK_SENSITIVITY,
        }
    }
}

/// First-person controller: a body that yaws and walks, and a head child that
/// pitches and carries the lens.
#[derive(Debug, Clone, Copy)]
pub struct FpsCam {
    pub head: EntityId,
    /// Radians about world +Y, applied to the body.
    pub yaw: f32,
    /// Radians about the head's local +Z.
    pub pitch: f32,
    /// Units per second.
    pub move_speed: f32,
    /// Radians per pixel of mouse motion.
    pub look_sensitivity: f32,
}

impl FpsCam {
    pub const DEFAULT_MOVE_SPEED: f32 = 3.0;
    pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.005;

    pub fn new(head: EntityId) -> Self {
        Self::with_settings(head, FpsSettings::default())
    }

    pub fn with_settings(head: EntityId, settings: FpsSettings) -> Self {
        Self {
            head,
            yaw: 0.0,
            pitch: 0.0,
            move_speed: settings.move_speed,
            look_sensitivity: settings.look_sensitivity,
        }
    }

    /// Create the body under `parent` and a `<name>.cam` head under it
    /// carrying `lens`. Returns `(body, head)`.
    pub fn spawn(
        scene: &mut Scene,
        parent: EntityId,
        name: &str,
        transform: Transform,
        lens: Camera,
        settings: FpsSettings,
    ) -> Result<(EntityId, EntityId), SceneError> {
        let body = scene.spawn(parent, name, transform)?;
        let head = scene.spawn(body, format!("{name}.cam"), Transform::IDENTITY)?;
        scene.set_camera(head, lens)?;
        scene.set_behavior(body, Box::new(Self::with_settings(head, settings)))?;
        Ok((body, head))
    }
}

impl Behavior for FpsCam {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let input = ctx.input;
        let dt = ctx.delta_seconds;

        self.yaw -= input.mouse_dx * self.look_sensitivity;
        self.pitch =
            (self.pitch - input.mouse_dy * self.look_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);

        let body_rotation = Quat::from_rotation_y(self.yaw);
        let forward = body_rotation * FORWARD;
        let right = body_rotation * Vec3::Z;

        let mut motion = Vec3::ZERO;
        if input.is_key_down(b'W') {
            motion += forward;
        }
        if input.is_key_down(b'S') {
            motion -= forward;
        }
        if input.is_key_down(b'D') {
            motion += right;
        }
        if input.is_key_down(b'A') {
            motion -= right;
        }

        if let Some(body) = ctx.this() {
            body.transform.rotation = body_rotation;
            body.transform.position += motion.normalize_or_zero() * self.move_speed * dt;
        }

        if let Some(head) = ctx.scene.get_mut(self.head) {
            head.transform.rotation = Quat::from_rotation_z(self.pitch);
        }
    }
}

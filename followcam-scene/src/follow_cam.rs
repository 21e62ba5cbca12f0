//! Camera behavior that turns to face another entity every frame.
//!
//! The camera reads its parent's world matrix and both world positions from
//! the previous composition pass, because the tick pass runs before this
//! frame's composition. The orientation therefore lags one frame behind.

use glam::{Mat4, Quat, Vec3};

use followcam_math::{axis_in, look_rotation, safe_acos, translation_of, FORWARD, UP};

use crate::scene::EntityId;
use crate::tick::{Behavior, TickContext};

/// Tolerance for treating the camera as already facing (or facing away from)
/// its target.
pub const FACING_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AimMode {
    /// Rotate about `fwd × to` by the angle between them, then roll about +X
    /// by `-acos(axis · up)` to level the up vector. Approximate: the up
    /// correction drifts for targets off the horizontal plane.
    #[default]
    TwoStep,
    /// Full look-at: forward onto the target with up kept in the world-up
    /// plane. Solved in parent space so it holds under rotated parents.
    LookAt,
}

/// Outcome of one aiming step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aim {
    /// Forward already points at the target.
    Facing,
    /// Target is directly behind; a half turn is not computed.
    Opposite,
    /// No usable direction (target on top of the camera, or a collapsed
    /// parent basis).
    Degenerate,
    Rotate { dot: f32, rotation: Quat },
}

/// Decide the camera's new local rotation.
///
/// `parent_world` is the camera's parent matrix from the last composition,
/// `to` the world-space vector from camera to target.
pub fn aim(parent_world: &Mat4, to: Vec3, mode: AimMode) -> Aim {
    let Some(to_dir) = to.try_normalize() else {
        return Aim::Degenerate;
    };

    let fwd = axis_in(parent_world, FORWARD);
    let up = axis_in(parent_world, UP);
    let dot = fwd.dot(to_dir);

    match mode {
        AimMode::TwoStep => {
            if (dot - 1.0).abs() < FACING_EPSILON {
                return Aim::Facing;
            }
            if (dot + 1.0).abs() < FACING_EPSILON {
                return Aim::Opposite;
            }

            let Some(axis) = fwd.cross(to).try_normalize() else {
                return Aim::Degenerate;
            };

            let rotation = Quat::from_axis_angle(axis, safe_acos(dot))
                * Quat::from_axis_angle(Vec3::X, -safe_acos(axis.dot(up)));

            Aim::Rotate { dot, rotation }
        }
        AimMode::LookAt => {
            let to_parent = parent_world.inverse();
            let local_dir = to_parent.transform_vector3(to);
            let local_up = to_parent.transform_vector3(Vec3::Y);

            match look_rotation(local_dir, local_up) {
                Some(rotation) => Aim::Rotate { dot, rotation },
                None => Aim::Degenerate,
            }
        }
    }
}

/// Keeps its entity pointed at `target`.
#[derive(Debug, Clone, Copy)]
pub struct FollowCam {
    /// Weak: the camera tolerates the target disappearing.
    pub target: EntityId,
    pub mode: AimMode,
}

impl FollowCam {
    pub fn new(target: EntityId) -> Self {
        Self {
            target,
            mode: AimMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: AimMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Behavior for FollowCam {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let Some(target_position) = ctx.scene.world_position(self.target) else {
            log::trace!("follow cam {}: target {} is gone", ctx.entity, self.target);
            return;
        };
        let Some(this) = ctx.this() else {
            return;
        };

        let parent_world = this.parent_world_matrix();
        let to = target_position - translation_of(&this.world_matrix());

        match aim(&parent_world, to, self.mode) {
            Aim::Rotate { rotation, .. } => this.transform.rotation = rotation,
            Aim::Degenerate => log::trace!("follow cam {}: no usable direction", this.name),
            Aim::Facing | Aim::Opposite => {}
        }
    }
}

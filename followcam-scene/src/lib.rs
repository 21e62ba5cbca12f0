//! followcam scene core
//!
//! An entity tree with a two-pass frame: a tick pass that runs per-entity
//! behaviors (follow camera, FPS camera, or anything implementing
//! [`Behavior`]), then a composition pass that rebuilds every world matrix
//! top-down. A render loop reads the composed matrices afterwards.

mod app;
mod camera;
mod follow_cam;
mod fps_cam;
mod input;
mod render;
mod scene;
mod tick;
mod transform;

pub use app::{App, FixedClock, FrameClock, FrameReport, RealtimeClock};
pub use camera::Camera;
pub use follow_cam::{aim, Aim, AimMode, FollowCam, FACING_EPSILON};
pub use fps_cam::{FpsCam, FpsSettings};
pub use input::InputState;
pub use render::{draw_scene, view_projection, Drawable};
pub use scene::{DepthIter, Entity, EntityId, Iter, Scene, SceneError, Transform};
pub use tick::{tick_tree, Behavior, TickContext};
pub use transform::compute_world_matrices;

pub use followcam_math as math;
pub use glam;

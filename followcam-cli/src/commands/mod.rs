pub mod init_cmd;
pub mod inspect_cmd;
pub mod run_cmd;

use followcam_scene::glam::{Quat, Vec3};

pub(crate) fn fmt_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

/// Rotation as axis and angle in degrees; identity prints as `none`.
pub(crate) fn fmt_rotation(q: Quat) -> String {
    let (axis, angle) = q.to_axis_angle();
    if angle.abs() < 1e-6 {
        return "none".into();
    }
    format!("{:.2}° about {}", angle.to_degrees(), fmt_vec3(axis))
}

use glam::{Mat3, Mat4, Quat, Vec3, Vec4};

/// Local forward axis of every entity. Cameras look down +X.
pub const FORWARD: Vec3 = Vec3::X;
/// Local up axis of every entity.
pub const UP: Vec3 = Vec3::Y;

/// Transform a local direction by `matrix`, ignoring translation.
///
/// Equivalent to `(matrix * vec4(axis, 0)).xyz`; the result is not normalized,
/// so any scale in `matrix` carries through.
pub fn axis_in(matrix: &Mat4, axis: Vec3) -> Vec3 {
    (*matrix * Vec4::new(axis.x, axis.y, axis.z, 0.0)).truncate()
}

/// Translation column of an affine matrix.
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    matrix.w_axis.truncate()
}

/// `Translate(position) * Rotate(rotation) * Scale(scale)`.
pub fn local_matrix(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_quat(rotation) * Mat4::from_scale(scale)
}

/// Rotation that maps the local forward axis onto `direction` while keeping
/// the local up axis in the plane spanned by `direction` and `up_hint`.
///
/// Returns `None` when `direction` has no length or is parallel to `up_hint`.
pub fn look_rotation(direction: Vec3, up_hint: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    let side = forward.cross(up_hint).try_normalize()?;
    let up = side.cross(forward);

    // Columns are the images of +X, +Y, +Z.
    Some(Quat::from_mat3(&Mat3::from_cols(forward, up, side)).normalize())
}

/// `acos` that tolerates dot products drifting just outside [-1, 1].
pub fn safe_acos(x: f32) -> f32 {
    x.clamp(-1.0, 1.0).acos()
}

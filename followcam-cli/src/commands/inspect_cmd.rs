use std::path::Path;

use followcam_scene::glam::Mat4;
use followcam_scene::compute_world_matrices;

use super::{fmt_rotation, fmt_vec3};
use crate::scene_file::SceneFile;

pub fn run(path: &Path) -> anyhow::Result<()> {
    let mut app = SceneFile::load(path)?.build()?;
    compute_world_matrices(&mut app.scene, Mat4::IDENTITY);

    for (id, depth, entity) in app.scene.iter().with_depth() {
        let (_, world_rotation, _) = entity.world_matrix().to_scale_rotation_translation();
        let mut tags = Vec::new();
        if entity.payload().is_some() {
            tags.push("mesh");
        }
        if entity.camera().is_some() {
            tags.push("camera");
        }
        if entity.has_behavior() {
            tags.push("behavior");
        }
        if app.active_camera == Some(id) {
            tags.push("active");
        }

        println!(
            "{:indent$}{} [{}]",
            "",
            entity.name,
            tags.join(", "),
            indent = depth * 2
        );
        println!(
            "{:indent$}  local {}  world {}  world rotation {}",
            "",
            fmt_vec3(entity.transform.position),
            fmt_vec3(entity.world_position()),
            fmt_rotation(world_rotation),
            indent = depth * 2
        );
    }
    Ok(())
}

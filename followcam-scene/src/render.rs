use glam::Mat4;

use followcam_math::DrawUniforms;

use crate::scene::{EntityId, Scene, SceneError};

/// Opaque render payload. The scene never looks inside; it only asks it to
/// draw with the uniforms computed for its entity.
pub trait Drawable {
    fn draw(&self, uniforms: &DrawUniforms);
}

/// View and projection matrices for the lens on `camera`.
pub fn view_projection(
    scene: &Scene,
    camera: EntityId,
    aspect: f32,
) -> Result<(Mat4, Mat4), SceneError> {
    let entity = scene.get(camera).ok_or(SceneError::DeadEntity(camera))?;
    let lens = entity.camera().ok_or(SceneError::NotACamera(camera))?;
    Ok((lens.view(&entity.world_matrix()), lens.projection(aspect)))
}

/// Draw every entity carrying a payload, in pre-order, as seen from `camera`.
///
/// Reads the world matrices of the last composition pass. Returns the number
/// of draw calls issued.
pub fn draw_scene(scene: &Scene, camera: EntityId, aspect: f32) -> Result<usize, SceneError> {
    let (view, projection) = view_projection(scene, camera, aspect)?;
    let vp = projection * view;

    let mut draws = 0;
    for (id, entity) in scene.iter() {
        let Some(payload) = entity.payload() else {
            continue;
        };
        let uniforms = DrawUniforms::new(entity.world_matrix(), view, vp);
        log::trace!("draw {} ({id})", entity.name);
        payload.draw(&uniforms);
        draws += 1;
    }

    Ok(draws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::Transform;
    use crate::transform::compute_world_matrices;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Capture {
        name: &'static str,
        seen: Rc<RefCell<Vec<(&'static str, DrawUniforms)>>>,
    }

    impl Drawable for Capture {
        fn draw(&self, uniforms: &DrawUniforms) {
            self.seen.borrow_mut().push((self.name, *uniforms));
        }
    }

    #[test]
    fn test_draws_only_payload_entities_in_order() {
        let mut scene = Scene::new();
        let root = scene.root();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let cube = scene.spawn(root, "cube", Transform::default()).unwrap();
        let monkey = scene
            .spawn(cube, "monkey", Transform::from_position(Vec3::new(2.1, 0.0, 0.0)))
            .unwrap();
        let cam = scene
            .spawn(root, "cam", Transform::from_position(Vec3::new(-3.0, 1.0, 1.0)))
            .unwrap();
        let axes = scene.spawn(root, "axes", Transform::default()).unwrap();

        scene.set_camera(cam, Camera::default()).unwrap();
        scene
            .set_payload(monkey, Box::new(Capture { name: "monkey", seen: seen.clone() }))
            .unwrap();
        scene
            .set_payload(axes, Box::new(Capture { name: "axes", seen: seen.clone() }))
            .unwrap();

        compute_world_matrices(&mut scene, Mat4::IDENTITY);
        let draws = draw_scene(&scene, cam, 4.0 / 3.0).unwrap();

        assert_eq!(draws, 2);
        let seen = seen.borrow();
        assert_eq!(seen[0].0, "monkey");
        assert_eq!(seen[1].0, "axes");

        let (view, proj) = view_projection(&scene, cam, 4.0 / 3.0).unwrap();
        let monkey_world = scene.get(monkey).unwrap().world_matrix();
        assert_eq!(seen[0].1.model(), monkey_world);
        assert!(seen[0].1.mvp().abs_diff_eq(proj * view * monkey_world, 1e-5));
    }

    #[test]
    fn test_requires_a_lens() {
        let mut scene = Scene::new();
        let root = scene.root();
        let not_cam = scene.spawn(root, "x", Transform::default()).unwrap();

        assert_eq!(draw_scene(&scene, not_cam, 1.0), Err(SceneError::NotACamera(not_cam)));

        scene.despawn(not_cam).unwrap();
        assert_eq!(draw_scene(&scene, not_cam, 1.0), Err(SceneError::DeadEntity(not_cam)));
    }
}

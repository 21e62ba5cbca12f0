use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use followcam_scene::glam::{Mat4, Quat, Vec3};
use followcam_scene::math::{DrawUniforms, FORWARD};
use followcam_scene::{
    compute_world_matrices, App, Camera, Drawable, EntityId, FixedClock, FollowCam, FpsCam,
    FpsSettings, Scene, Transform,
};

const EPSILON: f32 = 1e-4;

struct Mesh {
    name: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Drawable for Mesh {
    fn draw(&self, _uniforms: &DrawUniforms) {
        self.log.borrow_mut().push(self.name);
    }
}

/// The demo layout: a cube with the monkey as child, an FPS camera, axes,
/// and a follow camera tracking the monkey.
fn demo(log: &Rc<RefCell<Vec<&'static str>>>) -> (App, EntityId, EntityId) {
    let mut scene = Scene::new();
    let root = scene.root();

    let cube = scene.spawn(root, "cube", Transform::default()).unwrap();
    let monkey = scene
        .spawn(cube, "monkey", Transform::from_position(Vec3::new(2.1, 0.0, 0.0)))
        .unwrap();
    scene
        .set_payload(monkey, Box::new(Mesh { name: "monkey", log: log.clone() }))
        .unwrap();

    let (_, fps_head) = FpsCam::spawn(
        &mut scene,
        root,
        "fps",
        Transform::from_position(Vec3::new(-3.0, 1.0, 1.0)),
        Camera::default(),
        FpsSettings::default(),
    )
    .unwrap();

    let axes = scene.spawn(root, "axes", Transform::default()).unwrap();
    scene
        .set_payload(axes, Box::new(Mesh { name: "axes", log: log.clone() }))
        .unwrap();

    let tracker = scene
        .spawn(root, "tracker", Transform::from_position(Vec3::new(-3.0, 1.0, 1.0)))
        .unwrap();
    scene.set_camera(tracker, Camera::default()).unwrap();
    scene.set_behavior(tracker, Box::new(FollowCam::new(monkey))).unwrap();

    let mut app = App::new(scene);
    app.active_camera = Some(fps_head);
    (app, tracker, monkey)
}

#[test]
fn nested_child_world_position() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene
        .spawn(root, "a", Transform::from_position(Vec3::new(2.0, 0.0, 0.0)))
        .unwrap();
    let b = scene
        .spawn(a, "b", Transform::from_position(Vec3::new(1.0, 0.0, 0.0)))
        .unwrap();

    compute_world_matrices(&mut scene, Mat4::IDENTITY);

    assert!(scene.world_position(b).unwrap().abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), EPSILON));
}

#[test]
fn demo_frames_draw_payloads_and_track_target() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (mut app, tracker, monkey) = demo(&log);
    let mut clock = FixedClock::new(Duration::from_millis(16));

    // First frame composes only; the tracker has no orientation yet.
    let first = app.frame(&mut clock).unwrap();
    assert_eq!(first.draws, 2);
    assert_eq!(app.scene.get(tracker).unwrap().transform.rotation, Quat::IDENTITY);

    // Second frame ticks with the first frame's positions.
    app.frame(&mut clock).unwrap();

    let tracker_entity = app.scene.get(tracker).unwrap();
    assert_ne!(tracker_entity.transform.rotation, Quat::IDENTITY);

    let forward = tracker_entity.world_matrix().transform_vector3(FORWARD);
    let to = app.scene.world_position(monkey).unwrap() - tracker_entity.world_position();
    assert!(forward.normalize().abs_diff_eq(to.normalize(), EPSILON));

    assert_eq!(*log.borrow(), ["monkey", "axes", "monkey", "axes"]);
}

#[test]
fn tracker_stops_when_target_removed() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (mut app, tracker, monkey) = demo(&log);
    let mut clock = FixedClock::new(Duration::from_millis(16));

    app.frame(&mut clock).unwrap();
    app.frame(&mut clock).unwrap();
    let aimed = app.scene.get(tracker).unwrap().transform.rotation;

    app.scene.despawn(monkey).unwrap();
    let report = app.frame(&mut clock).unwrap();

    assert_eq!(report.draws, 1);
    assert_eq!(app.scene.get(tracker).unwrap().transform.rotation, aimed);
}

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context};
use followcam_scene::glam::{Quat, Vec3};
use followcam_scene::math::DrawUniforms;
use followcam_scene::{
    AimMode, App, Camera, Drawable, EntityId, FollowCam, FpsCam, FpsSettings, Scene, Transform,
};
use serde::Deserialize;

/// Scene description read from a `.toml` file.
///
/// Entities are listed parents-first; an entity without `parent` hangs off
/// the scene root.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub active_camera: Option<String>,
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityDecl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityDecl {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: Option<RotationDecl>,
    #[serde(default)]
    pub scale: ScaleDecl,
    /// Name of the mesh drawn for this entity.
    #[serde(default)]
    pub mesh: Option<String>,
    #[serde(default)]
    pub camera: Option<LensDecl>,
    #[serde(default)]
    pub behavior: Option<BehaviorDecl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RotationDecl {
    pub axis: [f32; 3],
    pub degrees: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScaleDecl {
    Uniform(f32),
    PerAxis([f32; 3]),
}

impl Default for ScaleDecl {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

impl ScaleDecl {
    fn to_vec3(self) -> Vec3 {
        match self {
            Self::Uniform(s) => Vec3::splat(s),
            Self::PerAxis(v) => Vec3::from_array(v),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LensDecl {
    #[serde(default = "default_fov")]
    pub fov_y_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BehaviorDecl {
    Follow {
        target: String,
        #[serde(default)]
        mode: AimModeDecl,
    },
    Fps {
        #[serde(default)]
        move_speed: Option<f32>,
        #[serde(default)]
        look_sensitivity: Option<f32>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AimModeDecl {
    #[default]
    TwoStep,
    LookAt,
}

impl From<AimModeDecl> for AimMode {
    fn from(mode: AimModeDecl) -> Self {
        match mode {
            AimModeDecl::TwoStep => AimMode::TwoStep,
            AimModeDecl::LookAt => AimMode::LookAt,
        }
    }
}

fn default_aspect() -> f32 {
    4.0 / 3.0
}

fn default_fov() -> f32 {
    Camera::default().fov_y_degrees
}

fn default_near() -> f32 {
    Camera::default().near
}

fn default_far() -> f32 {
    Camera::default().far
}

impl From<&LensDecl> for Camera {
    fn from(lens: &LensDecl) -> Self {
        Camera {
            fov_y_degrees: lens.fov_y_degrees,
            near: lens.near,
            far: lens.far,
        }
    }
}

/// The scene `fcam init` writes: the cube-and-monkey demo viewed through an
/// FPS camera, with a second camera tracking the monkey.
pub const DEMO_SCENE: &str = r#"# followcam demo scene
active_camera = "fps.cam"
aspect = 1.3333

[[entity]]
name = "cube"
mesh = "Cube"

[[entity]]
name = "monkey"
parent = "cube"
position = [2.1, 0.0, 0.0]
mesh = "MonkeySmooth.obj"

# Body yaws and walks; its "fps.cam" child pitches and holds the lens.
[[entity]]
name = "fps"
position = [-3.0, 1.0, 1.0]
camera = { fov_y_degrees = 45.0 }
behavior = { kind = "fps" }

[[entity]]
name = "axes"
mesh = "Axes.obj"

[[entity]]
name = "tracker"
position = [-3.0, 1.0, 1.0]
camera = {}
behavior = { kind = "follow", target = "monkey" }
"#;

impl SceneFile {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid scene file {}", path.display()))
    }

    /// Build the scene tree and wrap it in an [`App`] ready to run.
    pub fn build(&self) -> anyhow::Result<App> {
        let mut scene = Scene::new();
        let mut ids: HashMap<String, EntityId> = HashMap::new();
        ids.insert("root".into(), scene.root());

        let mut follows = Vec::new();

        for decl in &self.entities {
            if ids.contains_key(&decl.name) {
                bail!("Duplicate entity name: {}", decl.name);
            }
            let parent = match &decl.parent {
                Some(name) => *ids
                    .get(name)
                    .with_context(|| {
                        format!("{}: parent {name} is not declared before it", decl.name)
                    })?,
                None => scene.root(),
            };

            let transform = decl.transform()?;
            let lens = decl.camera.as_ref().map(Camera::from);

            let id = match &decl.behavior {
                Some(BehaviorDecl::Fps { move_speed, look_sensitivity }) => {
                    let defaults = FpsSettings::default();
                    let settings = FpsSettings {
                        move_speed: move_speed.unwrap_or(defaults.move_speed),
                        look_sensitivity: look_sensitivity.unwrap_or(defaults.look_sensitivity),
                    };
                    let (body, head) = FpsCam::spawn(
                        &mut scene,
                        parent,
                        &decl.name,
                        transform,
                        lens.unwrap_or_default(),
                        settings,
                    )?;

                    let head_name = format!("{}.cam", decl.name);
                    if ids.insert(head_name.clone(), head).is_some() {
                        bail!("Duplicate entity name: {head_name}");
                    }
                    body
                }
                other => {
                    let id = scene.spawn(parent, decl.name.as_str(), transform)?;
                    if let Some(lens) = lens {
                        scene.set_camera(id, lens)?;
                    }
                    if let Some(BehaviorDecl::Follow { target, mode }) = other {
                        follows.push((id, target.clone(), *mode));
                    }
                    id
                }
            };

            if let Some(mesh) = &decl.mesh {
                scene.set_payload(id, Box::new(MeshPayload { mesh: mesh.clone() }))?;
            }
            ids.insert(decl.name.clone(), id);
        }

        // Targets may be declared after the camera that follows them.
        for (cam, target, mode) in follows {
            let Some(&target_id) = ids.get(&target) else {
                bail!("Follow camera targets unknown entity {target}");
            };
            scene.set_behavior(cam, Box::new(FollowCam::new(target_id).with_mode(mode.into())))?;
        }

        let mut app = App::new(scene);
        app.aspect = self.aspect;

        if let Some(name) = &self.active_camera {
            let id = *ids
                .get(name)
                .with_context(|| format!("Active camera {name} is not an entity"))?;
            if app.scene.get(id).and_then(|e| e.camera()).is_none() {
                bail!("Active camera {name} has no camera lens");
            }
            app.active_camera = Some(id);
        }

        log::debug!("built scene with {} entities", app.scene.len());
        Ok(app)
    }
}

impl EntityDecl {
    fn transform(&self) -> anyhow::Result<Transform> {
        let rotation = match &self.rotation {
            Some(r) => {
                let Some(axis) = Vec3::from_array(r.axis).try_normalize() else {
                    bail!("{}: rotation axis must not be zero", self.name);
                };
                Quat::from_axis_angle(axis, r.degrees.to_radians())
            }
            None => Quat::IDENTITY,
        };

        Ok(Transform::from_position(Vec3::from_array(self.position))
            .with_rotation(rotation)
            .with_scale(self.scale.to_vec3()))
    }
}

/// Stand-in for a GPU mesh: reports each draw through the log.
struct MeshPayload {
    mesh: String,
}

impl Drawable for MeshPayload {
    fn draw(&self, uniforms: &DrawUniforms) {
        let clip = uniforms.mvp().w_axis;
        log::debug!(
            "draw {}: clip-space origin ({:.3}, {:.3}, {:.3}, {:.3})",
            self.mesh,
            clip.x,
            clip.y,
            clip.z,
            clip.w
        );
    }
}

use std::fmt;

use glam::{Mat4, Quat, Vec3};
use thiserror::Error;

use followcam_math::{local_matrix, translation_of};

use crate::camera::Camera;
use crate::render::Drawable;
use crate::tick::Behavior;

/// Generational handle to an entity in a [`Scene`].
///
/// Handles are weak: once the entity is despawned the handle stops resolving,
/// even if its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("entity {0} does not exist")]
    DeadEntity(EntityId),
    #[error("entity {0} has no camera lens")]
    NotACamera(EntityId),
    #[error("the scene root cannot be despawned")]
    RootEntity,
}

/// Local pose relative to the parent entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// `Translate * Rotate * Scale`.
    pub fn matrix(&self) -> Mat4 {
        local_matrix(self.position, self.rotation, self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One node of the scene tree.
pub struct Entity {
    pub name: String,
    pub transform: Transform,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    pub(crate) payload: Option<Box<dyn Drawable>>,
    pub(crate) camera: Option<Camera>,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) parent_world: Mat4,
    pub(crate) world: Mat4,
}

impl Entity {
    fn new(name: String, parent: Option<EntityId>, transform: Transform) -> Self {
        Self {
            name,
            transform,
            parent,
            children: Vec::new(),
            payload: None,
            camera: None,
            behavior: None,
            parent_world: Mat4::IDENTITY,
            world: Mat4::IDENTITY,
        }
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn payload(&self) -> Option<&dyn Drawable> {
        self.payload.as_deref()
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    /// Parent's world matrix as of the last composition pass.
    pub fn parent_world_matrix(&self) -> Mat4 {
        self.parent_world
    }

    /// Local-to-world matrix as of the last composition pass.
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    pub fn world_position(&self) -> Vec3 {
        translation_of(&self.world)
    }
}

struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Arena-backed entity tree with a single root.
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: EntityId,
}

impl Scene {
    pub fn new() -> Self {
        let root = EntityId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                entity: Some(Entity::new("root".into(), None, Transform::IDENTITY)),
            }],
            free: Vec::new(),
            root,
        }
    }

    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Number of live entities, root included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SceneError> {
        self.get_mut(id).ok_or(SceneError::DeadEntity(id))
    }

    /// Create an entity as the last child of `parent`.
    pub fn spawn(
        &mut self,
        parent: EntityId,
        name: impl Into<String>,
        transform: Transform,
    ) -> Result<EntityId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::DeadEntity(parent));
        }

        let entity = Entity::new(name.into(), Some(parent), transform);
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entity = Some(entity);
                EntityId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entity: Some(entity),
                });
                EntityId {
                    index,
                    generation: 0,
                }
            }
        };

        self.entity_mut(parent)?.children.push(id);
        log::trace!("spawned {id} under {parent}");
        Ok(id)
    }

    /// Remove `id` and its whole subtree. Not valid during a traversal.
    pub fn despawn(&mut self, id: EntityId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootEntity);
        }
        let parent = self
            .get(id)
            .ok_or(SceneError::DeadEntity(id))?
            .parent;

        let doomed: Vec<EntityId> = self.iter_from(id).map(|(e, _)| e).collect();

        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|&c| c != id);
        }

        for e in &doomed {
            let slot = &mut self.slots[e.index as usize];
            slot.entity = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(e.index);
        }

        log::debug!("despawned {id} ({} entities)", doomed.len());
        Ok(())
    }

    pub fn set_payload(
        &mut self,
        id: EntityId,
        payload: Box<dyn Drawable>,
    ) -> Result<(), SceneError> {
        self.entity_mut(id)?.payload = Some(payload);
        Ok(())
    }

    pub fn set_camera(&mut self, id: EntityId, camera: Camera) -> Result<(), SceneError> {
        self.entity_mut(id)?.camera = Some(camera);
        Ok(())
    }

    pub fn set_behavior(
        &mut self,
        id: EntityId,
        behavior: Box<dyn Behavior>,
    ) -> Result<(), SceneError> {
        self.entity_mut(id)?.behavior = Some(behavior);
        Ok(())
    }

    pub(crate) fn take_behavior(&mut self, id: EntityId) -> Option<Box<dyn Behavior>> {
        self.get_mut(id)?.behavior.take()
    }

    /// Put a behavior back after its tick, unless the entity is gone or the
    /// behavior replaced itself meanwhile.
    pub(crate) fn restore_behavior(&mut self, id: EntityId, behavior: Box<dyn Behavior>) {
        if let Some(entity) = self.get_mut(id) {
            entity.behavior.get_or_insert(behavior);
        }
    }

    /// First entity with the given name, in pre-order.
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.iter().find(|(_, e)| e.name == name).map(|(id, _)| id)
    }

    /// World position as of the last composition pass.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.get(id).map(Entity::world_position)
    }

    /// Pre-order walk over the whole tree.
    pub fn iter(&self) -> Iter<'_> {
        self.iter_from(self.root)
    }

    /// Pre-order walk over the subtree rooted at `id`.
    pub fn iter_from(&self, id: EntityId) -> Iter<'_> {
        Iter {
            scene: self,
            stack: vec![(id, 0)],
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator yielding `(id, entity)`; siblings in insertion order.
pub struct Iter<'a> {
    scene: &'a Scene,
    stack: Vec<(EntityId, usize)>,
}

impl<'a> Iter<'a> {
    /// Same walk, also yielding each entity's depth below the starting node.
    pub fn with_depth(self) -> DepthIter<'a> {
        DepthIter(self)
    }

    fn next_with_depth(&mut self) -> Option<(EntityId, usize, &'a Entity)> {
        loop {
            let (id, depth) = self.stack.pop()?;
            let Some(entity) = self.scene.get(id) else {
                continue;
            };
            self.stack
                .extend(entity.children.iter().rev().map(|&c| (c, depth + 1)));
            return Some((id, depth, entity));
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (EntityId, &'a Entity);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_depth().map(|(id, _, e)| (id, e))
    }
}

pub struct DepthIter<'a>(Iter<'a>);

impl<'a> Iterator for DepthIter<'a> {
    type Item = (EntityId, usize, &'a Entity);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_with_depth()
    }
}

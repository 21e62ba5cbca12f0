use crate::input::InputState;
use crate::scene::{Entity, EntityId, Scene};

/// Per-frame update attached to an entity.
///
/// The behavior is detached from its entity for the duration of the call, so
/// it may freely read and mutate the scene through the context.
pub trait Behavior {
    fn tick(&mut self, ctx: &mut TickContext<'_>);
}

pub struct TickContext<'a> {
    pub scene: &'a mut Scene,
    /// The entity this behavior belongs to.
    pub entity: EntityId,
    pub delta_seconds: f32,
    pub input: &'a InputState,
}

impl TickContext<'_> {
    /// The behavior's own entity.
    pub fn this(&mut self) -> Option<&mut Entity> {
        self.scene.get_mut(self.entity)
    }
}

/// Run every entity's behavior once, pre-order from the root.
///
/// The visiting order is fixed before the first behavior runs: entities
/// spawned during the pass wait for the next frame, despawned ones are skipped.
pub fn tick_tree(scene: &mut Scene, delta_seconds: f32, input: &InputState) {
    let order: Vec<EntityId> = scene.iter().map(|(id, _)| id).collect();

    for id in order {
        let Some(mut behavior) = scene.take_behavior(id) else {
            continue;
        };

        let mut ctx = TickContext {
            scene: &mut *scene,
            entity: id,
            delta_seconds,
            input,
        };
        behavior.tick(&mut ctx);

        scene.restore_behavior(id, behavior);
    }
}

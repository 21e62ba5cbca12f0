use glam::Mat4;

use crate::scene::Scene;

/// Compute world matrices for every entity, top-down from the root.
///
/// Each entity stores the matrix it received from its parent and its own
/// `parent * Translate * Rotate * Scale`. Pass `Mat4::IDENTITY` for a true
/// root. The walk is pre-order with siblings in insertion order.
pub fn compute_world_matrices(scene: &mut Scene, parent_matrix: Mat4) {
    let mut stack = vec![(scene.root(), parent_matrix)];

    while let Some((id, parent)) = stack.pop() {
        let Some(entity) = scene.get_mut(id) else {
            continue;
        };

        let world = parent * entity.transform.matrix();
        entity.parent_world = parent;
        entity.world = world;

        stack.extend(entity.children().iter().rev().map(|&c| (c, world)));
    }
}

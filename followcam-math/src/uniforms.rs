use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-draw uniform block: model, view and model-view-projection matrices,
/// column-major, laid out for direct upload (`M`, `V`, `MVP`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub mvp: [[f32; 4]; 4],
}

impl DrawUniforms {
    /// Build the block for one draw. `view_projection` is `projection * view`,
    /// computed once per frame by the caller.
    pub fn new(model: Mat4, view: Mat4, view_projection: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            mvp: (view_projection * model).to_cols_array_2d(),
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    pub fn mvp(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.mvp)
    }
}

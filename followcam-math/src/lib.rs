//! Math glue for the followcam scene core.
//!
//! `glam` is the linear-algebra collaborator; this crate only adds the few
//! helpers the transform pipeline and the cameras share, plus the uniform
//! block layout a renderer uploads per draw call.

pub mod math;
pub mod uniforms;

pub use math::*;
pub use uniforms::DrawUniforms;

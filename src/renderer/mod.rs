//! Render passes: the environment backdrop and the model's meshes.

pub mod background;
pub mod mesh;
pub(crate) mod pipeline_util;

pub use background::BackgroundRenderer;
pub use mesh::MeshRenderer;

//! GPU resource management: device/surface setup, lighting and
//! environment bindings, shader composition and the depth target.

/// GPU lighting uniform, environment textures, and bind group management.
pub mod lighting;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth attachment.
pub mod texture;

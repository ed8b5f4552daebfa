use std::borrow::Cow;
use std::fmt;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

/// Indexed-mesh shader.
pub const MESH_SHADER: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/raster/mesh.wgsl"),
    file_path: "raster/mesh.wgsl",
};

/// Full-screen environment background shader.
pub const BACKGROUND_SHADER: ShaderSource = ShaderSource {
    source: include_str!("../../assets/shaders/screen/background.wgsl"),
    file_path: "screen/background.wgsl",
};

/// Shared modules, in dependency order.
const MODULES: [ShaderSource; 2] = [
    ShaderSource {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ShaderSource {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
];

/// An embedded WGSL source and the path used in diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource {
    /// WGSL text, possibly with `#import` directives.
    pub source: &'static str,
    /// Path reported in composition errors.
    pub file_path: &'static str,
}

/// A shader module failed to register or compose.
#[derive(Debug)]
pub struct ShaderError {
    /// Shader file that failed.
    pub file_path: String,
    /// Underlying naga-oil error.
    pub source: Box<ComposerError>,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to compose '{}': {}", self.file_path, self.source)
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared modules are registered at construction. Consuming shaders use
/// `#import meshview::camera::CameraUniform` and friends. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with the `meshview::camera` and
    /// `meshview::lighting` modules registered.
    ///
    /// # Errors
    ///
    /// [`ShaderError`] if a shared module fails to parse.
    pub fn new() -> Result<Self, ShaderError> {
        let mut composer = Composer::default();
        for m in &MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| ShaderError {
                    file_path: m.file_path.to_owned(),
                    source: Box::new(e),
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose `shader` into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// [`ShaderError`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        shader: ShaderSource,
    ) -> Result<wgpu::ShaderModule, ShaderError> {
        let naga_module = self.compose_naga(shader)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose into a `naga::Module` without a GPU device.
    ///
    /// # Errors
    ///
    /// [`ShaderError`] if composition fails.
    pub fn compose_naga(
        &mut self,
        shader: ShaderSource,
    ) -> Result<naga::Module, ShaderError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source,
                file_path: shader.file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| ShaderError {
                file_path: shader.file_path.to_owned(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in [MESH_SHADER, BACKGROUND_SHADER] {
            let module = composer
                .compose_naga(shader)
                .unwrap_or_else(|e| panic!("{e}"));
            let entry_points: Vec<_> = module
                .entry_points
                .iter()
                .map(|e| e.name.as_str())
                .collect();
            assert!(entry_points.contains(&"vs_main"), "{}", shader.file_path);
            assert!(entry_points.contains(&"fs_main"), "{}", shader.file_path);
        }
    }

    #[test]
    fn unknown_import_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga(ShaderSource {
                source: "#import meshview::missing::Thing\n@fragment fn fs_main() {}",
                file_path: "broken.wgsl",
            })
            .unwrap_err();
        assert_eq!(err.file_path, "broken.wgsl");
    }
}

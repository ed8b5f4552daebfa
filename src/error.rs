//! Crate-level error types.

use std::fmt;

use crate::camera::framing::FramingError;
use crate::gpu::render_context::RenderContextError;
use crate::gpu::shader_composer::ShaderError;
use crate::scene::environment::EnvironmentError;
use crate::scene::model::ModelError;

/// Errors produced by the meshview crate.
#[derive(Debug)]
pub enum ViewerError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to load a model file.
    ModelLoad(ModelError),
    /// Failed to load an environment map.
    EnvironmentLoad(EnvironmentError),
    /// Zoom-to-fit could not place the camera.
    Framing(FramingError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// WGSL composition failure.
    Shader(ShaderError),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::ModelLoad(e) => write!(f, "model load error: {e}"),
            Self::EnvironmentLoad(e) => {
                write!(f, "environment load error: {e}")
            }
            Self::Framing(e) => write!(f, "framing error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Shader(e) => write!(f, "shader error: {e}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::ModelLoad(e) => Some(e),
            Self::EnvironmentLoad(e) => Some(e),
            Self::Framing(e) => Some(e),
            Self::Shader(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<RenderContextError> for ViewerError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ModelError> for ViewerError {
    fn from(e: ModelError) -> Self {
        Self::ModelLoad(e)
    }
}

impl From<EnvironmentError> for ViewerError {
    fn from(e: EnvironmentError) -> Self {
        Self::EnvironmentLoad(e)
    }
}

impl From<FramingError> for ViewerError {
    fn from(e: FramingError) -> Self {
        Self::Framing(e)
    }
}

impl From<ShaderError> for ViewerError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn framing_error_keeps_source() {
        let err: ViewerError = FramingError::EmptyBounds.into();
        assert!(matches!(err, ViewerError::Framing(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("framing error"));
    }

    #[test]
    fn string_variants_have_no_source() {
        let err = ViewerError::OptionsParse("bad key".into());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "options parse error: bad key");
    }
}

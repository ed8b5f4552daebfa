//! Command-line interface of the `meshview` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::camera::framing::ViewAxis;
use crate::error::ViewerError;
use crate::options::Options;

/// View a 3D model, framed to fill the window.
#[derive(Debug, Clone, Parser)]
#[command(name = "meshview", version, about)]
pub struct Cli {
    /// Model file (.obj, .gltf or .glb).
    pub model: PathBuf,

    /// Equirectangular HDR environment map used for lighting.
    #[arg(long)]
    pub env: Option<PathBuf>,

    /// TOML options file; flags below override it.
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Axis the camera looks along.
    #[arg(long)]
    pub axis: Option<ViewAxis>,

    /// View from the negative side of the axis.
    #[arg(long)]
    pub back: bool,

    /// Vertical field of view in degrees.
    #[arg(long)]
    pub fov: Option<f32>,

    /// Close after this many frames.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Window title.
    #[arg(long, default_value = "meshview")]
    pub title: String,
}

impl Cli {
    /// Resolve the effective options: the options file (or defaults), then
    /// any flags given on the command line.
    ///
    /// # Errors
    ///
    /// Any error from reading or parsing the options file.
    pub fn resolve_options(&self) -> Result<Options, ViewerError> {
        let base = match &self.options {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        Ok(self.apply_overrides(base))
    }

    /// Apply command-line overrides on top of `options`.
    #[must_use]
    pub fn apply_overrides(&self, mut options: Options) -> Options {
        if let Some(axis) = self.axis {
            options.camera.view_axis = axis;
        }
        if self.back {
            options.camera.front = false;
        }
        if let Some(fov) = self.fov {
            options.camera.fovy = fov;
        }
        options
    }
}

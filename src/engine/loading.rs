//! Asset loading and framing for ViewerEngine

use std::path::PathBuf;

use super::ViewerEngine;
use crate::camera::framing::{CameraFramer, CameraPose, ViewAxis};
use crate::error::ViewerError;
use crate::scene::loader::LoadEvent;

impl ViewerEngine {
    /// Start loading a model on a background thread. The camera is framed
    /// on it once it arrives.
    ///
    /// # Errors
    ///
    /// [`ViewerError::ThreadSpawn`] if the loader thread cannot start.
    pub fn load_model(&mut self, path: impl Into<PathBuf>) -> Result<(), ViewerError> {
        self.loader.request_model(path)
    }

    /// Start loading an environment map on a background thread.
    ///
    /// # Errors
    ///
    /// [`ViewerError::ThreadSpawn`] if the loader thread cannot start.
    pub fn load_environment(
        &mut self,
        path: impl Into<PathBuf>,
    ) -> Result<(), ViewerError> {
        self.loader.request_environment(path)
    }

    /// Number of loads still in flight.
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.loader.pending()
    }

    /// Apply every finished load. Failures are logged; the viewer keeps
    /// rendering whatever it already has.
    pub fn poll_loads(&mut self) {
        for event in self.loader.poll() {
            match event {
                LoadEvent::Model { path, result: Ok(model) } => {
                    self.meshes.set_model(&self.context, &model);
                    let _ = self.scene.set_model(model);
                    let framing = self.framing;
                    if let Err(e) = self.frame_model(framing.axis, framing.front) {
                        log::warn!("could not frame {}: {e}", path.display());
                    }
                }
                LoadEvent::Environment { result: Ok(map), .. } => {
                    self.lighting.set_environment(&self.context, &map);
                    self.scene.set_environment(map);
                }
                LoadEvent::Model { path, result: Err(e) }
                | LoadEvent::Environment { path, result: Err(e) } => {
                    log::error!("failed to load {}: {e}", path.display());
                }
            }
        }
    }

    /// Fit the camera to the current model, looking along `axis` from the
    /// positive side when `front` is set. Remembers the choice for later
    /// re-framing.
    ///
    /// # Errors
    ///
    /// [`ViewerError::Framing`] if there is no model, its bounds are
    /// degenerate, or the field of view is invalid. The camera is left
    /// untouched.
    pub fn frame_model(
        &mut self,
        axis: ViewAxis,
        front: bool,
    ) -> Result<CameraPose, ViewerError> {
        let pose = CameraFramer::frame_object(&self.scene, &mut self.camera, axis, front)?;
        self.framing.axis = axis;
        self.framing.front = front;
        Ok(pose)
    }
}

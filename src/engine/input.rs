//! Input and command dispatch for ViewerEngine

use super::{ViewerCommand, ViewerEngine};
use crate::camera::controller::OrbitState;
use crate::camera::framing::{CameraFramer, FramingError, ViewAxis};
use crate::input::InputEvent;
use crate::options::CameraOptions;
use crate::scene::Scene;
use crate::util::render_loop::{RenderLoop, StopReason};

/// The view axis and side used whenever the model is (re-)framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramingChoice {
    /// Axis the camera looks along.
    pub axis: ViewAxis,
    /// `true` for the positive side of the axis.
    pub front: bool,
}

impl Default for FramingChoice {
    fn default() -> Self {
        Self {
            axis: ViewAxis::Z,
            front: true,
        }
    }
}

impl From<&CameraOptions> for FramingChoice {
    fn from(options: &CameraOptions) -> Self {
        Self {
            axis: options.view_axis,
            front: options.front,
        }
    }
}

impl FramingChoice {
    /// Adopt new camera options: the configured axis and side, orbit
    /// speeds and field of view. A loaded model is re-framed so it fills
    /// the new field of view; without one the configured clip planes
    /// apply.
    ///
    /// # Errors
    ///
    /// [`FramingError`] if the model cannot be re-framed. The options are
    /// still adopted.
    pub fn apply_camera_options(
        &mut self,
        options: &CameraOptions,
        orbit: &mut OrbitState,
        scene: &Scene,
    ) -> Result<(), FramingError> {
        *self = Self::from(options);
        orbit.apply_options(options);
        if scene.model().is_none() {
            orbit.camera.znear = options.znear;
            orbit.camera.zfar = options.zfar;
            return Ok(());
        }
        let _ = CameraFramer::frame_object(scene, orbit, self.axis, self.front)?;
        Ok(())
    }

    /// Run `command` against the camera-side state. GPU uniforms are
    /// refreshed by the next rendered frame.
    ///
    /// # Errors
    ///
    /// Framing commands fail with [`FramingError`] when the scene has
    /// nothing to frame; the camera and choice are left unchanged.
    pub fn apply(
        &mut self,
        command: ViewerCommand,
        orbit: &mut OrbitState,
        scene: &Scene,
        render_loop: &mut RenderLoop,
    ) -> Result<(), FramingError> {
        match command {
            ViewerCommand::RotateCamera { delta } => orbit.rotate(delta),
            ViewerCommand::PanCamera { delta } => orbit.pan(delta),
            ViewerCommand::Zoom { delta } => orbit.zoom(delta),
            ViewerCommand::FrameModel => {
                let _ = CameraFramer::frame_object(scene, orbit, self.axis, self.front)?;
            }
            ViewerCommand::FrameAxis { axis, front } => {
                let _ = CameraFramer::frame_object(scene, orbit, axis, front)?;
                self.axis = axis;
                self.front = front;
            }
            ViewerCommand::FlipSide => {
                let _ = CameraFramer::frame_object(scene, orbit, self.axis, !self.front)?;
                self.front = !self.front;
            }
            ViewerCommand::Quit => render_loop.stop(StopReason::Quit),
        }
        Ok(())
    }
}

impl ViewerEngine {
    /// Execute a single command. Framing failures are logged and leave the
    /// camera where it was.
    pub fn execute(&mut self, command: ViewerCommand) {
        if let Err(e) = self.framing.apply(
            command,
            &mut self.camera.state,
            &self.scene,
            &mut self.render_loop,
        ) {
            log::warn!("{command:?} ignored: {e}");
        }
    }

    /// Feed a platform-agnostic input event through the input processor
    /// and execute the resulting command, if any.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        let command = self.input.handle_event(event)?;
        self.execute(command);
        Some(command)
    }

    /// Look up `key` (a winit `KeyCode` name like `"KeyF"`) in the key
    /// bindings and execute the bound command.
    pub fn handle_key(&mut self, key: &str) -> Option<ViewerCommand> {
        let command = self.input.handle_key_press(key)?;
        self.execute(command);
        Some(command)
    }

    /// The axis and side used for framing.
    #[must_use]
    pub fn framing(&self) -> FramingChoice {
        self.framing
    }
}

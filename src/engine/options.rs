//! Options methods for ViewerEngine

use super::ViewerEngine;
use crate::gpu::lighting::LightingUniform;
use crate::options::Options;

impl ViewerEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the scene, lighting, camera, input
    /// and frame pacing.
    pub fn apply_options(&mut self) {
        self.scene.apply_options(&self.options);
        self.apply_lighting();
        self.apply_camera();
        self.input
            .set_key_bindings(self.options.keybindings.clone());
        self.render_loop
            .set_target_fps(self.options.display.target_fps);
    }

    /// Push lighting options to the GPU uniform.
    fn apply_lighting(&mut self) {
        self.lighting.uniform = LightingUniform::new(&self.scene.light, &self.options.lighting);
        self.lighting.update_gpu(&self.context.queue);
    }

    /// Push camera options to the controller and the framing choice,
    /// re-framing a loaded model for the new view axis and field of view.
    fn apply_camera(&mut self) {
        if let Err(e) = self.framing.apply_camera_options(
            &self.options.camera,
            &mut self.camera.state,
            &self.scene,
        ) {
            log::warn!("could not re-frame after options change: {e}");
        }
    }

    /// Load a named options preset from `dir` and apply it. Returns `true`
    /// on success.
    pub fn load_preset(&mut self, dir: &std::path::Path, name: &str) -> bool {
        let path = dir.join(format!("{name}.toml"));
        match Options::load(&path) {
            Ok(options) => {
                log::info!("loaded options preset '{name}'");
                self.set_options(options);
                true
            }
            Err(e) => {
                log::error!("failed to load preset '{name}': {e}");
                false
            }
        }
    }
}

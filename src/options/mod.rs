//! Viewer options with TOML preset support.
//!
//! Camera, lighting, display and key-binding settings live here. Options
//! serialize to/from TOML; presets are plain `.toml` files in a directory.

mod camera;
mod display;
mod lighting;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::{parse_hex_color, DisplayOptions};
pub use lighting::LightingOptions;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection, control and framing parameters.
    pub camera: CameraOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Background, tone mapping and frame pacing.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    pub keybindings: KeyBindings,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`ViewerError::Io`] if the file cannot be read,
    /// [`ViewerError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// [`ViewerError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Serialization or I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::framing::ViewAxis;
    use crate::engine::ViewerCommand;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[camera]
fovy = 50.0
view_axis = "x"

[display]
background = "#202020"
"##;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 50.0);
        assert_eq!(opts.camera.view_axis, ViewAxis::X);
        assert!(opts.camera.front);
        // Everything else should be default
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.display.exposure, 2.0);
        assert_eq!(opts.lighting, LightingOptions::default());
    }

    #[test]
    fn defaults_match_viewer_startup() {
        let opts = Options::default();
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.camera.zfar, 100.0);
        assert_eq!(opts.lighting.light_position, [-1.0, 2.0, 4.0]);
        assert_eq!(opts.display.background_linear(), [1.0, 1.0, 1.0]);
        assert!(!opts.display.environment_as_background);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Options::from_toml("[camera]\nfovy = \"wide\"").unwrap_err();
        assert!(matches!(err, ViewerError::OptionsParse(_)));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#000000"), Some([0.0; 3]));
        assert_eq!(parse_hex_color("FFFFFF"), Some([1.0; 3]));
        let mid = parse_hex_color("#808080").unwrap();
        assert!((mid[0] - 0.2159).abs() < 1e-3);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyF"), Some(ViewerCommand::FrameModel));
        assert_eq!(opts.keybindings.lookup("Escape"), Some(ViewerCommand::Quit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), Some(ViewerCommand::FrameAxis {
            axis: ViewAxis::Z,
            front: true,
        }));
        assert_eq!(opts.keybindings.lookup("KeyP"), None);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir().join("meshview-presets-test");
        let _ = std::fs::remove_dir_all(&dir);
        let mut opts = Options::default();
        opts.display.exposure = 1.25;
        opts.save(&dir.join("bright.toml")).unwrap();
        Options::default().save(&dir.join("a_default.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["a_default", "bright"]);
        let loaded = Options::load(&dir.join("bright.toml")).unwrap();
        assert_eq!(loaded, opts);
    }
}

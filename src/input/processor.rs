//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! held buttons, modifier keys) and the key-binding map. It is the only
//! thing between raw window events and
//! [`ViewerEngine::execute`](crate::ViewerEngine::execute).

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::camera::framing::ViewAxis;
use crate::engine::ViewerCommand;

/// Maps physical key strings to [`ViewerCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyF"`, `"Escape"`, etc.
///
/// Only parameterless commands can be key-bound. Camera drags and zoom
/// come from the mouse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the key-bindable subset of [`ViewerCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Re-fit the camera to the model.
    FrameModel,
    /// Fit looking along +X.
    FrameX,
    /// Fit looking along +Y.
    FrameY,
    /// Fit looking along +Z.
    FrameZ,
    /// Fit from the opposite side.
    FlipSide,
    /// Close the viewer.
    Quit,
}

impl KeyCommandTag {
    fn to_command(self) -> ViewerCommand {
        let frame = |axis| ViewerCommand::FrameAxis { axis, front: true };
        match self {
            Self::FrameModel => ViewerCommand::FrameModel,
            Self::FrameX => frame(ViewAxis::X),
            Self::FrameY => frame(ViewAxis::Y),
            Self::FrameZ => frame(ViewAxis::Z),
            Self::FlipSide => ViewerCommand::FlipSide,
            Self::Quit => ViewerCommand::Quit,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyF".into(), KeyCommandTag::FrameModel),
            ("KeyX".into(), KeyCommandTag::FrameX),
            ("KeyY".into(), KeyCommandTag::FrameY),
            ("KeyZ".into(), KeyCommandTag::FrameZ),
            ("KeyB".into(), KeyCommandTag::FlipSide),
            ("Escape".into(), KeyCommandTag::Quit),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewerCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key`, replacing any previous binding for it.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`ViewerCommand`]s.
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// if let Some(cmd) = input_processor.handle_key_press("KeyF") {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Default)]
pub struct InputProcessor {
    /// Last cursor position; `None` until the first move.
    cursor: Option<Vec2>,
    left_pressed: bool,
    right_pressed: bool,
    shift_pressed: bool,
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Replace the key bindings (e.g. after options reload).
    pub fn set_key_bindings(&mut self, key_bindings: KeyBindings) {
        self.key_bindings = key_bindings;
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(Vec2::new(x, y)),
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left_pressed = pressed,
                    MouseButton::Right => self.right_pressed = pressed,
                    MouseButton::Middle => {}
                }
                None
            }
            InputEvent::Scroll { delta } => Some(ViewerCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<ViewerCommand> {
        let delta = self.cursor.map_or(Vec2::ZERO, |last| pos - last);
        self.cursor = Some(pos);

        if delta == Vec2::ZERO {
            return None;
        }
        if self.right_pressed || (self.left_pressed && self.shift_pressed) {
            return Some(ViewerCommand::PanCamera { delta });
        }
        if self.left_pressed {
            return Some(ViewerCommand::RotateCamera { delta });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor, button: MouseButton, pressed: bool) {
        assert!(p.handle_event(InputEvent::MouseButton { button, pressed }).is_none());
    }

    fn move_to(p: &mut InputProcessor, x: f32, y: f32) -> Option<ViewerCommand> {
        p.handle_event(InputEvent::CursorMoved { x, y })
    }

    #[test]
    fn hover_without_buttons_does_nothing() {
        let mut p = InputProcessor::new();
        assert_eq!(move_to(&mut p, 10.0, 10.0), None);
        assert_eq!(move_to(&mut p, 20.0, 15.0), None);
        assert_eq!(p.mouse_pos(), Some(Vec2::new(20.0, 15.0)));
    }

    #[test]
    fn left_drag_rotates() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 10.0, 10.0);
        press(&mut p, MouseButton::Left, true);
        assert_eq!(
            move_to(&mut p, 14.0, 7.0),
            Some(ViewerCommand::RotateCamera {
                delta: Vec2::new(4.0, -3.0),
            })
        );
        press(&mut p, MouseButton::Left, false);
        assert_eq!(move_to(&mut p, 20.0, 7.0), None);
    }

    #[test]
    fn shift_left_and_right_drag_pan() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 0.0, 0.0);
        assert!(p.handle_event(InputEvent::ModifiersChanged { shift: true }).is_none());
        press(&mut p, MouseButton::Left, true);
        assert!(matches!(move_to(&mut p, 1.0, 1.0), Some(ViewerCommand::PanCamera { .. })));
        press(&mut p, MouseButton::Left, false);
        let _ = p.handle_event(InputEvent::ModifiersChanged { shift: false });

        press(&mut p, MouseButton::Right, true);
        assert!(matches!(move_to(&mut p, 3.0, 1.0), Some(ViewerCommand::PanCamera { .. })));
    }

    #[test]
    fn first_move_after_press_has_no_jump() {
        let mut p = InputProcessor::new();
        press(&mut p, MouseButton::Left, true);
        assert_eq!(move_to(&mut p, 300.0, 200.0), None);
    }

    #[test]
    fn scroll_zooms() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: -2.0 }),
            Some(ViewerCommand::Zoom { delta: -2.0 })
        );
    }

    #[test]
    fn rebinding_keys() {
        let mut bindings = KeyBindings::default();
        bindings.bind("KeyQ", KeyCommandTag::Quit);
        let p = InputProcessor::with_key_bindings(bindings);
        assert_eq!(p.handle_key_press("KeyQ"), Some(ViewerCommand::Quit));
        assert_eq!(p.handle_key_press("KeyB"), Some(ViewerCommand::FlipSide));
        assert_eq!(p.handle_key_press("KeyK"), None);
    }
}

//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture or a programmatic call, is a `ViewerCommand`. Consumers build
//! commands and pass them to
//! [`ViewerEngine::execute`](super::ViewerEngine::execute).

use glam::Vec2;

use crate::camera::framing::ViewAxis;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(ViewerCommand::Zoom { delta: 1.0 });
/// engine.execute(ViewerCommand::FrameAxis { axis: ViewAxis::X, front: false });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Rotate the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of mouse movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    // ── Framing ─────────────────────────────────────────────────────
    /// Re-fit the camera to the model along the current view axis.
    FrameModel,

    /// Fit the camera to the model looking along `axis`.
    FrameAxis {
        /// Axis the camera is placed on.
        axis: ViewAxis,
        /// Positive side of the axis when `true`.
        front: bool,
    },

    /// Re-fit from the opposite side of the current view axis.
    FlipSide,

    // ── Lifecycle ───────────────────────────────────────────────────
    /// Stop the render loop and close the viewer.
    Quit,
}

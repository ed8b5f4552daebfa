use serde::{Deserialize, Serialize};

use crate::camera::framing::ViewAxis;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection, control and initial framing parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane before any model is framed.
    pub znear: f32,
    /// Far clipping plane before any model is framed.
    pub zfar: f32,
    /// Radians of orbit per pixel dragged.
    pub rotate_speed: f32,
    /// Pan distance per pixel, as a fraction of the orbit distance.
    pub pan_speed: f32,
    /// Fractional distance change per scroll line.
    pub zoom_speed: f32,
    /// Axis the camera looks along when a model is framed.
    pub view_axis: ViewAxis,
    /// View from the positive side of `view_axis`.
    pub front: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 100.0,
            rotate_speed: 0.01,
            pan_speed: 0.002,
            zoom_speed: 0.1,
            view_axis: ViewAxis::Z,
            front: true,
        }
    }
}

//! Zoom-to-fit camera framing.
//!
//! Places the camera on a principal axis through the object's bounding-box
//! center, at the distance where the bounding sphere exactly subtends the
//! vertical field of view. Clip planes scale with the object so that depth
//! precision holds for tiny and huge models alike.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::bounds::{Bounded, BoundingBox};

/// Ratio between the bounding-box diagonal and the near/far clip distances.
pub const CLIP_RATIO: f32 = 100.0;

/// Principal axis the camera is offset along.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewAxis {
    /// World X axis.
    X,
    /// World Y axis.
    Y,
    /// World Z axis.
    #[default]
    Z,
}

impl ViewAxis {
    /// Unit offset along this axis; negated when `front` is false.
    #[must_use]
    pub fn offset(self, front: bool) -> Vec3 {
        let unit = match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        };
        if front {
            unit
        } else {
            -unit
        }
    }
}

impl fmt::Display for ViewAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(s)
    }
}

impl FromStr for ViewAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            other => Err(format!("unknown view axis '{other}' (expected x, y or z)")),
        }
    }
}

/// Camera placement produced by framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Point the camera looks at (and the orbit pivot).
    pub look_at: Vec3,
}

impl CameraPose {
    /// Unit vector from the look-at point toward the eye.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (self.position - self.look_at).normalize_or_zero()
    }

    /// Distance between eye and look-at point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }
}

/// Reasons a framing request is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramingError {
    /// The object has no geometry to frame.
    EmptyBounds,
    /// The bounding box has zero (or non-finite) diagonal.
    DegenerateBounds {
        /// Offending diagonal length.
        diagonal: f32,
    },
    /// Field of view outside the open interval (0, 180) degrees.
    InvalidFieldOfView {
        /// Offending vertical field of view in degrees.
        fovy: f32,
    },
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBounds => write!(f, "object has no geometry to frame"),
            Self::DegenerateBounds { diagonal } => {
                write!(f, "bounding box is degenerate (diagonal {diagonal})")
            }
            Self::InvalidFieldOfView { fovy } => write!(
                f,
                "field of view {fovy} deg must lie strictly between 0 and 180"
            ),
        }
    }
}

impl std::error::Error for FramingError {}

/// A camera that can receive a framing pose.
///
/// Implementors must expose their vertical field of view and apply a pose by
/// moving the eye, updating the clip planes, looking at the pose target, and
/// (for orbiting rigs) moving the pivot.
pub trait FramingRig {
    /// Vertical field of view in degrees.
    fn fovy(&self) -> f32;
    /// Apply the pose to the camera and its pivot.
    fn apply_pose(&mut self, pose: &CameraPose);
}

/// Compute the pose that frames `bounds` along `axis`.
///
/// # Errors
///
/// Returns [`FramingError`] when the box has zero extent or the field of view
/// is not strictly inside (0, 180) degrees.
pub fn compute_pose(
    bounds: &BoundingBox,
    fovy_degrees: f32,
    axis: ViewAxis,
    front: bool,
) -> Result<CameraPose, FramingError> {
    if !fovy_degrees.is_finite() || fovy_degrees <= 0.0 || fovy_degrees >= 180.0 {
        return Err(FramingError::InvalidFieldOfView { fovy: fovy_degrees });
    }

    let diagonal = bounds.diagonal();
    // Tiny extents can still underflow to a zero diagonal.
    if bounds.is_point() || !diagonal.is_finite() || diagonal <= 0.0 {
        return Err(FramingError::DegenerateBounds { diagonal });
    }
    let center = bounds.center();

    let provisional = center + axis.offset(front);

    let half_extent = diagonal * 0.5;
    let half_fov = (fovy_degrees * 0.5).to_radians();
    let distance = half_extent / half_fov.tan();
    let direction = (provisional - center).normalize();

    Ok(CameraPose {
        position: center + direction * distance,
        near: diagonal / CLIP_RATIO,
        far: diagonal * CLIP_RATIO,
        look_at: center,
    })
}

/// Zoom-to-fit entry points.
pub struct CameraFramer;

impl CameraFramer {
    /// Frame `object` with `rig`, offsetting the camera along `axis`.
    ///
    /// On success the rig has been moved and the applied pose is returned.
    /// On failure the rig is left untouched.
    ///
    /// # Errors
    ///
    /// [`FramingError::EmptyBounds`] if the object has no geometry, or any
    /// error from [`compute_pose`].
    pub fn frame_object<O, R>(
        object: &O,
        rig: &mut R,
        axis: ViewAxis,
        front: bool,
    ) -> Result<CameraPose, FramingError>
    where
        O: Bounded + ?Sized,
        R: FramingRig + ?Sized,
    {
        let bounds = object.bounding_box().ok_or(FramingError::EmptyBounds)?;
        let pose = compute_pose(&bounds, rig.fovy(), axis, front)?;
        rig.apply_pose(&pose);
        log::debug!(
            "framed {:?} along {axis}{}: eye {:?}, near {}, far {}",
            bounds.center(),
            if front { "+" } else { "-" },
            pose.position,
            pose.near,
            pose.far
        );
        Ok(pose)
    }
}

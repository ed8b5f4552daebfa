//! View frustum for culling.
//!
//! Extracts frustum planes from the view-projection matrix and tests
//! bounding spheres and boxes against them.

use glam::{Mat4, Vec3, Vec4};

use crate::scene::bounds::BoundingBox;

/// A plane `n · p + d = 0` with unit normal pointing into the frustum.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed distance from origin.
    pub distance: f32,
}

impl Plane {
    fn from_row(row: Vec4) -> Self {
        let len = row.truncate().length();
        if len > 0.0 {
            Self {
                normal: row.truncate() / len,
                distance: row.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from point to plane (positive = inside).
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// View frustum consisting of 6 planes.
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Six clipping planes: left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract inward-facing planes from a view-projection matrix
    /// (Gribb/Hartmann, right-handed, [0,1] depth).
    #[must_use]
    pub fn from_view_projection(vp: Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        Self {
            planes: [
                Plane::from_row(row3 + row0),
                Plane::from_row(row3 - row0),
                Plane::from_row(row3 + row1),
                Plane::from_row(row3 - row1),
                // [0,1] depth: near plane is just row2
                Plane::from_row(row2),
                Plane::from_row(row3 - row2),
            ],
        }
    }

    /// Conservative box test: `false` only when the box is fully outside one
    /// plane.
    #[must_use]
    pub fn intersects_box(&self, bounds: &BoundingBox) -> bool {
        self.planes.iter().all(|plane| {
            // Corner furthest along the plane normal.
            let positive = Vec3::select(
                plane.normal.cmpge(Vec3::ZERO),
                bounds.max,
                bounds.min,
            );
            plane.distance_to_point(positive) >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::core::Camera;
    use crate::camera::framing::{compute_pose, ViewAxis};

    fn looking_down_z() -> Frustum {
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        Frustum::from_view_projection(proj * view)
    }

    #[test]
    fn box_behind_the_eye_is_culled() {
        let frustum = looking_down_z();
        let at_origin = BoundingBox::new(Vec3::ZERO, Vec3::ZERO);
        let behind = BoundingBox::from_center_size(Vec3::new(0.0, 0.0, 20.0), Vec3::ONE);
        assert!(frustum.intersects_box(&at_origin));
        assert!(!frustum.intersects_box(&behind));
    }

    #[test]
    fn box_culling() {
        let frustum = looking_down_z();
        let visible = BoundingBox::from_center_size(Vec3::ZERO, Vec3::ONE);
        let hidden = BoundingBox::from_center_size(Vec3::new(500.0, 0.0, 0.0), Vec3::ONE);
        assert!(frustum.intersects_box(&visible));
        assert!(!frustum.intersects_box(&hidden));
    }

    #[test]
    fn framed_half_extent_spans_vertical_view() {
        let bounds =
            BoundingBox::from_center_size(Vec3::new(1.0, -2.0, 3.0), Vec3::new(4.0, 1.0, 2.0));
        let pose = compute_pose(&bounds, 60.0, ViewAxis::Z, true).unwrap();
        let camera = Camera {
            eye: pose.position,
            target: pose.look_at,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 60.0,
            znear: pose.near,
            zfar: pose.far,
        };
        let frustum = Frustum::from_view_projection(camera.build_matrix());
        let radius = bounds.radius();

        // The radius spans half the view height at the center's depth, so
        // the top and bottom planes sit at r * cos(fov / 2) from the center.
        let expected = radius * 30.0_f32.to_radians().cos();
        for plane in &frustum.planes[2..4] {
            let d = plane.distance_to_point(bounds.center());
            assert!((d - expected).abs() / radius < 1e-3, "d={d} r={radius}");
        }
        assert!(frustum.intersects_box(&bounds));
    }
}

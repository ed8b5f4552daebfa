use glam::{Mat3, Quat, Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::camera::framing::{CameraPose, FramingRig};
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// Orbit camera math: orientation, distance and pivot around which the eye
/// rotates. Holds no GPU resources.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    orientation: Quat,
    distance: f32,
    target: Vec3,
    /// The camera driven by this orbit.
    pub camera: Camera,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl OrbitState {
    /// Orbit whose camera starts at `eye`, looking at `target`.
    #[must_use]
    pub fn new(camera: Camera, options: &CameraOptions) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.length().max(f32::EPSILON);
        let orientation = orientation_for(offset / distance);
        let mut state = Self {
            orientation,
            distance,
            target: camera.target,
            camera,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
        };
        state.camera.up = state.orientation * Vec3::Y;
        state
    }

    /// Current pivot point.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the pivot, keeping orientation and distance.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_camera_pos();
    }

    /// Distance from eye to pivot.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Copy interaction speeds and field of view from options.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.rotate_speed = options.rotate_speed;
        self.pan_speed = options.pan_speed;
        self.zoom_speed = options.zoom_speed;
        self.camera.fovy = options.fovy;
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.target + (dir * self.distance);
        self.camera.target = self.target;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Update aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit around the pivot by a screen-space drag delta (pixels).
    pub fn rotate(&mut self, delta: Vec2) {
        // Horizontal rotation around camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal_rotation = Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal_rotation * self.orientation;

        // Vertical rotation around camera's right vector (after horizontal
        // rotation)
        let right = self.orientation * Vec3::X;
        let vertical_rotation = Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = (vertical_rotation * self.orientation).normalize();

        self.update_camera_pos();
    }

    /// Slide eye and pivot in the view plane. Speed scales with distance so
    /// panning feels the same at any model size.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let scale = self.pan_speed * self.distance;

        self.target += right * (-delta.x * scale) + up * (delta.y * scale);
        self.update_camera_pos();
    }

    /// Dolly toward (positive) or away from (negative) the pivot.
    pub fn zoom(&mut self, delta: f32) {
        let min = self.camera.znear * 2.0;
        let max = (self.camera.zfar * 0.5).max(min);
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(min, max);
        self.update_camera_pos();
    }
}

impl FramingRig for OrbitState {
    fn fovy(&self) -> f32 {
        self.camera.fovy
    }

    fn apply_pose(&mut self, pose: &CameraPose) {
        let direction = pose.direction();
        if direction != Vec3::ZERO {
            self.orientation = orientation_for(direction);
        }
        self.distance = pose.distance();
        self.target = pose.look_at;

        self.camera.eye = pose.position;
        self.camera.target = pose.look_at;
        self.camera.up = self.orientation * Vec3::Y;
        self.camera.znear = pose.near;
        self.camera.zfar = pose.far;
    }
}

/// Orientation whose local +Z points along `back` (pivot → eye) with world
/// +Y kept as screen-up where possible. Looking straight down or up uses -Z
/// or +Z as screen-up instead.
fn orientation_for(back: Vec3) -> Quat {
    let hint = if back.y.abs() > 0.999 {
        Vec3::new(0.0, 0.0, -back.y.signum())
    } else {
        Vec3::Y
    };
    let right = hint.cross(back).normalize();
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize()
}

/// Orbital camera controller: orbit state plus its GPU uniform and bind
/// group.
pub struct OrbitController {
    /// Pure orbit state (camera, pivot, orientation).
    pub state: OrbitState,
    /// CPU copy of the camera uniform.
    pub uniform: CameraUniform,
    /// Uniform buffer bound at group 0.
    pub buffer: wgpu::Buffer,
    /// Layout of the camera bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Camera bind group.
    pub bind_group: wgpu::BindGroup,
}

impl OrbitController {
    /// Create the controller and its GPU resources.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let camera = Camera {
            aspect: context.config.width as f32
                / context.config.height.max(1) as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
            ..Camera::default()
        };
        let state = OrbitState::new(camera, options);

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&state.camera);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group"),
        });

        Self {
            state,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// The controlled camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.state.camera
    }

    /// Recompute the uniform and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, exposure: f32) {
        self.uniform.update_view_proj(&self.state.camera);
        self.uniform.exposure = exposure;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

impl FramingRig for OrbitController {
    fn fovy(&self) -> f32 {
        self.state.fovy()
    }

    fn apply_pose(&mut self, pose: &CameraPose) {
        self.state.apply_pose(pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::framing::{CameraFramer, ViewAxis};
    use crate::scene::bounds::BoundingBox;

    fn orbit() -> OrbitState {
        OrbitState::new(Camera::default(), &CameraOptions::default())
    }

    #[test]
    fn initial_state_matches_camera() {
        let o = orbit();
        assert!((o.distance() - 2.0).abs() < 1e-6);
        assert_eq!(o.target(), Vec3::ZERO);
        assert!((o.camera.up - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn rotate_keeps_distance_to_pivot() {
        let mut o = orbit();
        o.rotate(Vec2::new(40.0, -25.0));
        assert!((o.camera.eye.distance(o.target()) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_pivot_and_eye_together() {
        let mut o = orbit();
        let before = o.camera.eye - o.target();
        o.pan(Vec2::new(10.0, 5.0));
        assert_ne!(o.target(), Vec3::ZERO);
        assert!(((o.camera.eye - o.target()) - before).length() < 1e-5);
    }

    #[test]
    fn zoom_is_clamped_by_clip_planes() {
        let mut o = orbit();
        for _ in 0..200 {
            o.zoom(5.0);
        }
        assert!(o.distance() >= o.camera.znear * 2.0 - 1e-6);
        for _ in 0..200 {
            o.zoom(-5.0);
        }
        assert!(o.distance() <= o.camera.zfar * 0.5 + 1e-3);
    }

    #[test]
    fn framing_syncs_pivot_and_look_at() {
        let mut o = orbit();
        let b = BoundingBox::new(Vec3::new(3.0, 4.0, 5.0), Vec3::new(5.0, 8.0, 6.0));
        let pose = CameraFramer::frame_object(&b, &mut o, ViewAxis::X, true)
            .unwrap();
        assert_eq!(o.target(), b.center());
        assert_eq!(o.camera.target, b.center());
        assert_eq!(o.camera.eye, pose.position);
        assert_eq!(o.camera.znear, pose.near);
        assert_eq!(o.camera.zfar, pose.far);

        // Orbiting afterwards pivots around the framed center.
        o.rotate(Vec2::new(30.0, 0.0));
        assert!((o.camera.eye.distance(b.center()) - pose.distance()).abs() < 1e-3);
    }

    #[test]
    fn top_down_framing_has_valid_up() {
        let mut o = orbit();
        let b = BoundingBox::from_center_size(Vec3::ZERO, Vec3::ONE);
        let _ = CameraFramer::frame_object(&b, &mut o, ViewAxis::Y, true).unwrap();
        assert!(o.camera.up.is_finite());
        assert!(o.camera.up.dot(o.camera.forward()).abs() < 1e-5);
        assert!(o.camera.build_view().is_finite());
    }
}

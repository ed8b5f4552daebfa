//! Property tests for zoom-to-fit camera framing.

use glam::Vec3;
use meshview::camera::controller::OrbitState;
use meshview::camera::core::Camera;
use meshview::options::CameraOptions;
use meshview::{Bounded, BoundingBox, CameraFramer, FramingError, ViewAxis};

struct Boxed(Option<BoundingBox>);

impl Bounded for Boxed {
    fn bounding_box(&self) -> Option<BoundingBox> {
        self.0
    }
}

fn boxed(center: Vec3, size: Vec3) -> Boxed {
    Boxed(Some(BoundingBox::from_center_size(center, size)))
}

fn orbit(fovy: f32) -> OrbitState {
    let options = CameraOptions {
        fovy,
        ..CameraOptions::default()
    };
    let camera = Camera {
        fovy,
        ..Camera::default()
    };
    OrbitState::new(camera, &options)
}

fn assert_close(actual: f32, expected: f32, rel: f32) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= rel * scale,
        "{actual} differs from {expected}"
    );
}

#[test]
fn axis_and_side_place_the_eye() {
    let center = Vec3::new(3.0, -2.0, 5.0);
    let object = boxed(center, Vec3::new(1.0, 4.0, 2.0));

    for (axis, unit) in [(ViewAxis::X, Vec3::X), (ViewAxis::Y, Vec3::Y), (ViewAxis::Z, Vec3::Z)] {
        let mut rig = orbit(60.0);
        let _ = CameraFramer::frame_object(&object, &mut rig, axis, true).unwrap();
        assert!((rig.camera.eye - center).dot(unit) > 0.0, "{axis} front");

        let _ = CameraFramer::frame_object(&object, &mut rig, axis, false).unwrap();
        assert!((rig.camera.eye - center).dot(unit) < 0.0, "{axis} back");

        let off_axis = (rig.camera.eye - center) - unit * (rig.camera.eye - center).dot(unit);
        assert!(off_axis.length() < 1e-4);
    }
}

#[test]
fn distance_fits_the_diagonal() {
    for fovy in [20.0_f32, 45.0, 75.0, 120.0, 170.0] {
        let size = Vec3::new(0.5, 7.0, 3.0);
        let object = boxed(Vec3::new(-1.0, 0.25, 9.0), size);
        let mut rig = orbit(fovy);
        let pose = CameraFramer::frame_object(&object, &mut rig, ViewAxis::Y, true).unwrap();

        let expected = (size.length() * 0.5) / (fovy * 0.5).to_radians().tan();
        assert_close(pose.distance(), expected, 1e-5);
        assert_close(rig.distance(), expected, 1e-5);
    }
}

#[test]
fn clip_planes_scale_with_the_diagonal() {
    let size = Vec3::new(10.0, 0.1, 3.0);
    let object = boxed(Vec3::ZERO, size);
    let mut rig = orbit(75.0);
    let pose = CameraFramer::frame_object(&object, &mut rig, ViewAxis::Z, true).unwrap();

    let diagonal = size.length();
    assert_close(pose.near, diagonal / 100.0, 1e-6);
    assert_close(pose.far, diagonal * 100.0, 1e-6);
    assert_eq!(rig.camera.znear, pose.near);
    assert_eq!(rig.camera.zfar, pose.far);
}

#[test]
fn look_at_and_pivot_track_the_center() {
    let center = Vec3::new(-4.0, 12.0, 0.5);
    let object = boxed(center, Vec3::splat(3.0));
    let mut rig = orbit(50.0);
    rig.set_target(Vec3::new(100.0, 100.0, 100.0));

    let _ = CameraFramer::frame_object(&object, &mut rig, ViewAxis::X, false).unwrap();
    assert!((rig.camera.target - center).length() < 1e-5);
    assert!((rig.target() - center).length() < 1e-5);
}

#[test]
fn framing_twice_is_idempotent() {
    let object = boxed(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
    let mut rig = orbit(75.0);

    let first = CameraFramer::frame_object(&object, &mut rig, ViewAxis::Z, true).unwrap();
    let after_first = rig.clone();
    let second = CameraFramer::frame_object(&object, &mut rig, ViewAxis::Z, true).unwrap();
    assert_eq!(first, second);
    assert!((after_first.camera.eye - rig.camera.eye).length() < 1e-5);
    assert!((after_first.camera.up - rig.camera.up).length() < 1e-5);
}

#[test]
fn unit_cube_reference_pose() {
    let object = boxed(Vec3::ZERO, Vec3::splat(2.0));
    let mut rig = orbit(75.0);
    let pose = CameraFramer::frame_object(&object, &mut rig, ViewAxis::Z, true).unwrap();

    assert_close(pose.near, 0.034_641, 1e-4);
    assert_close(pose.far, 346.41, 1e-4);
    assert!(pose.position.x.abs() < 1e-5);
    assert!(pose.position.y.abs() < 1e-5);
    assert!((pose.position.z - 2.2573).abs() < 1e-3);
}

#[test]
fn failures_leave_the_camera_alone() {
    let mut rig = orbit(75.0);
    let before = rig.clone();

    let empty = Boxed(None);
    assert_eq!(
        CameraFramer::frame_object(&empty, &mut rig, ViewAxis::Z, true),
        Err(FramingError::EmptyBounds)
    );

    let point = boxed(Vec3::ONE, Vec3::ZERO);
    assert!(matches!(
        CameraFramer::frame_object(&point, &mut rig, ViewAxis::Z, true),
        Err(FramingError::DegenerateBounds { .. })
    ));

    let mut wide = orbit(180.0);
    let wide_before = wide.clone();
    let cube = boxed(Vec3::ZERO, Vec3::ONE);
    assert!(matches!(
        CameraFramer::frame_object(&cube, &mut wide, ViewAxis::Z, true),
        Err(FramingError::InvalidFieldOfView { .. })
    ));

    assert_eq!(rig, before);
    assert_eq!(wide, wide_before);
}

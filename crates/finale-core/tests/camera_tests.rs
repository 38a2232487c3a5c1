// Host-side tests for camera matrices and motion curves.

use finale_core::camera::*;
use finale_core::constants::*;
use glam::{Vec3, Vec4Swizzles};

#[test]
fn view_matrix_moves_eye_to_origin() {
    let mut cam = Camera::new(60.0, 75.0, 16.0 / 9.0);
    cam.eye = Vec3::new(10.0, 5.0, 30.0);
    let v = cam.view_matrix() * cam.eye.extend(1.0);
    assert!(v.xyz().length() < 1e-4);
}

#[test]
fn target_projects_to_screen_centre() {
    let cam = Camera::new(60.0, 75.0, 1.5);
    let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
    let ndc = clip.xyz() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!((0.0..=1.0).contains(&ndc.z));
}

#[test]
fn viewport_ignores_zero_sizes() {
    let mut cam = Camera::new(60.0, 75.0, 1.0);
    cam.set_viewport(1920, 1080);
    assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    cam.set_viewport(0, 1080);
    cam.set_viewport(800, 0);
    assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
}

#[test]
fn orbit_tightens_with_intensity() {
    let horizontal = |e: Vec3| (e.x * e.x + e.z * e.z).sqrt();
    let calm = orbit_eye(3.0, CAMERA_ORBIT_SPEED, 60.0, 0.0);
    let loud = orbit_eye(3.0, CAMERA_ORBIT_SPEED, 60.0, 1.0);
    assert!((horizontal(calm) - 60.0).abs() < 1e-3);
    assert!((horizontal(loud) - 60.0 * (1.0 - CAMERA_ORBIT_TIGHTEN)).abs() < 1e-3);
}

#[test]
fn dolly_pulls_back_rushes_in_and_recovers() {
    assert_eq!(climax_dolly(-1.0), 1.0);
    assert_eq!(climax_dolly(0.0), 1.0);
    assert!((climax_dolly(DOLLY_PULLBACK_SEC) - DOLLY_PULLBACK_SCALE).abs() < 1e-5);
    let rushed = climax_dolly(DOLLY_PULLBACK_SEC + DOLLY_RUSH_SEC);
    assert!((rushed - DOLLY_RUSH_SCALE).abs() < 1e-3);
    let done = DOLLY_PULLBACK_SEC + DOLLY_RUSH_SEC + DOLLY_RECOVER_SEC;
    assert_eq!(climax_dolly(done + 0.1), 1.0);
}

#[test]
fn dolly_stays_between_its_extremes() {
    for i in 0..=700 {
        let d = climax_dolly(i as f32 / 100.0);
        assert!(
            (DOLLY_RUSH_SCALE - 1e-4..=DOLLY_PULLBACK_SCALE + 1e-4).contains(&d),
            "dolly {d} at {}s",
            i as f32 / 100.0
        );
    }
}

#[test]
fn field_of_view_narrows_and_breathes() {
    assert_eq!(field_of_view(75.0, 0.0, 1.0), 75.0);
    assert_eq!(field_of_view(75.0, 1.0, 0.0), 75.0 - CAMERA_FOV_NARROW_DEG);
    assert!(field_of_view(75.0, 1.0, 1.0) > field_of_view(75.0, 1.0, 0.0));
}

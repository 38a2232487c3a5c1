// Host-side tests for frame-rate independent smoothing.

use finale_core::smoothing::*;
use glam::Vec3;

#[test]
fn target_is_a_fixed_point() {
    for &speed in &[0.0, 0.05, 0.5, 1.0] {
        for &dt in &[0.0, 1.0 / 60.0, 0.1] {
            assert_eq!(smooth_lerp(3.5, 3.5, speed, dt), 3.5);
        }
    }
}

#[test]
fn zero_speed_never_moves() {
    assert_eq!(smooth_lerp(1.0, 10.0, 0.0, 0.1), 1.0);
    assert_eq!(smooth_lerp(-4.0, 4.0, 0.0, 1.0 / 30.0), -4.0);
}

#[test]
fn full_speed_snaps() {
    assert_eq!(smooth_lerp(0.0, 10.0, 1.0, 1.0 / 60.0), 10.0);
}

#[test]
fn two_half_steps_match_one_full_step() {
    let d = 1.0 / 120.0;
    for &speed in &[0.02, 0.1, 0.5] {
        let twice = smooth_lerp(smooth_lerp(0.0, 1.0, speed, d), 1.0, speed, d);
        let once = smooth_lerp(0.0, 1.0, speed, 2.0 * d);
        assert!(
            (twice - once).abs() < 1e-5,
            "speed {speed}: two steps {twice} vs one step {once}"
        );
    }
}

#[test]
fn approach_is_monotonic_without_overshoot() {
    let mut v = 0.0_f32;
    for _ in 0..2000 {
        let next = smooth_lerp(v, 1.0, 0.1, 1.0 / 60.0);
        assert!(next >= v, "value moved away from target");
        assert!(next <= 1.0, "value overshot the target: {next}");
        v = next;
    }
    assert!((v - 1.0).abs() < 1e-4);
}

#[test]
fn vector_variant_matches_scalar_per_component() {
    let a = Vec3::new(0.0, 10.0, -5.0);
    let b = Vec3::new(4.0, 0.0, 5.0);
    let r = smooth_lerp_vec3(a, b, 0.2, 1.0 / 60.0);
    assert!((r.x - smooth_lerp(a.x, b.x, 0.2, 1.0 / 60.0)).abs() < 1e-6);
    assert!((r.y - smooth_lerp(a.y, b.y, 0.2, 1.0 / 60.0)).abs() < 1e-6);
    assert!((r.z - smooth_lerp(a.z, b.z, 0.2, 1.0 / 60.0)).abs() < 1e-6);
}

// Host-side tests for the layer registry, config validation and colour helpers.

use finale_core::color::*;
use finale_core::{LayerKind, Scene, SceneConfig, SceneError};

#[test]
fn attach_assigns_unique_ids() {
    let mut scene = Scene::new();
    let a = scene.attach(LayerKind::Points);
    let b = scene.attach(LayerKind::Ring);
    assert_ne!(a, b);
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.kind(b), Some(LayerKind::Ring));
    assert_eq!(scene.count_of(LayerKind::Points), 1);
}

#[test]
fn detach_is_idempotent_and_queues_release_once() {
    let mut scene = Scene::new();
    let a = scene.attach(LayerKind::Flash);
    assert!(scene.detach(a));
    assert!(!scene.detach(a));
    assert!(!scene.contains(a));
    assert!(scene.is_empty());
    let released: Vec<_> = scene.drain_released().collect();
    assert_eq!(released, vec![a]);
    assert_eq!(scene.drain_released().count(), 0);
}

#[test]
fn ids_are_not_reused_after_detach() {
    let mut scene = Scene::new();
    let a = scene.attach(LayerKind::Points);
    scene.detach(a);
    let b = scene.attach(LayerKind::Points);
    assert!(b.raw() > a.raw());
}

#[test]
fn default_config_is_valid() {
    assert_eq!(SceneConfig::default().validate(), Ok(()));
    assert_eq!(SceneConfig::with_seed(7).seed, 7);
}

#[test]
fn config_rejects_unusable_values() {
    let cases = [
        SceneConfig {
            camera_distance: 0.0,
            ..SceneConfig::default()
        },
        SceneConfig {
            base_fov_deg: 10.0,
            ..SceneConfig::default()
        },
        SceneConfig {
            max_dt_sec: f32::NAN,
            ..SceneConfig::default()
        },
        SceneConfig {
            shake_decay_per_frame: 1.0,
            ..SceneConfig::default()
        },
        SceneConfig {
            climax_shake: -1.0,
            ..SceneConfig::default()
        },
        SceneConfig {
            firework_interval_sec: (0.8, 0.3),
            ..SceneConfig::default()
        },
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(SceneError::InvalidConfig(_))),
            "accepted {config:?}"
        );
    }
}

#[test]
fn hsl_primaries() {
    let close = |a: Rgb, b: Rgb| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5);
    assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
    assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
    assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    assert!(close(hsl_to_rgb(1.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5)));
    assert_eq!(hsl_to_rgb(0.3, 0.0, 0.4), [0.4, 0.4, 0.4]);
}

#[test]
fn gradient_runs_cyan_magenta_gold() {
    assert_eq!(countdown_gradient(0.0), CYAN);
    assert_eq!(countdown_gradient(0.5), MAGENTA);
    assert_eq!(countdown_gradient(1.0), GOLD);
    assert_eq!(countdown_gradient(2.0), GOLD);
}

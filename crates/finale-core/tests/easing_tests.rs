// Host-side tests for the easing curves.

use finale_core::easing::*;

type Curve = (&'static str, fn(f32) -> f32);

const CURVES: [Curve; 13] = [
    ("linear", linear),
    ("in_quad", in_quad),
    ("out_quad", out_quad),
    ("in_out_quad", in_out_quad),
    ("in_cubic", in_cubic),
    ("out_cubic", out_cubic),
    ("in_out_cubic", in_out_cubic),
    ("out_expo", out_expo),
    ("in_expo", in_expo),
    ("out_back", out_back),
    ("elastic", elastic),
    ("dramatic_ramp", dramatic_ramp),
    ("final_countdown", final_countdown),
];

#[test]
fn every_curve_is_exact_at_the_boundaries() {
    for (name, f) in CURVES {
        assert_eq!(f(0.0), 0.0, "{name}(0) should be exactly 0");
        assert_eq!(f(1.0), 1.0, "{name}(1) should be exactly 1");
    }
}

#[test]
fn quadratic_and_cubic_midpoints() {
    assert_eq!(in_quad(0.5), 0.25);
    assert_eq!(out_quad(0.5), 0.75);
    assert_eq!(in_out_quad(0.5), 0.5);
    assert_eq!(in_cubic(0.5), 0.125);
}

#[test]
fn in_out_cubic_matches_alternate_form() {
    for i in 50..=100 {
        let t = i as f32 / 100.0;
        let alt = (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0;
        assert!(
            (in_out_cubic(t) - alt).abs() < 1e-5,
            "in_out_cubic({t}) = {} but alternate form gives {alt}",
            in_out_cubic(t)
        );
    }
}

#[test]
fn out_back_overshoots_before_settling() {
    let peak = (60..=90)
        .map(|i| out_back(i as f32 / 100.0))
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.0, "out_back should overshoot, peak was {peak}");
}

#[test]
fn elastic_dips_below_zero() {
    let any_negative = (1..100).any(|i| elastic(i as f32 / 100.0) < 0.0);
    assert!(any_negative, "elastic should go negative inside (0, 1)");
}

#[test]
fn dramatic_ramp_is_a_slow_burn_then_explosion() {
    assert!((dramatic_ramp(0.83) - 0.3).abs() < 0.05);
    assert!(dramatic_ramp(0.5) < 0.2);
    assert!(dramatic_ramp(0.95) > 0.5);
}

#[test]
fn dramatic_ramp_is_monotonic_on_unit_interval() {
    let mut prev = dramatic_ramp(0.0);
    for i in 1..=1000 {
        let v = dramatic_ramp(i as f32 / 1000.0);
        assert!(v >= prev, "dramatic_ramp decreased at step {i}");
        prev = v;
    }
}

#[test]
fn final_countdown_follows_ramp_then_kicks() {
    for i in 0..98 {
        let t = i as f32 / 100.0;
        assert_eq!(final_countdown(t), dramatic_ramp(t), "diverged at t={t}");
    }
    assert!(final_countdown(0.99) > final_countdown(0.98));
    assert!((final_countdown(0.98) - 0.9).abs() < 0.1);
}

#[test]
fn curves_stay_finite_around_the_nominal_domain() {
    for (name, f) in CURVES {
        for i in -10..=120 {
            let t = i as f32 / 100.0;
            assert!(f(t).is_finite(), "{name}({t}) is not finite");
        }
    }
}

#[test]
fn ramps_saturate_for_the_overrun_sentinel() {
    assert_eq!(dramatic_ramp(1.1), 1.0);
    assert_eq!(final_countdown(1.1), 1.0);
}

// Host-side tests for the countdown state machine.

use finale_core::countdown::*;

#[test]
fn phase_scenario_matches_thresholds() {
    let cases = [
        (7_200_000, Phase::Dormant),
        (1_800_000, Phase::Calm),
        (300_000, Phase::Building),
        (30_000, Phase::Intense),
        (5_000, Phase::Final),
        (-2_000, Phase::Climax),
        (-10_000, Phase::Celebration),
    ];
    for (remaining, expected) in cases {
        assert_eq!(
            Phase::from_remaining_ms(remaining),
            expected,
            "remaining {remaining}ms"
        );
    }
}

#[test]
fn thresholds_are_inclusive_on_the_upper_edge() {
    assert_eq!(Phase::from_remaining_ms(3_600_000), Phase::Calm);
    assert_eq!(Phase::from_remaining_ms(3_600_001), Phase::Dormant);
    assert_eq!(Phase::from_remaining_ms(600_000), Phase::Building);
    assert_eq!(Phase::from_remaining_ms(60_000), Phase::Intense);
    assert_eq!(Phase::from_remaining_ms(10_000), Phase::Final);
    assert_eq!(Phase::from_remaining_ms(0), Phase::Climax);
    assert_eq!(Phase::from_remaining_ms(-5_999), Phase::Climax);
    assert_eq!(Phase::from_remaining_ms(-6_000), Phase::Celebration);
}

#[test]
fn phase_is_ordered_over_remaining_time() {
    let mut prev = Phase::from_remaining_ms(-100_000);
    let mut remaining = -100_000_i64;
    while remaining <= 8_000_000 {
        let phase = Phase::from_remaining_ms(remaining);
        assert!(
            phase <= prev,
            "phase {phase} at {remaining}ms is later than {prev} at an earlier instant"
        );
        prev = phase;
        remaining += 997;
    }
}

#[test]
fn progress_is_clamped_outside_the_window() {
    assert_eq!(calculate_state(10_000_000, 0).progress, 0.0);
    assert_eq!(calculate_state(0, 10_000_000).progress, 1.0);
    let mid = calculate_state(1_800_000, 0);
    assert!((mid.progress - 0.5).abs() < 1e-6);
}

#[test]
fn display_splits_remaining_time() {
    let s = calculate_state(3_723_456, 0);
    assert_eq!(
        s.display,
        CountdownDisplay {
            hours: 1,
            minutes: 2,
            seconds: 3,
            milliseconds: 456,
        }
    );
    assert!(!s.is_past);
}

#[test]
fn past_target_is_handled_not_rejected() {
    let s = calculate_state(1_000, 20_000);
    assert_eq!(s.time_remaining_ms, -19_000);
    assert!(s.is_past);
    assert_eq!(s.phase, Phase::Celebration);
    assert_eq!(s.display, CountdownDisplay::default());
    assert_eq!(s.progress, 1.0);
}

#[test]
fn target_instant_is_climax_and_past() {
    let s = calculate_state(5_000, 5_000);
    assert_eq!(s.phase, Phase::Climax);
    assert!(s.is_past);
}

#[test]
fn manual_progress_maps_onto_the_same_phases() {
    assert_eq!(Phase::for_progress(0.5), Phase::Calm);
    assert_eq!(Phase::for_progress(0.9), Phase::Building);
    assert_eq!(Phase::for_progress(0.99), Phase::Intense);
    assert_eq!(Phase::for_progress(0.999), Phase::Final);
    assert_eq!(Phase::for_progress(1.0), Phase::Climax);
    assert_eq!(Phase::for_progress(1.1), Phase::Celebration);
}

#[test]
fn debug_state_keeps_the_overrun_sentinel() {
    assert_eq!(debug_state(1.1), (1.1, Phase::Celebration));
    assert_eq!(debug_state(5.0), (DEBUG_PROGRESS_MAX, Phase::Celebration));
    let (p, phase) = debug_state(f32::NAN);
    assert_eq!(p, 0.0);
    assert_eq!(phase, Phase::for_progress(0.0));
}

#[test]
fn phase_names_are_stable() {
    let names: Vec<&str> = Phase::ALL.iter().map(|p| p.name()).collect();
    assert_eq!(
        names,
        ["dormant", "calm", "building", "intense", "final", "climax", "celebration"]
    );
    assert_eq!(Phase::Climax.to_string(), "climax");
}

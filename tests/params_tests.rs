// Host-side tests for launch parameter parsing.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod params {
    include!("../src/params.rs");
}

use params::*;

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;

#[test]
fn parses_every_known_key() {
    let p = LaunchParams::from_query("?target=1735689600000&progress=0.5&seed=7");
    assert_eq!(
        p,
        LaunchParams {
            target_ms: Some(1_735_689_600_000),
            progress: Some(0.5),
            seed: Some(7),
        }
    );
}

#[test]
fn empty_and_unknown_queries_fall_back_to_defaults() {
    assert_eq!(LaunchParams::from_query(""), LaunchParams::default());
    assert_eq!(LaunchParams::from_query("?"), LaunchParams::default());
    assert_eq!(
        LaunchParams::from_query("?foo=bar&&baz"),
        LaunchParams::default()
    );
}

#[test]
fn leading_question_mark_is_optional() {
    assert_eq!(LaunchParams::from_query("seed=3").seed, Some(3));
}

#[test]
fn malformed_values_are_dropped() {
    let p = LaunchParams::from_query("?target=soon&progress=nan&seed=-1");
    assert_eq!(p, LaunchParams::default());
    assert_eq!(LaunchParams::from_query("?progress&seed=3").progress, None);
}

#[test]
fn progress_override_is_clamped_to_the_sentinel() {
    assert_eq!(LaunchParams::from_query("?progress=5").progress, Some(1.1));
    assert_eq!(LaunchParams::from_query("?progress=-2").progress, Some(0.0));
    assert_eq!(LaunchParams::from_query("?progress=1.1").progress, Some(1.1));
}

#[test]
fn fractional_targets_are_accepted() {
    assert_eq!(
        LaunchParams::from_query("?target=1.5e12").target_ms,
        Some(1_500_000_000_000)
    );
}

#[test]
fn next_midnight_in_utc() {
    assert_eq!(next_local_midnight(0.0, 0.0), DAY_MS);
    assert_eq!(next_local_midnight((DAY_MS - 1) as f64, 0.0), DAY_MS);
}

#[test]
fn next_midnight_respects_timezone_offset() {
    // UTC+1: getTimezoneOffset() is -60, local midnight is 23:00 UTC.
    assert_eq!(next_local_midnight(0.0, -60.0), DAY_MS - HOUR_MS);
    // UTC-5: getTimezoneOffset() is 300, local midnight is 05:00 UTC.
    assert_eq!(next_local_midnight(0.0, 300.0), 5 * HOUR_MS);
}

#[test]
fn exactly_midnight_counts_down_to_the_next_one() {
    assert_eq!(next_local_midnight(DAY_MS as f64, 0.0), 2 * DAY_MS);
}

#[test]
fn explicit_target_wins_over_midnight() {
    let p = LaunchParams::from_query("?target=42");
    assert_eq!(p.target_or_midnight(0.0, 0.0), 42);
    assert_eq!(LaunchParams::default().target_or_midnight(0.0, 0.0), DAY_MS);
}

// Host-side tests for front-end constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use finale_core::constants::{STAR_COUNT, VORTEX_COUNT};
use finale_core::particles::BURST_LAYERS;

#[test]
#[allow(clippy::assertions_on_constants)]
fn sampling_is_faster_than_the_smallest_phase() {
    assert!(SAMPLE_INTERVAL_MS > 0);
    // The climax phase lasts six seconds; sample many times within it.
    assert!(SAMPLE_INTERVAL_MS * 20 < 6_000);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn time_units_agree() {
    assert_eq!(MS_PER_DAY, 24.0 * 60.0 * MS_PER_MINUTE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layer_limits_fit_every_subsystem() {
    assert!(MIN_LAYER_CAPACITY.is_power_of_two());
    assert!(MAX_LAYER_INSTANCES >= STAR_COUNT);
    assert!(MAX_LAYER_INSTANCES >= VORTEX_COUNT);
    for layer in BURST_LAYERS {
        assert!(MAX_LAYER_INSTANCES >= layer.count);
    }
    assert!(SPRITE_SOFTNESS > 0.0);
}

#[test]
fn query_keys_are_distinct() {
    assert!(!CANVAS_ID.is_empty());
    assert_ne!(PARAM_TARGET, PARAM_PROGRESS);
    assert_ne!(PARAM_TARGET, PARAM_SEED);
    assert_ne!(PARAM_PROGRESS, PARAM_SEED);
}

// Launch parameters read from the page query string:
// `?target=<ms since epoch>&progress=<0..1.1>&seed=<u64>`. Unknown keys are
// ignored; malformed values are dropped with a warning so the page still runs
// on defaults.

use crate::constants::*;
use finale_core::countdown::DEBUG_PROGRESS_MAX;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaunchParams {
    /// Countdown target, epoch milliseconds.
    pub target_ms: Option<i64>,
    /// Manual progress override; bypasses the clock entirely.
    pub progress: Option<f32>,
    pub seed: Option<u64>,
}

impl LaunchParams {
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                PARAM_TARGET => params.target_ms = parse_target(value),
                PARAM_PROGRESS => params.progress = parse_progress(value),
                PARAM_SEED => {
                    params.seed = value.parse().ok();
                    if params.seed.is_none() {
                        log::warn!("ignoring seed={value:?}");
                    }
                }
                _ => {}
            }
        }
        params
    }

    /// Explicit target, or the next local midnight after `now_ms`.
    /// `tz_offset_min` follows `Date.getTimezoneOffset()` (UTC minus local).
    pub fn target_or_midnight(&self, now_ms: f64, tz_offset_min: f64) -> i64 {
        self.target_ms
            .unwrap_or_else(|| next_local_midnight(now_ms, tz_offset_min))
    }
}

fn parse_target(value: &str) -> Option<i64> {
    let parsed = value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64));
    if parsed.is_none() {
        log::warn!("ignoring target={value:?}");
    }
    parsed
}

fn parse_progress(value: &str) -> Option<f32> {
    match value.parse::<f32>() {
        Ok(p) if p.is_finite() => Some(p.clamp(0.0, DEBUG_PROGRESS_MAX)),
        _ => {
            log::warn!("ignoring progress={value:?}");
            None
        }
    }
}

/// Strictly after `now_ms`: a page opened exactly at midnight counts down to
/// the following one.
pub fn next_local_midnight(now_ms: f64, tz_offset_min: f64) -> i64 {
    let offset_ms = tz_offset_min * MS_PER_MINUTE;
    let local = now_ms - offset_ms;
    let next = ((local / MS_PER_DAY).floor() + 1.0) * MS_PER_DAY;
    (next + offset_ms) as i64
}

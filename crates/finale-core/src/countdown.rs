//! Countdown state machine.
//!
//! A pure mapping from `(target, now)` to the countdown snapshot consumed by
//! the orchestrator and any display collaborators. There is no internal state:
//! callers recompute the snapshot on every sampling tick.

use std::fmt;

/// Window over which `progress` runs from 0 to 1 (one hour).
pub const DURATION_WINDOW_MS: i64 = 3_600_000;
/// Delay after the target before celebration begins.
pub const CELEBRATION_DELAY_MS: i64 = 6_000;

pub const FINAL_THRESHOLD_MS: i64 = 10_000;
pub const INTENSE_THRESHOLD_MS: i64 = 60_000;
pub const BUILDING_THRESHOLD_MS: i64 = 600_000;
pub const CALM_THRESHOLD_MS: i64 = DURATION_WINDOW_MS;

/// Largest progress accepted from the debug override; anything above 1
/// requests celebration.
pub const DEBUG_PROGRESS_MAX: f32 = 1.1;

/// Discrete stage of countdown intensity, ordered from earliest to latest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    #[default]
    Dormant,
    Calm,
    Building,
    Intense,
    Final,
    Climax,
    Celebration,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Dormant,
        Phase::Calm,
        Phase::Building,
        Phase::Intense,
        Phase::Final,
        Phase::Climax,
        Phase::Celebration,
    ];

    /// Classify a remaining time. First matching threshold wins.
    pub fn from_remaining_ms(remaining_ms: i64) -> Phase {
        if remaining_ms <= -CELEBRATION_DELAY_MS {
            Phase::Celebration
        } else if remaining_ms <= 0 {
            Phase::Climax
        } else if remaining_ms <= FINAL_THRESHOLD_MS {
            Phase::Final
        } else if remaining_ms <= INTENSE_THRESHOLD_MS {
            Phase::Intense
        } else if remaining_ms <= BUILDING_THRESHOLD_MS {
            Phase::Building
        } else if remaining_ms <= CALM_THRESHOLD_MS {
            Phase::Calm
        } else {
            Phase::Dormant
        }
    }

    /// Phase for a manually supplied progress, using the same thresholds as
    /// the real-time path. Progress above 1 maps past the target, so the
    /// overrun sentinel lands in celebration.
    pub fn for_progress(progress: f32) -> Phase {
        let p = progress.clamp(0.0, DEBUG_PROGRESS_MAX) as f64;
        let remaining = ((1.0 - p) * DURATION_WINDOW_MS as f64).round() as i64;
        Phase::from_remaining_ms(remaining)
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Dormant => "dormant",
            Phase::Calm => "calm",
            Phase::Building => "building",
            Phase::Intense => "intense",
            Phase::Final => "final",
            Phase::Climax => "climax",
            Phase::Celebration => "celebration",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Remaining time split for display. All fields are zero once the target has
/// passed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountdownDisplay {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl CountdownDisplay {
    pub fn from_remaining_ms(remaining_ms: i64) -> Self {
        let clamped = remaining_ms.max(0);
        let total_seconds = clamped / 1000;
        Self {
            hours: (total_seconds / 3600) as u32,
            minutes: ((total_seconds % 3600) / 60) as u32,
            seconds: (total_seconds % 60) as u32,
            milliseconds: (clamped % 1000) as u32,
        }
    }
}

/// Immutable snapshot produced on every sampling tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountdownState {
    pub time_remaining_ms: i64,
    pub progress: f32,
    pub phase: Phase,
    pub display: CountdownDisplay,
    pub is_past: bool,
}

/// Progress through the one-hour window, clamped to \[0, 1\].
pub fn progress_for_remaining(remaining_ms: i64) -> f32 {
    let p = 1.0 - remaining_ms as f64 / DURATION_WINDOW_MS as f64;
    p.clamp(0.0, 1.0) as f32
}

/// Snapshot for `target_ms` as seen at `now_ms` (both milliseconds since the
/// epoch). Past targets are valid and yield `is_past = true`.
pub fn calculate_state(target_ms: i64, now_ms: i64) -> CountdownState {
    let remaining = target_ms.saturating_sub(now_ms);
    CountdownState {
        time_remaining_ms: remaining,
        progress: progress_for_remaining(remaining),
        phase: Phase::from_remaining_ms(remaining),
        display: CountdownDisplay::from_remaining_ms(remaining),
        is_past: remaining <= 0,
    }
}

/// Manual override used while scrubbing: keeps the small overrun above 1 that
/// requests celebration, clamps everything else.
pub fn debug_state(progress: f32) -> (f32, Phase) {
    let p = if progress.is_finite() {
        progress.clamp(0.0, DEBUG_PROGRESS_MAX)
    } else {
        0.0
    };
    (p, Phase::for_progress(p))
}

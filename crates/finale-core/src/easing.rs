//! Easing curves shared by every layer of the choreography.
//!
//! All curves map a normalized time `t` (nominally \[0, 1\]) to an eased value.
//! Boundaries are exact: `f(0) == 0.0` and `f(1) == 1.0` for every curve, even
//! the ones that overshoot in between. Inputs are not clamped.

use std::f32::consts::PI;

const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;

// Knee of the tension curve: 83% of the timeline covers 30% of the intensity.
pub const RAMP_KNEE: f32 = 0.83;
pub const RAMP_KNEE_VALUE: f32 = 0.3;
const RAMP_EXPONENT: f32 = 2.5;

// Closing kick of the final countdown curve.
pub const FINAL_KICK_START: f32 = 0.98;
const FINAL_KICK_BASE: f32 = 0.9;
const FINAL_KICK_EXPONENT: f32 = 1.5;

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

#[inline]
pub fn in_quad(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

#[inline]
pub fn in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[inline]
pub fn in_cubic(t: f32) -> f32 {
    t * t * t
}

#[inline]
pub fn out_cubic(t: f32) -> f32 {
    let u = t - 1.0;
    1.0 + u * u * u
}

#[inline]
pub fn in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = t - 1.0;
        1.0 + 4.0 * u * u * u
    }
}

#[inline]
pub fn out_expo(t: f32) -> f32 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

#[inline]
pub fn in_expo(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * (t - 1.0))
    }
}

/// Overshoots above 1 around t = 0.6..0.9 before settling.
#[inline]
pub fn out_back(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    let u = t - 1.0;
    1.0 + BACK_C3 * u * u * u + BACK_C1 * u * u
}

/// Exponentially growing oscillation; dips below zero before reaching 1.
#[inline]
pub fn elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}

/// Master tension curve: a slow linear burn to 0.3 until the knee, then a
/// steep power ramp over the last 17% of the timeline.
///
/// Saturates at 1 for `t >= 1` so the celebration overrun never exceeds full
/// intensity.
#[inline]
pub fn dramatic_ramp(t: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    if t < RAMP_KNEE {
        t / RAMP_KNEE * RAMP_KNEE_VALUE
    } else {
        let s = (t - RAMP_KNEE) / (1.0 - RAMP_KNEE);
        RAMP_KNEE_VALUE + s.powf(RAMP_EXPONENT) * (1.0 - RAMP_KNEE_VALUE)
    }
}

/// `dramatic_ramp` with an extra kick over the closing 2%.
#[inline]
pub fn final_countdown(t: f32) -> f32 {
    if t < FINAL_KICK_START {
        return dramatic_ramp(t);
    }
    if t >= 1.0 {
        return 1.0;
    }
    let s = (t - FINAL_KICK_START) / (1.0 - FINAL_KICK_START);
    FINAL_KICK_BASE + s.powf(FINAL_KICK_EXPONENT) * (1.0 - FINAL_KICK_BASE)
}

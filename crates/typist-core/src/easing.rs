#![forbid(unsafe_code)]

//! Interpolation curves used by the glyph effects.
//!
//! Each curve maps an alpha `a` in `[0, 1]` to an output that starts at 0 and
//! ends at 1. Most outputs stay inside `[0, 1]`; `SwingOut`, `SwingIn` and
//! `ElasticOut` overshoot on purpose.
//!
//! # Invariants
//!
//! 1. `apply(0.0) == 0.0` and `apply(1.0) == 1.0` for every curve (within
//!    float tolerance).
//! 2. Inputs outside `[0, 1]` are clamped before evaluation.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

// ---------------------------------------------------------------------------
// Curve set
// ---------------------------------------------------------------------------

/// A named interpolation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Constant velocity.
    #[default]
    Linear,
    /// Smoothstep: `a² (3 - 2a)`.
    Smooth,
    /// Smootherstep: `a³ (a (6a - 15) + 10)`.
    Smoother,
    /// Half a cosine period, slow at both ends.
    Sine,
    /// Slow start along a quarter cosine.
    SineIn,
    /// Slow end along a quarter sine.
    SineOut,
    /// Quadratic, slow at both ends.
    Pow2,
    /// Quadratic, slow start.
    Pow2In,
    /// Quadratic, slow end.
    Pow2Out,
    /// Cubic, slow start.
    Pow3In,
    /// Cubic, slow end.
    Pow3Out,
    /// Quarter circle, fast start.
    CircleOut,
    /// Pulls back before moving forward. Goes below 0.
    SwingIn,
    /// Overshoots the end and settles back. Exceeds 1.
    SwingOut,
    /// Ball bouncing to rest at the end.
    BounceOut,
    /// Mirror of `BounceOut`.
    BounceIn,
    /// Spring that overshoots and oscillates into place. Exceeds 1.
    ElasticOut,
}

const SWING_SCALE: f32 = 2.0;

impl Interpolation {
    /// Evaluate the curve at `a` (clamped to `[0, 1]`).
    pub fn apply(self, a: f32) -> f32 {
        let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        match self {
            Self::Linear => a,
            Self::Smooth => a * a * (3.0 - 2.0 * a),
            Self::Smoother => a * a * a * (a * (a * 6.0 - 15.0) + 10.0),
            Self::Sine => (1.0 - (a * PI).cos()) / 2.0,
            Self::SineIn => 1.0 - (a * FRAC_PI_2).cos(),
            Self::SineOut => (a * FRAC_PI_2).sin(),
            Self::Pow2 => {
                if a <= 0.5 {
                    2.0 * a * a
                } else {
                    let inv = (a - 1.0) * 2.0;
                    1.0 - inv * inv / 2.0
                }
            }
            Self::Pow2In => a * a,
            Self::Pow2Out => {
                let inv = 1.0 - a;
                1.0 - inv * inv
            }
            Self::Pow3In => a * a * a,
            Self::Pow3Out => {
                let inv = 1.0 - a;
                1.0 - inv * inv * inv
            }
            Self::CircleOut => {
                let inv = a - 1.0;
                (1.0 - inv * inv).max(0.0).sqrt()
            }
            Self::SwingIn => a * a * ((SWING_SCALE + 1.0) * a - SWING_SCALE),
            Self::SwingOut => {
                let a = a - 1.0;
                a * a * ((SWING_SCALE + 1.0) * a + SWING_SCALE) + 1.0
            }
            Self::BounceOut => bounce_out(a),
            Self::BounceIn => 1.0 - bounce_out(1.0 - a),
            Self::ElasticOut => {
                if a == 0.0 || a == 1.0 {
                    a
                } else {
                    2.0_f32.powf(-10.0 * a) * ((a * 10.0 - 0.75) * (TAU / 3.0)).sin() + 1.0
                }
            }
        }
    }

    /// Interpolate between `start` and `end` along this curve.
    #[inline]
    pub fn lerp(self, start: f32, end: f32, a: f32) -> f32 {
        start + (end - start) * self.apply(a)
    }
}

fn bounce_out(a: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if a < 1.0 / D1 {
        N1 * a * a
    } else if a < 2.0 / D1 {
        let a = a - 1.5 / D1;
        N1 * a * a + 0.75
    } else if a < 2.5 / D1 {
        let a = a - 2.25 / D1;
        N1 * a * a + 0.9375
    } else {
        let a = a - 2.625 / D1;
        N1 * a * a + 0.984_375
    }
}

/// Plain linear interpolation without clamping.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

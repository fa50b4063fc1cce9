#![forbid(unsafe_code)]

//! The effect library, one module per effect.
//!
//! Three families share helpers from this module:
//!
//! - **One-shot tweens** run a per-glyph clock from the moment the glyph is
//!   revealed and settle at rest ([`Tween`]).
//! - **Periodic oscillators** derive a phase from the effect clock plus a
//!   per-glyph offset and fade out near the end of a finite duration. Color
//!   oscillators blend back to the captured color ([`fade_color`]) and
//!   restore it when they finish.
//! - **Input-reactive effects** read the pointer and restore glyphs they are
//!   not currently decorating ([`GlyphSlots`] holds the captured originals).

use typist_core::{Interpolation, PackedRgba};

use crate::effect::{EffectCore, EffectTarget};

mod attention;
mod blink;
mod cannon;
mod carousel;
mod crowd;
mod ease;
mod emerge;
mod fade;
mod gradient;
mod hang;
mod heartbeat;
mod highlight;
mod jolt;
mod jump;
mod link;
mod meet;
mod ocean;
mod pinch;
mod rainbow;
mod rotate;
mod shake;
mod shrink;
mod sick;
mod slam;
mod slide;
mod spin;
mod spiral;
mod sputter;
mod squash;
mod stylist;
mod throb;
mod trigger;
mod wave;
mod wind;
mod zipper;

pub use attention::AttentionEffect;
pub use blink::BlinkEffect;
pub use cannon::CannonEffect;
pub use carousel::CarouselEffect;
pub use crowd::CrowdEffect;
pub use ease::EaseEffect;
pub use emerge::EmergeEffect;
pub use fade::FadeEffect;
pub use gradient::GradientEffect;
pub use hang::HangEffect;
pub use heartbeat::HeartbeatEffect;
pub use highlight::HighlightEffect;
pub use jolt::JoltEffect;
pub use jump::JumpEffect;
pub use link::LinkEffect;
pub use meet::MeetEffect;
pub use ocean::OceanEffect;
pub use pinch::PinchEffect;
pub use rainbow::RainbowEffect;
pub use rotate::RotateEffect;
pub use shake::ShakeEffect;
pub use shrink::ShrinkEffect;
pub use sick::SickEffect;
pub use slam::SlamEffect;
pub use slide::SlideEffect;
pub use spin::SpinEffect;
pub use spiral::SpiralEffect;
pub use sputter::SputterEffect;
pub use squash::SquashEffect;
pub use stylist::StylistEffect;
pub use throb::ThrobEffect;
pub use trigger::TriggerEffect;
pub use wave::WaveEffect;
pub use wind::WindEffect;
pub use zipper::ZipperEffect;

/// Elastic tweens run this many times longer than their plain variant.
pub const ELASTIC_DURATION_FACTOR: f32 = 3.0;

// ---------------------------------------------------------------------------
// Per-glyph storage
// ---------------------------------------------------------------------------

/// Grow-only per-glyph elapsed time, indexed by local glyph index.
#[derive(Debug, Clone, Default)]
pub(crate) struct GlyphTimers {
    elapsed: Vec<f32>,
}

impl GlyphTimers {
    /// Add `delta` to the clock of `local` and return its new value.
    pub(crate) fn advance(&mut self, local: usize, delta: f32) -> f32 {
        if local >= self.elapsed.len() {
            self.elapsed.resize(local + 1, 0.0);
        }
        let slot = &mut self.elapsed[local];
        *slot += delta;
        *slot
    }
}

/// Grow-only per-glyph optional values, indexed by local glyph index.
#[derive(Debug, Clone)]
pub(crate) struct GlyphSlots<T: Copy> {
    slots: Vec<Option<T>>,
}

impl<T: Copy> Default for GlyphSlots<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T: Copy> GlyphSlots<T> {
    pub(crate) fn get(&self, local: usize) -> Option<T> {
        self.slots.get(local).copied().flatten()
    }

    pub(crate) fn set(&mut self, local: usize, value: T) {
        if local >= self.slots.len() {
            self.slots.resize(local + 1, None);
        }
        self.slots[local] = Some(value);
    }

    /// Value for `local`, storing `init()` the first time it is asked for.
    pub(crate) fn get_or_insert_with(&mut self, local: usize, init: impl FnOnce() -> T) -> T {
        match self.get(local) {
            Some(v) => v,
            None => {
                let v = init();
                self.set(local, v);
                v
            }
        }
    }

    /// Every stored `(local, value)` pair.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(local, v)| v.map(|v| (local, v)))
    }
}

impl GlyphSlots<PackedRgba> {
    /// Write every captured color back onto its glyph.
    pub(crate) fn restore_colors(&self, core: &EffectCore, target: &mut dyn EffectTarget) {
        for (local, color) in self.iter() {
            let global = core.index_start + local;
            if global < target.glyph_count() {
                let glyph = target.glyph(global);
                target.set_glyph(global, glyph.with_color(color));
            }
        }
    }
}

/// `color` mixed back toward `original` as a finite effect fades out.
pub(crate) fn fade_color(core: &EffectCore, original: PackedRgba, color: PackedRgba) -> PackedRgba {
    let fadeout = core.calculate_fadeout();
    if fadeout >= 1.0 {
        color
    } else {
        original.lerp(color, fadeout)
    }
}

// ---------------------------------------------------------------------------
// One-shot tween clock
// ---------------------------------------------------------------------------

/// Per-glyph one-shot clock with an easing curve.
#[derive(Debug, Clone)]
pub(crate) struct Tween {
    timers: GlyphTimers,
    seconds: f32,
    curve: Interpolation,
}

impl Tween {
    /// A tween lasting `base_seconds / speed`, or three times that when
    /// `elastic` is set. The curve is the same either way.
    pub(crate) fn new(base_seconds: f32, speed: f32, elastic: bool, curve: Interpolation) -> Self {
        let speed = if speed > 0.0 && speed.is_finite() { speed } else { 1.0 };
        let mut seconds = base_seconds / speed;
        if elastic {
            seconds *= ELASTIC_DURATION_FACTOR;
        }
        Self {
            timers: GlyphTimers::default(),
            seconds,
            curve,
        }
    }

    /// Seconds one glyph takes to settle.
    pub(crate) fn seconds(&self) -> f32 {
        self.seconds
    }

    /// Advance `local` and return its linear progress in `[0, 1]`.
    pub(crate) fn progress(&mut self, local: usize, delta: f32) -> f32 {
        let t = self.timers.advance(local, delta);
        if self.seconds <= 0.0 {
            1.0
        } else {
            (t / self.seconds).clamp(0.0, 1.0)
        }
    }

    /// Advance `local` and return how much of the starting displacement is
    /// left: 1 when the glyph appears, 0 once it has settled.
    pub(crate) fn remaining(&mut self, local: usize, delta: f32) -> f32 {
        let p = self.progress(local, delta);
        1.0 - self.curve.apply(p)
    }
}

// ---------------------------------------------------------------------------
// Noise
// ---------------------------------------------------------------------------

/// Smooth 1D value noise in `[-1, 1]`.
pub(crate) fn value_noise(x: f32, seed: u32) -> f32 {
    let floor = x.floor();
    let f = x - floor;
    let i = floor as i32;
    let a = lattice(i, seed);
    let b = lattice(i.wrapping_add(1), seed);
    let t = f * f * (3.0 - 2.0 * f);
    a + (b - a) * t
}

fn lattice(i: i32, seed: u32) -> f32 {
    let mut h = (i as u32).wrapping_mul(0x9E37_79B1) ^ seed.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297A_2D39);
    h ^= h >> 15;
    (h as f32 / u32::MAX as f32) * 2.0 - 1.0
}

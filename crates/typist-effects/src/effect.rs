#![forbid(unsafe_code)]

//! The effect contract and the narrow view of the label that effects write to.
//!
//! # Frame protocol
//!
//! Once per frame, for every active effect, the driver calls:
//!
//! 1. [`Effect::update`] with the frame delta (advances `total_time`).
//! 2. [`Effect::begin_frame`] once, for input handling that concerns the
//!    whole range (click consumption, hover detection).
//! 3. [`Effect::on_apply`] for every revealed glyph inside the effect's range,
//!    in ascending index order.
//!
//! Once `update` leaves the effect finished, the driver calls
//! [`Effect::on_finish`] instead and drops it.
//!
//! # Invariants
//!
//! 1. Offsets, sizing and rotation are additive: effects only ever call the
//!    `add_*` methods of [`EffectTarget`].
//! 2. Glyph writes are masked: an effect that changes color replaces only the
//!    color bits, an effect that changes style replaces only style bits.
//! 3. No effect keeps a reference to the target past the call.

use std::fmt;
use std::ops::Range;

use typist_core::Glyph;

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// What an effect may read from and write to while it runs.
///
/// Coordinates are layout units with `+x` to the right and `+y` up. Size
/// deltas grow a glyph about its center; rotations are in degrees,
/// counter-clockwise.
pub trait EffectTarget {
    /// Height of the line that holds glyph `global`.
    fn line_height(&self, global: usize) -> f32;

    /// Current packed glyph at `global`.
    fn glyph(&self, global: usize) -> Glyph;

    /// Replace the packed glyph at `global`.
    fn set_glyph(&mut self, global: usize, glyph: Glyph);

    /// Add to the positional offset of `global`.
    fn add_offset(&mut self, global: usize, x: f32, y: f32);

    /// Add to the size delta of `global`.
    fn add_size(&mut self, global: usize, x: f32, y: f32);

    /// Add to the rotation of `global`.
    fn add_rotation(&mut self, global: usize, degrees: f32);

    /// Glyph index under the pointer this frame, if any.
    fn over_index(&self) -> Option<usize>;

    /// Consume the pending click if it landed inside `range`.
    ///
    /// Returns the clicked index at most once per click; later calls in the
    /// same frame (or later frames) return `None` until a new click arrives.
    fn take_touch_in(&mut self, range: Range<usize>) -> Option<usize>;

    /// Forward a named event with a payload to the host.
    fn trigger_event(&mut self, name: &str, payload: &str);

    /// Ask the host to open a URL.
    fn open_url(&mut self, url: &str);

    /// Uniform random value in `[0, 1)` from the label's seeded source.
    fn random(&mut self) -> f32;

    /// Number of glyphs in the buffer.
    fn glyph_count(&self) -> usize;

    /// Number of glyphs the typewriter has revealed so far.
    fn visible_count(&self) -> usize;

    /// Visible text of `range`, clipped to the buffer.
    fn text(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.glyph_count());
        (range.start..end).map(|i| self.glyph(i).ch()).collect()
    }
}

// ---------------------------------------------------------------------------
// Shared effect state
// ---------------------------------------------------------------------------

/// Clock and range state every effect carries.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectCore {
    /// How long the effect runs, in seconds. May be `f32::INFINITY`.
    pub duration: f32,
    /// Seconds since the effect was activated.
    pub total_time: f32,
    /// First glyph index governed by the effect.
    pub index_start: usize,
    /// One past the last governed glyph index.
    pub index_end: usize,
}

impl Default for EffectCore {
    fn default() -> Self {
        Self::new(f32::INFINITY)
    }
}

impl EffectCore {
    /// Fraction of the duration spent before the fadeout ramp starts.
    pub const FADEOUT_START: f32 = 0.85;

    /// A core with the given duration and an empty, unassigned range.
    pub fn new(duration: f32) -> Self {
        let duration = if duration.is_nan() || duration < 0.0 {
            f32::INFINITY
        } else {
            duration
        };
        Self {
            duration,
            total_time: 0.0,
            index_start: 0,
            index_end: usize::MAX,
        }
    }

    /// The governed half-open glyph range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.index_start..self.index_end
    }

    /// The part of the range that is on screen when `visible` glyphs are
    /// revealed.
    #[inline]
    pub fn revealed_range(&self, visible: usize) -> Range<usize> {
        self.index_start..self.index_end.min(visible)
    }

    /// Whether `global` is governed by this effect.
    #[inline]
    pub fn covers(&self, global: usize) -> bool {
        self.range().contains(&global)
    }

    /// Whether the configured duration has elapsed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.total_time >= self.duration
    }

    /// Periodic progress for a glyph.
    ///
    /// `p = total_time / modifier + offset`, shifted into the positive range.
    /// With `pingpong`, `[1, 2)` folds back onto `(1, 0]`; otherwise `p` wraps
    /// into `[0, 1)`.
    pub fn calculate_progress(&self, modifier: f32, offset: f32, pingpong: bool) -> f32 {
        let modifier = if modifier.abs() < f32::EPSILON {
            f32::EPSILON
        } else {
            modifier
        };
        let raw = self.total_time / modifier + offset;
        if !raw.is_finite() {
            return 0.0;
        }
        if pingpong {
            let p = raw.rem_euclid(2.0);
            if p > 1.0 { 2.0 - p } else { p }
        } else {
            raw.rem_euclid(1.0)
        }
    }

    /// Multiplier that ramps output from 1 to 0 over the final 15% of the
    /// duration. Always 1 for infinite effects.
    pub fn calculate_fadeout(&self) -> f32 {
        if !self.duration.is_finite() {
            return 1.0;
        }
        if self.duration <= 0.0 {
            return 0.0;
        }
        let p = self.total_time / self.duration;
        if p <= Self::FADEOUT_START {
            return 1.0;
        }
        let t = ((p - Self::FADEOUT_START) / (1.0 - Self::FADEOUT_START)).clamp(0.0, 1.0);
        1.0 - t * t * (3.0 - 2.0 * t)
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A time- or input-driven transform over a range of glyphs.
pub trait Effect: fmt::Debug {
    /// Canonical registry name (uppercase).
    fn name(&self) -> &'static str;

    /// Shared clock and range state.
    fn core(&self) -> &EffectCore;

    /// Mutable access to the shared state.
    fn core_mut(&mut self) -> &mut EffectCore;

    /// Advance effect-global clocks. Called once per frame before any glyph
    /// is touched.
    fn update(&mut self, delta: f32) {
        self.core_mut().total_time += delta;
    }

    /// Per-frame hook that runs once before [`on_apply`](Self::on_apply).
    fn begin_frame(&mut self, _target: &mut dyn EffectTarget) {}

    /// Apply the effect to one revealed glyph.
    ///
    /// `local` is the index relative to the range start, `global` the index
    /// in the whole text, `glyph` the current value at `global`.
    fn on_apply(
        &mut self,
        glyph: Glyph,
        local: usize,
        global: usize,
        delta: f32,
        target: &mut dyn EffectTarget,
    );

    /// Called once when the duration has run out, just before the effect is
    /// dropped. Effects that leave lasting glyph changes undo them here.
    fn on_finish(&mut self, _target: &mut dyn EffectTarget) {}

    /// Whether the effect reads pointer state.
    fn tracks_input(&self) -> bool {
        false
    }

    /// Whether the effect has run its full duration.
    fn is_finished(&self) -> bool {
        self.core().is_finished()
    }
}

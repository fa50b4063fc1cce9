#![forbid(unsafe_code)]

//! `{FADE=from;duration}`: each glyph fades in from a color or an alpha to
//! its own color.
//!
//! `from` is a color name or hex value, or a number in `[0, 1]` read as the
//! starting alpha. The default starts fully transparent.

use typist_core::{Glyph, PackedRgba};

use super::{GlyphSlots, GlyphTimers};
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::{Params, param_as_float};

#[derive(Debug, Clone, Copy, PartialEq)]
enum FadeFrom {
    Color(PackedRgba),
    Alpha(f32),
}

#[derive(Debug, Clone)]
pub struct FadeEffect {
    core: EffectCore,
    from: FadeFrom,
    seconds: f32,
    timers: GlyphTimers,
    originals: GlyphSlots<PackedRgba>,
}

impl FadeEffect {
    pub const DEFAULT_SECONDS: f32 = 1.0;

    pub fn new(params: &Params<'_>) -> Self {
        let from = match params.color(0) {
            Some(color) => FadeFrom::Color(color),
            None => FadeFrom::Alpha(
                params
                    .get(0)
                    .map_or(0.0, |s| param_as_float(s, 0.0))
                    .clamp(0.0, 1.0),
            ),
        };
        let seconds = params.float(1, Self::DEFAULT_SECONDS);
        Self {
            core: EffectCore::default(),
            from,
            seconds: if seconds > 0.0 { seconds } else { Self::DEFAULT_SECONDS },
            timers: GlyphTimers::default(),
            originals: GlyphSlots::default(),
        }
    }
}

impl Effect for FadeEffect {
    fn name(&self) -> &'static str {
        "FADE"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn on_apply(
        &mut self,
        glyph: Glyph,
        local: usize,
        global: usize,
        delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let original = self.originals.get_or_insert_with(local, || glyph.color());
        let t = self.timers.advance(local, delta);
        let p = (t / self.seconds).clamp(0.0, 1.0);
        let color = match self.from {
            FadeFrom::Color(from) => from.lerp(original, p),
            FadeFrom::Alpha(alpha) => {
                let start = original.with_opacity(alpha);
                start.lerp(original, p)
            }
        };
        target.set_glyph(global, glyph.with_color(color));
    }
}

#![forbid(unsafe_code)]

//! `{BLINK=color1;color2;frequency;threshold;duration}`: glyphs alternate
//! between two colors. A missing `color1` means the glyph's own color;
//! `color2` defaults to fully transparent.

use typist_core::{Glyph, PackedRgba};

use super::{GlyphSlots, fade_color};
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct BlinkEffect {
    core: EffectCore,
    color1: Option<PackedRgba>,
    color2: PackedRgba,
    frequency: f32,
    threshold: f32,
    originals: GlyphSlots<PackedRgba>,
}

impl BlinkEffect {
    /// Seconds per blink cycle at `frequency = 1`.
    pub const DEFAULT_PERIOD: f32 = 1.0;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(4)),
            color1: params.color(0),
            color2: params.color_or(1, PackedRgba::TRANSPARENT),
            frequency: params.float(2, 1.0),
            threshold: params.float(3, 0.5).clamp(0.0, 1.0),
            originals: GlyphSlots::default(),
        }
    }
}

impl Effect for BlinkEffect {
    fn name(&self) -> &'static str {
        "BLINK"
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
        _delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let original = self.originals.get_or_insert_with(local, || glyph.color());
        let p = self
            .core
            .calculate_progress(Self::DEFAULT_PERIOD / self.frequency, 0.0, false);
        let color = if p <= self.threshold {
            self.color1.unwrap_or(original)
        } else {
            self.color2
        };
        let color = fade_color(&self.core, original, color);
        target.set_glyph(global, glyph.with_color(color));
    }

    fn on_finish(&mut self, target: &mut dyn EffectTarget) {
        self.originals.restore_colors(&self.core, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTarget;
    use typist_core::TypingConfig;

    #[test]
    fn alternates_between_own_color_and_clear() {
        let config = TypingConfig::default();
        let mut fx = BlinkEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("a", PackedRgba::RED);
        target.step(&mut fx, 0.25);
        assert_eq!(target.glyphs[0].color(), PackedRgba::RED);
        target.step(&mut fx, 0.5);
        assert_eq!(target.glyphs[0].color(), PackedRgba::TRANSPARENT);
        target.step(&mut fx, 0.5);
        assert_eq!(target.glyphs[0].color(), PackedRgba::RED);
    }

    #[test]
    fn finite_blink_fades_back_to_own_color() {
        let config = TypingConfig::default();
        let mut fx = BlinkEffect::new(&Params::new(&["", "", "1", "0.5", "1"], &config));
        let mut target = RecordingTarget::new("a", PackedRgba::RED);
        target.step(&mut fx, 0.75);
        assert_eq!(target.glyphs[0].color(), PackedRgba::TRANSPARENT);
        target.step(&mut fx, 0.125);
        let fading = target.glyphs[0].color();
        assert!(fading.a() > 0 && fading.a() < 128, "{fading:?}");
        fx.update(0.125);
        assert!(fx.is_finished());
        fx.on_finish(&mut target);
        assert_eq!(target.glyphs[0].color(), PackedRgba::RED);
    }
}

#![forbid(unsafe_code)]

//! `{GRADIENT=color1;color2;distance;frequency;duration}`: colors sweep back
//! and forth between two colors along the text.

use typist_core::{Glyph, PackedRgba};

use super::{GlyphSlots, fade_color};
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct GradientEffect {
    core: EffectCore,
    color1: PackedRgba,
    color2: PackedRgba,
    distance: f32,
    frequency: f32,
    originals: GlyphSlots<PackedRgba>,
}

impl GradientEffect {
    pub const DEFAULT_DISTANCE: f32 = 0.975;
    pub const DEFAULT_FREQUENCY: f32 = 2.0;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(4)),
            color1: params.color_or(0, PackedRgba::WHITE),
            color2: params.color_or(1, PackedRgba::GRAY),
            distance: params.float(2, 1.0),
            frequency: params.float(3, 1.0),
            originals: GlyphSlots::default(),
        }
    }
}

impl Effect for GradientEffect {
    fn name(&self) -> &'static str {
        "GRADIENT"
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
        let spread = (1.0 - Self::DEFAULT_DISTANCE) / self.distance;
        let p = self.core.calculate_progress(
            Self::DEFAULT_FREQUENCY / self.frequency,
            spread * local as f32,
            true,
        );
        let original = self.originals.get_or_insert_with(local, || glyph.color());
        let color = fade_color(&self.core, original, self.color1.lerp(self.color2, p));
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
    fn starts_at_first_color() {
        let config = TypingConfig::default();
        let mut fx = GradientEffect::new(&Params::new(&["red", "blue"], &config));
        let mut target = RecordingTarget::new("a", PackedRgba::WHITE);
        target.step(&mut fx, 0.0);
        assert_eq!(target.glyphs[0].color(), PackedRgba::RED);
        target.step(&mut fx, GradientEffect::DEFAULT_FREQUENCY);
        assert_eq!(target.glyphs[0].color(), PackedRgba::BLUE);
    }

    #[test]
    fn finite_gradient_blends_home_before_it_ends() {
        let config = TypingConfig::default();
        let args = ["red", "blue", "1", "1", "4"];
        let mut fx = GradientEffect::new(&Params::new(&args, &config));
        let mut target = RecordingTarget::new("a", PackedRgba::GREEN);
        target.step(&mut fx, 2.0);
        assert_eq!(target.glyphs[0].color(), PackedRgba::BLUE);
        target.step(&mut fx, 1.75);
        let late = target.glyphs[0].color();
        assert!(late.g() > late.r(), "{late:?}");
        fx.update(0.25);
        assert!(fx.is_finished());
        fx.on_finish(&mut target);
        assert_eq!(target.glyphs[0].color(), PackedRgba::GREEN);
    }
}

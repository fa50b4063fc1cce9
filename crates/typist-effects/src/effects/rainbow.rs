#![forbid(unsafe_code)]

//! `{RAINBOW=distance;frequency;saturation;lightness;duration}`: glyph colors
//! cycle through the hue wheel, offset along the text.

use typist_core::{Glyph, PackedRgba};

use super::{GlyphSlots, fade_color};
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

/// Hue cycle shared by the rainbow-style effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HueCycle {
    pub distance: f32,
    pub frequency: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl HueCycle {
    /// Hue step between glyphs is `(1 - DEFAULT_DISTANCE) / distance`.
    pub const DEFAULT_DISTANCE: f32 = 0.975;
    /// Seconds per full cycle at `frequency = 1`.
    pub const DEFAULT_FREQUENCY: f32 = 2.0;

    /// Color for glyph `local`, keeping the alpha of `current`.
    pub fn color(&self, core: &EffectCore, local: usize, current: PackedRgba) -> PackedRgba {
        let spread = (1.0 - Self::DEFAULT_DISTANCE) / self.distance;
        let period = Self::DEFAULT_FREQUENCY / self.frequency;
        let hue = core.calculate_progress(period, spread * local as f32, false);
        PackedRgba::from_hsl(hue, self.saturation, self.lightness).with_alpha(current.a())
    }
}

#[derive(Debug, Clone)]
pub struct RainbowEffect {
    core: EffectCore,
    cycle: HueCycle,
    originals: GlyphSlots<PackedRgba>,
}

impl RainbowEffect {
    pub const DEFAULT_DISTANCE: f32 = HueCycle::DEFAULT_DISTANCE;
    pub const DEFAULT_FREQUENCY: f32 = HueCycle::DEFAULT_FREQUENCY;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(4)),
            cycle: HueCycle {
                distance: params.float(0, 1.0),
                frequency: params.float(1, 1.0),
                saturation: params.float(2, 1.0),
                lightness: params.float(3, 0.5),
            },
            originals: GlyphSlots::default(),
        }
    }
}

impl Effect for RainbowEffect {
    fn name(&self) -> &'static str {
        "RAINBOW"
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
        let color = self.cycle.color(&self.core, local, original);
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
    use typist_core::{GlyphFlags, TypingConfig};

    #[test]
    fn applying_twice_equals_once() {
        let config = TypingConfig::default();
        let mut fx = RainbowEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("abc", PackedRgba::WHITE);
        target.glyphs[1] = target.glyphs[1].with_flags(GlyphFlags::BOLD);
        fx.update(0.37);
        let g = target.glyphs[1];
        fx.on_apply(g, 1, 1, 0.0, &mut target);
        let once = target.glyphs[1];
        fx.on_apply(once, 1, 1, 0.0, &mut target);
        assert_eq!(target.glyphs[1], once);
        assert_eq!(once.bits() & 0xFFFF_FFFF, g.bits() & 0xFFFF_FFFF);
    }

    #[test]
    fn keeps_alpha() {
        let config = TypingConfig::default();
        let mut fx = RainbowEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("a", PackedRgba::WHITE.with_alpha(40));
        target.step(&mut fx, 0.5);
        assert_eq!(target.glyphs[0].color().a(), 40);
    }

    #[test]
    fn finite_rainbow_hands_back_the_original_color() {
        let config = TypingConfig::default();
        let mut fx = RainbowEffect::new(&Params::new(&["1", "1", "1", "0.5", "2"], &config));
        let mut target = RecordingTarget::new("ab", PackedRgba::WHITE);
        target.step(&mut fx, 0.5);
        assert!(target.glyphs.iter().all(|g| g.color() != PackedRgba::WHITE));
        target.step(&mut fx, 1.5);
        assert!(target.glyphs.iter().all(|g| g.color() == PackedRgba::WHITE));
        fx.update(0.25);
        fx.on_finish(&mut target);
        assert!(target.glyphs.iter().all(|g| g.color() == PackedRgba::WHITE));
    }
}

#![forbid(unsafe_code)]

//! `{OCEAN=distance;frequency;saturation;lightness;duration}`: colors drift
//! between sea greens and deep blues in slow swells.

use typist_core::{Glyph, Interpolation, PackedRgba};

use super::{GlyphSlots, fade_color};
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct OceanEffect {
    core: EffectCore,
    distance: f32,
    frequency: f32,
    saturation: f32,
    lightness: f32,
    originals: GlyphSlots<PackedRgba>,
}

impl OceanEffect {
    /// Hue at the crest of a swell (sea green).
    pub const HUE_LOW: f32 = 0.45;
    /// Hue in the trough (deep blue).
    pub const HUE_HIGH: f32 = 0.65;
    /// Phase step between glyphs at `distance = 1`.
    pub const DEFAULT_DISTANCE: f32 = 0.1;
    /// Seconds per half swell at `frequency = 1`.
    pub const DEFAULT_FREQUENCY: f32 = 1.5;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(4)),
            distance: params.float(0, 1.0),
            frequency: params.float(1, 1.0),
            saturation: params.float(2, 0.8),
            lightness: params.float(3, 0.4),
            originals: GlyphSlots::default(),
        }
    }
}

impl Effect for OceanEffect {
    fn name(&self) -> &'static str {
        "OCEAN"
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
        let p = self.core.calculate_progress(
            Self::DEFAULT_FREQUENCY / self.frequency,
            local as f32 * Self::DEFAULT_DISTANCE / self.distance,
            true,
        );
        let swell = Interpolation::Sine.apply(p);
        let hue = Self::HUE_LOW + (Self::HUE_HIGH - Self::HUE_LOW) * swell;
        let lightness = self.lightness * (0.85 + 0.3 * (1.0 - swell));
        let original = self.originals.get_or_insert_with(local, || glyph.color());
        let color = PackedRgba::from_hsl(hue, self.saturation, lightness).with_alpha(original.a());
        let color = fade_color(&self.core, original, color);
        target.set_glyph(global, glyph.with_color(color));
    }

    fn on_finish(&mut self, target: &mut dyn EffectTarget) {
        self.originals.restore_colors(&self.core, target);
    }
}

#![forbid(unsafe_code)]

//! `{JOLT=distance;intensity;duration;likelihood;baseColor;joltColor}`:
//! glyphs mostly sit still, but each frame any glyph may jolt with the given
//! likelihood, shaking and taking the jolt color while it does.

use typist_core::{Glyph, PackedRgba};

use super::{GlyphSlots, fade_color};
use super::shake::ShakeWalk;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct JoltEffect {
    core: EffectCore,
    distance: f32,
    intensity: f32,
    likelihood: f32,
    base_color: Option<PackedRgba>,
    jolt_color: Option<PackedRgba>,
    walk: ShakeWalk,
    originals: GlyphSlots<PackedRgba>,
}

impl JoltEffect {
    /// Radius of a jolt, in line heights.
    pub const DEFAULT_DISTANCE: f32 = 0.12;
    pub const DEFAULT_INTENSITY: f32 = 0.5;
    /// Chance per glyph per frame of jolting.
    pub const DEFAULT_LIKELIHOOD: f32 = 0.05;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(2)),
            distance: params.float(0, 1.0).abs(),
            intensity: params.float(1, 1.0),
            likelihood: params.float(3, Self::DEFAULT_LIKELIHOOD),
            base_color: params.color(4),
            jolt_color: params.color(5),
            walk: ShakeWalk::default(),
            originals: GlyphSlots::default(),
        }
    }
}

impl Effect for JoltEffect {
    fn name(&self) -> &'static str {
        "JOLT"
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
        let jolting = target.random() < self.likelihood;
        let radius = if jolting {
            target.line_height(global) * self.distance * Self::DEFAULT_DISTANCE
        } else {
            0.0
        };
        let blend = (self.intensity * Self::DEFAULT_INTENSITY).clamp(0.0, 1.0);
        let fadeout = self.core.calculate_fadeout();
        let (x, y) = self.walk.step(local, radius, blend, fadeout, target);
        target.add_offset(global, x, y);

        let color = match (jolting, self.jolt_color) {
            (true, Some(jolt)) => Some(jolt),
            _ if self.jolt_color.is_some() || self.base_color.is_some() => {
                Some(self.base_color.unwrap_or(original))
            }
            _ => None,
        };
        if let Some(color) = color {
            let color = fade_color(&self.core, original, color);
            target.set_glyph(global, glyph.with_color(color));
        }
    }

    fn on_finish(&mut self, target: &mut dyn EffectTarget) {
        if self.jolt_color.is_some() || self.base_color.is_some() {
            self.originals.restore_colors(&self.core, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTarget;
    use typist_core::TypingConfig;

    #[test]
    fn always_jolting_uses_jolt_color() {
        let config = TypingConfig::default();
        let mut fx = JoltEffect::new(&Params::new(&["1", "1", "", "1", "white", "red"], &config));
        let mut target = RecordingTarget::new("ab", PackedRgba::BLUE);
        target.step(&mut fx, 0.1);
        assert!(target.glyphs.iter().all(|g| g.color() == PackedRgba::RED));
    }

    #[test]
    fn never_jolting_restores_base_color_and_rest() {
        let config = TypingConfig::default();
        let mut fx = JoltEffect::new(&Params::new(&["1", "1", "", "0", "white", "red"], &config));
        let mut target = RecordingTarget::new("ab", PackedRgba::BLUE);
        target.step(&mut fx, 0.1);
        assert!(target.glyphs.iter().all(|g| g.color() == PackedRgba::WHITE));
        assert!(target.offsets.iter().all(|&o| o == (0.0, 0.0)));
    }
}

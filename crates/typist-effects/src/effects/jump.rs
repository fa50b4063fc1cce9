#![forbid(unsafe_code)]

//! `{JUMP=distance;frequency;intensity;duration}`: glyphs hop up and bounce
//! back down, one after another.

use typist_core::{Glyph, Interpolation};

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct JumpEffect {
    core: EffectCore,
    distance: f32,
    frequency: f32,
    intensity: f32,
}

impl JumpEffect {
    pub const DEFAULT_FREQUENCY: f32 = 50.0;
    pub const DEFAULT_DISTANCE: f32 = 1.33;
    pub const DEFAULT_INTENSITY: f32 = 1.0;
    /// Share of the cycle spent rising.
    pub const SPLIT: f32 = 0.2;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(3)),
            distance: params.float(0, 1.0),
            frequency: params.float(1, 1.0),
            intensity: params.float(2, 1.0),
        }
    }
}

impl Effect for JumpEffect {
    fn name(&self) -> &'static str {
        "JUMP"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn on_apply(
        &mut self,
        _glyph: Glyph,
        local: usize,
        global: usize,
        _delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let modifier = Self::DEFAULT_INTENSITY / self.intensity;
        let spacing = Self::DEFAULT_FREQUENCY / self.frequency;
        let p = self
            .core
            .calculate_progress(modifier, -(local as f32) / spacing, false);
        let height = if p < Self::SPLIT {
            Interpolation::Pow2Out.apply(p / Self::SPLIT)
        } else {
            1.0 - Interpolation::BounceOut.apply((p - Self::SPLIT) / (1.0 - Self::SPLIT))
        };
        let y = target.line_height(global) * self.distance * height * Self::DEFAULT_DISTANCE
            * self.core.calculate_fadeout();
        target.add_offset(global, 0.0, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTarget;
    use typist_core::{PackedRgba, TypingConfig};

    #[test]
    fn never_dips_below_baseline() {
        let config = TypingConfig::default();
        let mut fx = JumpEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("jumping", PackedRgba::WHITE);
        for _ in 0..200 {
            target.step(&mut fx, 0.013);
            for &(_, y) in &target.offsets {
                assert!(y >= -1e-4, "{y}");
                assert!(y <= JumpEffect::DEFAULT_DISTANCE + 1e-4, "{y}");
            }
        }
    }
}

#![forbid(unsafe_code)]

//! `{SICK=distance;intensity;duration}`: now and then a glyph sags below the
//! baseline and slowly recovers, as if it felt ill.

use typist_core::{Glyph, Interpolation};

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct SickEffect {
    core: EffectCore,
    distance: f32,
    intensity: f32,
    sagging: Vec<bool>,
}

impl SickEffect {
    pub const DEFAULT_FREQUENCY: f32 = 50.0;
    /// Depth of a sag, in line heights.
    pub const DEFAULT_DISTANCE: f32 = 0.125;
    pub const DEFAULT_INTENSITY: f32 = 1.0;
    /// Chance that a glyph starts sagging when its cycle begins.
    pub const SAG_CHANCE: f32 = 0.75;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(2)),
            distance: params.float(0, 1.0),
            intensity: params.float(1, 1.0),
            sagging: Vec::new(),
        }
    }
}

impl Effect for SickEffect {
    fn name(&self) -> &'static str {
        "SICK"
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
        if local >= self.sagging.len() {
            self.sagging.resize(local + 1, false);
        }
        let modifier = Self::DEFAULT_INTENSITY / self.intensity;
        let p = self.core.calculate_progress(
            modifier,
            -(local as f32) / Self::DEFAULT_FREQUENCY,
            false,
        );
        if p < 0.05 && !self.sagging[local] && target.random() < Self::SAG_CHANCE {
            self.sagging[local] = true;
        }
        if p > 0.95 {
            self.sagging[local] = false;
        }
        if !self.sagging[local] {
            return;
        }
        let depth = if p < 0.5 {
            Interpolation::Pow2Out.apply(p / 0.5)
        } else {
            1.0 - Interpolation::Pow2In.apply((p - 0.5) / 0.5)
        };
        let y = -target.line_height(global) * self.distance * depth * Self::DEFAULT_DISTANCE
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
    fn only_sags_downward() {
        let config = TypingConfig::default();
        let mut fx = SickEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("queasy", PackedRgba::WHITE);
        let mut any = false;
        for _ in 0..600 {
            target.step(&mut fx, 1.0 / 60.0);
            for &(_, y) in &target.offsets {
                assert!(y <= 0.0);
                assert!(y >= -SickEffect::DEFAULT_DISTANCE - 1e-5);
                any |= y < 0.0;
            }
        }
        assert!(any);
    }
}

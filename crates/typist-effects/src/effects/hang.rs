#![forbid(unsafe_code)]

//! `{HANG=distance;speed}`: each glyph lifts up, then drops back and
//! bounces to rest.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct HangEffect {
    core: EffectCore,
    distance: f32,
    tween: Tween,
}

impl HangEffect {
    pub const DEFAULT_DISTANCE: f32 = 0.7;
    pub const DEFAULT_SECONDS: f32 = 0.6;
    /// Fraction of the tween spent lifting.
    pub const SPLIT: f32 = 0.3;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            distance: params.float(0, 1.0),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(1, 1.0),
                false,
                Interpolation::Linear,
            ),
        }
    }
}

impl Effect for HangEffect {
    fn name(&self) -> &'static str {
        "HANG"
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
        delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let p = self.tween.progress(local, delta);
        let height = if p < Self::SPLIT {
            Interpolation::Pow3Out.apply(p / Self::SPLIT)
        } else {
            1.0 - Interpolation::BounceOut.apply((p - Self::SPLIT) / (1.0 - Self::SPLIT))
        };
        let y = target.line_height(global) * self.distance * Self::DEFAULT_DISTANCE * height;
        target.add_offset(global, 0.0, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTarget;
    use typist_core::{PackedRgba, TypingConfig};

    #[test]
    fn peaks_at_split_and_lands() {
        let config = TypingConfig::default();
        let mut fx = HangEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("a", PackedRgba::WHITE);
        target.step(&mut fx, HangEffect::DEFAULT_SECONDS * HangEffect::SPLIT);
        assert!((target.offsets[0].1 - HangEffect::DEFAULT_DISTANCE).abs() < 1e-4);
        target.step(&mut fx, HangEffect::DEFAULT_SECONDS);
        assert!(target.offsets[0].1.abs() < 1e-4);
    }
}

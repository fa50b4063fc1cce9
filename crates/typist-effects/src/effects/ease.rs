#![forbid(unsafe_code)]

//! `{EASE=distance;speed;elastic}`: each glyph rises from below into place.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

/// Vertical ease-in from below the baseline.
#[derive(Debug, Clone)]
pub struct EaseEffect {
    core: EffectCore,
    distance: f32,
    tween: Tween,
}

impl EaseEffect {
    /// Starting depth, in line heights, at `distance = 1`.
    pub const DEFAULT_DISTANCE: f32 = 0.15;
    /// Seconds per glyph at `speed = 1`.
    pub const DEFAULT_SECONDS: f32 = 0.35;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            distance: params.float(0, 1.0),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(1, 1.0),
                params.bool(2, false),
                Interpolation::Sine,
            ),
        }
    }
}

impl Effect for EaseEffect {
    fn name(&self) -> &'static str {
        "EASE"
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
        let left = self.tween.remaining(local, delta);
        let y = -target.line_height(global) * self.distance * Self::DEFAULT_DISTANCE * left;
        target.add_offset(global, 0.0, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTarget;
    use typist_core::{PackedRgba, TypingConfig};

    #[test]
    fn starts_below_and_settles() {
        let config = TypingConfig::default();
        let mut fx = EaseEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("ab", PackedRgba::WHITE).with_line_height(10.0);
        target.step(&mut fx, 0.0);
        assert!((target.offsets[0].1 + 1.5).abs() < 1e-4);
        target.step(&mut fx, 1.0);
        assert_eq!(target.offsets[0], (0.0, 0.0));
    }

    #[test]
    fn elastic_takes_longer_without_overshooting() {
        let config = TypingConfig::default();
        let mut plain = EaseEffect::new(&Params::new(&[], &config));
        let mut elastic = EaseEffect::new(&Params::new(&["1", "1", "true"], &config));
        let mut a = RecordingTarget::new("a", PackedRgba::WHITE);
        let mut b = RecordingTarget::new("a", PackedRgba::WHITE);
        a.step(&mut plain, 0.5);
        b.step(&mut elastic, 0.5);
        assert_eq!(a.offsets[0], (0.0, 0.0));
        assert!(b.offsets[0].1 < 0.0);
        for _ in 0..100 {
            b.step(&mut elastic, 0.01);
            assert!(b.offsets[0].1 <= 0.0);
        }
        assert_eq!(b.offsets[0], (0.0, 0.0));
    }
}

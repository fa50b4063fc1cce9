#![forbid(unsafe_code)]

//! `{ZIPPER=distance;speed;elastic}`: alternate glyphs come in from above and
//! below.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct ZipperEffect {
    core: EffectCore,
    distance: f32,
    tween: Tween,
}

impl ZipperEffect {
    pub const DEFAULT_DISTANCE: f32 = 0.6;
    pub const DEFAULT_SECONDS: f32 = 0.4;

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

impl Effect for ZipperEffect {
    fn name(&self) -> &'static str {
        "ZIPPER"
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
        let side = if global % 2 == 0 { 1.0 } else { -1.0 };
        let y = side * target.line_height(global) * self.distance * Self::DEFAULT_DISTANCE * left;
        target.add_offset(global, 0.0, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTarget;
    use typist_core::{PackedRgba, TypingConfig};

    #[test]
    fn neighbours_start_on_opposite_sides() {
        let config = TypingConfig::default();
        let mut fx = ZipperEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("abcd", PackedRgba::WHITE);
        target.step(&mut fx, 0.0);
        assert!(target.offsets[0].1 > 0.0);
        assert!(target.offsets[1].1 < 0.0);
        assert_eq!(target.offsets[0].1, -target.offsets[1].1);
    }
}

#![forbid(unsafe_code)]

//! `{SPIN=rotations;speed;elastic}`: glyphs rotate into place.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct SpinEffect {
    core: EffectCore,
    rotations: f32,
    tween: Tween,
}

impl SpinEffect {
    pub const DEFAULT_SECONDS: f32 = 0.5;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            rotations: params.float(0, 1.0),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(1, 1.0),
                params.bool(2, false),
                Interpolation::Sine,
            ),
        }
    }
}

impl Effect for SpinEffect {
    fn name(&self) -> &'static str {
        "SPIN"
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
        target.add_rotation(global, 360.0 * self.rotations * left);
    }
}

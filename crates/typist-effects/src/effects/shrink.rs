#![forbid(unsafe_code)]

//! `{SHRINK=distance;expansion;speed;elastic}`: glyphs appear enlarged and
//! raised, then shrink into place.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct ShrinkEffect {
    core: EffectCore,
    distance: f32,
    expansion: f32,
    tween: Tween,
}

impl ShrinkEffect {
    pub const DEFAULT_DISTANCE: f32 = 0.25;
    pub const DEFAULT_EXPANSION: f32 = 1.5;
    pub const DEFAULT_SECONDS: f32 = 0.3;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            distance: params.float(0, 1.0),
            expansion: params.float(1, 1.0),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(2, 1.0),
                params.bool(3, false),
                Interpolation::Sine,
            ),
        }
    }
}

impl Effect for ShrinkEffect {
    fn name(&self) -> &'static str {
        "SHRINK"
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
        let lh = target.line_height(global);
        let grow = lh * self.expansion * Self::DEFAULT_EXPANSION * left;
        target.add_size(global, grow, grow);
        target.add_offset(global, 0.0, lh * self.distance * Self::DEFAULT_DISTANCE * left);
    }
}

#![forbid(unsafe_code)]

//! `{EMERGE=speed;elastic}`: glyphs grow upward out of the baseline.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct EmergeEffect {
    core: EffectCore,
    tween: Tween,
}

impl EmergeEffect {
    pub const DEFAULT_SECONDS: f32 = 0.25;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(0, 1.0),
                params.bool(1, false),
                Interpolation::Pow2Out,
            ),
        }
    }
}

impl Effect for EmergeEffect {
    fn name(&self) -> &'static str {
        "EMERGE"
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
        let shrink = target.line_height(global) * left;
        // Sizing is about the center; drop by half to keep the baseline.
        target.add_size(global, 0.0, -shrink);
        target.add_offset(global, 0.0, -shrink * 0.5);
    }
}

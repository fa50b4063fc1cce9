#![forbid(unsafe_code)]

//! `{SQUASH=speed;elastic}`: glyphs appear flattened and wide, then spring
//! back to shape.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct SquashEffect {
    core: EffectCore,
    tween: Tween,
}

impl SquashEffect {
    /// Share of the line height removed vertically at the start.
    pub const DEFAULT_SQUASH: f32 = 0.6;
    pub const DEFAULT_SECONDS: f32 = 0.4;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(0, 1.0),
                params.bool(1, false),
                Interpolation::SineOut,
            ),
        }
    }
}

impl Effect for SquashEffect {
    fn name(&self) -> &'static str {
        "SQUASH"
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
        let squash = target.line_height(global) * Self::DEFAULT_SQUASH * left;
        target.add_size(global, squash * 0.5, -squash);
        target.add_offset(global, 0.0, -squash * 0.5);
    }
}

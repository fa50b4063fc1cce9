#![forbid(unsafe_code)]

//! `{SLAM=expansion;speed;elastic}`: glyphs appear huge and slam down to
//! their normal size.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct SlamEffect {
    core: EffectCore,
    expansion: f32,
    tween: Tween,
}

impl SlamEffect {
    /// Extra size at the start, in line heights.
    pub const DEFAULT_EXPANSION: f32 = 4.0;
    pub const DEFAULT_SECONDS: f32 = 0.35;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            expansion: params.float(0, 1.0),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(1, 1.0),
                params.bool(2, false),
                Interpolation::Pow3In,
            ),
        }
    }
}

impl Effect for SlamEffect {
    fn name(&self) -> &'static str {
        "SLAM"
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
        let grow = target.line_height(global) * self.expansion * Self::DEFAULT_EXPANSION * left;
        target.add_size(global, grow, grow);
    }
}

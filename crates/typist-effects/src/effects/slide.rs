#![forbid(unsafe_code)]

//! `{SLIDE=distance;speed;elastic}`: each glyph slides in from the left.

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

/// Horizontal slide-in.
#[derive(Debug, Clone)]
pub struct SlideEffect {
    core: EffectCore,
    distance: f32,
    tween: Tween,
}

impl SlideEffect {
    /// Starting distance to the left, in line heights.
    pub const DEFAULT_DISTANCE: f32 = 2.0;
    pub const DEFAULT_SECONDS: f32 = 0.4;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            distance: params.float(0, 1.0),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(1, 1.0),
                params.bool(2, false),
                Interpolation::SineOut,
            ),
        }
    }
}

impl Effect for SlideEffect {
    fn name(&self) -> &'static str {
        "SLIDE"
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
        let x = -target.line_height(global) * self.distance * Self::DEFAULT_DISTANCE * left;
        target.add_offset(global, x, 0.0);
    }
}

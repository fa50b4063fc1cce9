#![forbid(unsafe_code)]

//! `{SPIRAL=distance;speed;rotations}`: glyphs circle inward to their place.

use std::f32::consts::TAU;

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct SpiralEffect {
    core: EffectCore,
    distance: f32,
    rotations: f32,
    tween: Tween,
}

impl SpiralEffect {
    pub const DEFAULT_DISTANCE: f32 = 1.0;
    pub const DEFAULT_SECONDS: f32 = 0.75;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            distance: params.float(0, 1.0),
            rotations: params.float(2, 1.0),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(1, 1.0),
                false,
                Interpolation::SineOut,
            ),
        }
    }
}

impl Effect for SpiralEffect {
    fn name(&self) -> &'static str {
        "SPIRAL"
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
        if left == 0.0 {
            return;
        }
        let radius = target.line_height(global) * self.distance * Self::DEFAULT_DISTANCE * left;
        let angle = TAU * self.rotations * left;
        target.add_offset(global, angle.cos() * radius, angle.sin() * radius);
    }
}

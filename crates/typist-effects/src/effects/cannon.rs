#![forbid(unsafe_code)]

//! `{CANNON=power;speed;elastic}`: glyphs are launched from far away, large,
//! and arc down into place.

use std::f32::consts::PI;

use typist_core::{Glyph, Interpolation};

use super::Tween;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct CannonEffect {
    core: EffectCore,
    power: f32,
    tween: Tween,
}

impl CannonEffect {
    /// Launch distance to the left, in line heights.
    pub const DEFAULT_DISTANCE: f32 = 3.0;
    /// Peak of the arc, in line heights.
    pub const DEFAULT_ARC: f32 = 1.5;
    pub const DEFAULT_SECONDS: f32 = 0.6;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            power: params.float(0, 1.0),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(1, 1.0),
                params.bool(2, false),
                Interpolation::Pow2Out,
            ),
        }
    }
}

impl Effect for CannonEffect {
    fn name(&self) -> &'static str {
        "CANNON"
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
        let lh = target.line_height(global) * self.power;
        let travelled = (1.0 - left).clamp(0.0, 1.0);
        let x = -lh * Self::DEFAULT_DISTANCE * left;
        let y = lh * Self::DEFAULT_ARC * (travelled * PI).sin();
        target.add_offset(global, x, y);
        target.add_size(global, lh * left, lh * left);
    }
}

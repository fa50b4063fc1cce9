#![forbid(unsafe_code)]

//! `{ROTATE=degrees;duration}`: a fixed tilt.

use typist_core::Glyph;

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct RotateEffect {
    core: EffectCore,
    degrees: f32,
}

impl RotateEffect {
    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(1)),
            degrees: params.float(0, 0.0),
        }
    }
}

impl Effect for RotateEffect {
    fn name(&self) -> &'static str {
        "ROTATE"
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
        _local: usize,
        global: usize,
        _delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        target.add_rotation(global, self.degrees * self.core.calculate_fadeout());
    }
}

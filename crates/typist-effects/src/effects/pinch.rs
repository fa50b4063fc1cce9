#![forbid(unsafe_code)]

//! `{PINCH=amount;frequency;duration}`: glyphs are squeezed thin and tall,
//! then released.

use typist_core::{Glyph, Interpolation};

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct PinchEffect {
    core: EffectCore,
    amount: f32,
    frequency: f32,
}

impl PinchEffect {
    pub const DEFAULT_AMOUNT: f32 = 0.5;
    pub const DEFAULT_PERIOD: f32 = 0.8;
    pub const GLYPH_PHASE: f32 = 0.06;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(2)),
            amount: params.float(0, 1.0),
            frequency: params.float(1, 1.0),
        }
    }
}

impl Effect for PinchEffect {
    fn name(&self) -> &'static str {
        "PINCH"
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
        _delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let p = self.core.calculate_progress(
            Self::DEFAULT_PERIOD / self.frequency,
            local as f32 * Self::GLYPH_PHASE,
            true,
        );
        let squeeze = target.line_height(global)
            * self.amount
            * Self::DEFAULT_AMOUNT
            * Interpolation::Smooth.apply(p)
            * self.core.calculate_fadeout();
        target.add_size(global, -squeeze, squeeze);
        target.add_offset(global, 0.0, squeeze * 0.5);
    }
}

#![forbid(unsafe_code)]

//! `{THROB=expansion;frequency;duration}`: glyphs swell and shrink in a
//! rolling pulse.

use typist_core::{Glyph, Interpolation};

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct ThrobEffect {
    core: EffectCore,
    expansion: f32,
    frequency: f32,
}

impl ThrobEffect {
    /// Size swing, in line heights.
    pub const DEFAULT_EXPANSION: f32 = 0.25;
    /// Seconds per half cycle at `frequency = 1`.
    pub const DEFAULT_PERIOD: f32 = 0.75;
    pub const GLYPH_PHASE: f32 = 0.1;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(2)),
            expansion: params.float(0, 1.0),
            frequency: params.float(1, 1.0),
        }
    }
}

impl Effect for ThrobEffect {
    fn name(&self) -> &'static str {
        "THROB"
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
        let grow = target.line_height(global)
            * self.expansion
            * Self::DEFAULT_EXPANSION
            * Interpolation::Sine.lerp(-1.0, 1.0, p)
            * self.core.calculate_fadeout();
        target.add_size(global, grow, grow);
    }
}

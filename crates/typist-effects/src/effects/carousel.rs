#![forbid(unsafe_code)]

//! `{CAROUSEL=frequency;duration}`: glyphs turn edge-on and back, as if
//! spinning around a vertical axis.

use std::f32::consts::TAU;

use typist_core::Glyph;

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct CarouselEffect {
    core: EffectCore,
    frequency: f32,
}

impl CarouselEffect {
    /// Seconds per turn at `frequency = 1`.
    pub const DEFAULT_PERIOD: f32 = 0.5;
    /// Phase step between neighbouring glyphs.
    pub const GLYPH_PHASE: f32 = 0.08;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(1)),
            frequency: params.float(0, 1.0),
        }
    }
}

impl Effect for CarouselEffect {
    fn name(&self) -> &'static str {
        "CAROUSEL"
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
            false,
        );
        let width = (p * TAU).cos();
        let shrink = target.line_height(global) * (width.abs() - 1.0) * self.core.calculate_fadeout();
        target.add_size(global, shrink, 0.0);
    }
}

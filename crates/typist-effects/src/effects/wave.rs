#![forbid(unsafe_code)]

//! `{WAVE=distance;frequency;intensity;duration}`: glyphs bob up and down in
//! a travelling wave.

use typist_core::{Glyph, Interpolation};

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct WaveEffect {
    core: EffectCore,
    distance: f32,
    frequency: f32,
    intensity: f32,
}

impl WaveEffect {
    /// Glyphs per full wave at `frequency = 1`.
    pub const DEFAULT_FREQUENCY: f32 = 15.0;
    /// Amplitude in line heights.
    pub const DEFAULT_DISTANCE: f32 = 0.33;
    /// Seconds per half period at `intensity = 1`.
    pub const DEFAULT_INTENSITY: f32 = 0.5;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(3)),
            distance: params.float(0, 1.0),
            frequency: params.float(1, 1.0),
            intensity: params.float(2, 1.0),
        }
    }
}

impl Effect for WaveEffect {
    fn name(&self) -> &'static str {
        "WAVE"
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
        let modifier = Self::DEFAULT_INTENSITY / self.intensity;
        let spacing = Self::DEFAULT_FREQUENCY / self.frequency;
        let progress = self
            .core
            .calculate_progress(modifier, local as f32 / spacing, true);
        let wave = Interpolation::Sine.lerp(-1.0, 1.0, progress);
        let y = target.line_height(global) * self.distance * wave * Self::DEFAULT_DISTANCE
            * self.core.calculate_fadeout();
        target.add_offset(global, 0.0, y);
    }
}

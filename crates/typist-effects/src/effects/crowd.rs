#![forbid(unsafe_code)]

//! `{CROWD=distance;extent;duration}`: glyphs jostle sideways and tilt like
//! people in a busy crowd.

use typist_core::Glyph;

use super::value_noise;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct CrowdEffect {
    core: EffectCore,
    distance: f32,
    extent: f32,
}

impl CrowdEffect {
    /// Sideways reach, in line heights.
    pub const DEFAULT_DISTANCE: f32 = 0.15;
    /// Tilt, in degrees.
    pub const DEFAULT_EXTENT: f32 = 15.0;
    /// Noise cycles per second.
    pub const DEFAULT_SPEED: f32 = 2.0;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(2)),
            distance: params.float(0, 1.0),
            extent: params.float(1, 1.0),
        }
    }
}

impl Effect for CrowdEffect {
    fn name(&self) -> &'static str {
        "CROWD"
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
        let t = self.core.total_time * Self::DEFAULT_SPEED;
        let seed = local as u32;
        let fade = self.core.calculate_fadeout();
        let x = target.line_height(global)
            * self.distance
            * Self::DEFAULT_DISTANCE
            * value_noise(t, seed.wrapping_mul(31))
            * fade;
        let tilt = self.extent * Self::DEFAULT_EXTENT * value_noise(t, seed.wrapping_mul(131) ^ 0x5EED) * fade;
        target.add_offset(global, x, 0.0);
        target.add_rotation(global, tilt);
    }
}

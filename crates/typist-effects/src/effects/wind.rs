#![forbid(unsafe_code)]

//! `{WIND=distanceX;distanceY;spacing;intensity;duration}`: gusts push glyphs
//! to the right and lift them, driven by smooth noise that travels along the
//! text.

use typist_core::Glyph;

use super::value_noise;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct WindEffect {
    core: EffectCore,
    distance_x: f32,
    distance_y: f32,
    spacing: f32,
    intensity: f32,
}

impl WindEffect {
    pub const DEFAULT_DISTANCE_X: f32 = 0.5;
    pub const DEFAULT_DISTANCE_Y: f32 = 0.15;
    /// Noise distance between neighbouring glyphs at `spacing = 1`.
    pub const DEFAULT_SPACING: f32 = 0.1;
    /// Gust cycles per second at `intensity = 1`.
    pub const DEFAULT_INTENSITY: f32 = 0.75;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(4)),
            distance_x: params.float(0, 1.0),
            distance_y: params.float(1, 1.0),
            spacing: params.float(2, 1.0),
            intensity: params.float(3, 1.0),
        }
    }
}

impl Effect for WindEffect {
    fn name(&self) -> &'static str {
        "WIND"
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
        let t = self.core.total_time * self.intensity * Self::DEFAULT_INTENSITY
            - local as f32 * self.spacing * Self::DEFAULT_SPACING;
        let gust = value_noise(t, 0x57) * 0.5 + 0.5;
        let lift = value_noise(t * 1.7, 0xA11);
        let lh = target.line_height(global);
        let fade = self.core.calculate_fadeout();
        target.add_offset(
            global,
            lh * self.distance_x * Self::DEFAULT_DISTANCE_X * gust * fade,
            lh * self.distance_y * Self::DEFAULT_DISTANCE_Y * lift * fade,
        );
    }
}

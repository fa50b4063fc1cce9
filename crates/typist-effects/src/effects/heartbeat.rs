#![forbid(unsafe_code)]

//! `{HEARTBEAT=expansion;frequency;duration}`: the whole range swells twice
//! in quick succession, then rests, like a pulse.

use std::f32::consts::PI;

use typist_core::Glyph;

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct HeartbeatEffect {
    core: EffectCore,
    expansion: f32,
    frequency: f32,
}

impl HeartbeatEffect {
    /// Growth at the peak of a beat, in line heights.
    pub const DEFAULT_EXPANSION: f32 = 0.5;
    /// Seconds per cycle at `frequency = 1`.
    pub const DEFAULT_PERIOD: f32 = 1.0;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(2)),
            expansion: params.float(0, 1.0),
            frequency: params.float(1, 1.0),
        }
    }

    /// Pulse shape over one cycle: two beats in the first half, rest after.
    fn beat(p: f32) -> f32 {
        if p < 0.25 {
            (p / 0.25 * PI).sin()
        } else if p < 0.5 {
            0.6 * ((p - 0.25) / 0.25 * PI).sin()
        } else {
            0.0
        }
    }
}

impl Effect for HeartbeatEffect {
    fn name(&self) -> &'static str {
        "HEARTBEAT"
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
        let p = self
            .core
            .calculate_progress(Self::DEFAULT_PERIOD / self.frequency, 0.0, false);
        let grow = target.line_height(global)
            * self.expansion
            * Self::DEFAULT_EXPANSION
            * Self::beat(p)
            * self.core.calculate_fadeout();
        target.add_size(global, grow, grow);
    }
}

#![forbid(unsafe_code)]

//! `{SHAKE=distance;intensity;duration}`: glyphs wander randomly around their
//! place.
//!
//! Each frame draws a new random target inside a disc of radius
//! `line_height * distance * DEFAULT_DISTANCE` and moves part of the way
//! there from the previous frame's offset, so the motion is a smooth random
//! walk that never leaves the disc.

use std::f32::consts::TAU;

use typist_core::Glyph;

use super::GlyphSlots;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

/// Random walk state shared by the shaking effects.
#[derive(Debug, Clone, Default)]
pub(crate) struct ShakeWalk {
    last: GlyphSlots<(f32, f32)>,
}

impl ShakeWalk {
    /// Step glyph `local` toward a new random point within `radius` (or
    /// toward rest when `radius` is zero) and return the new offset.
    pub(crate) fn step(
        &mut self,
        local: usize,
        radius: f32,
        blend: f32,
        fadeout: f32,
        target: &mut dyn EffectTarget,
    ) -> (f32, f32) {
        let (last_x, last_y) = self.last.get(local).unwrap_or((0.0, 0.0));
        let (goal_x, goal_y) = if radius > 0.0 {
            let angle = target.random() * TAU;
            let reach = target.random().sqrt() * radius;
            (angle.cos() * reach, angle.sin() * reach)
        } else {
            (0.0, 0.0)
        };
        let x = (last_x + (goal_x - last_x) * blend) * fadeout;
        let y = (last_y + (goal_y - last_y) * blend) * fadeout;
        self.last.set(local, (x, y));
        (x, y)
    }
}

#[derive(Debug, Clone)]
pub struct ShakeEffect {
    core: EffectCore,
    distance: f32,
    intensity: f32,
    walk: ShakeWalk,
}

impl ShakeEffect {
    /// Radius of the shake, in line heights.
    pub const DEFAULT_DISTANCE: f32 = 0.12;
    /// Share of the way toward the new target covered per frame.
    pub const DEFAULT_INTENSITY: f32 = 0.5;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(2)),
            distance: params.float(0, 1.0).abs(),
            intensity: params.float(1, 1.0),
            walk: ShakeWalk::default(),
        }
    }
}

impl Effect for ShakeEffect {
    fn name(&self) -> &'static str {
        "SHAKE"
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
        let radius = target.line_height(global) * self.distance * Self::DEFAULT_DISTANCE;
        let blend = (self.intensity * Self::DEFAULT_INTENSITY).clamp(0.0, 1.0);
        let fadeout = self.core.calculate_fadeout();
        let (x, y) = self.walk.step(local, radius, blend, fadeout, target);
        target.add_offset(global, x, y);
    }
}

#![forbid(unsafe_code)]

//! `{ATTENTION=spread;sizeY;speed}`: glyphs near the one under the pointer
//! grow taller, falling off with distance, and shrink back when the pointer
//! leaves.

use typist_core::Glyph;

use super::GlyphSlots;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct AttentionEffect {
    core: EffectCore,
    spread: f32,
    size_y: f32,
    speed: f32,
    hovered: Option<usize>,
    levels: GlyphSlots<f32>,
}

impl AttentionEffect {
    /// Glyphs on either side of the hovered one that still react.
    pub const DEFAULT_SPREAD: f32 = 5.0;
    /// Extra height at full attention, in line heights.
    pub const DEFAULT_SIZE_Y: f32 = 0.5;
    /// Level change per second at `speed = 1`.
    pub const DEFAULT_SPEED: f32 = 8.0;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            spread: params.float(0, Self::DEFAULT_SPREAD).max(0.0),
            size_y: params.float(1, 1.0),
            speed: params.float(2, 1.0).max(0.0),
            hovered: None,
            levels: GlyphSlots::default(),
        }
    }

    fn goal(&self, global: usize) -> f32 {
        match self.hovered {
            Some(over) => {
                let distance = over.abs_diff(global) as f32;
                if self.spread <= 0.0 {
                    if distance == 0.0 { 1.0 } else { 0.0 }
                } else {
                    (1.0 - distance / (self.spread + 1.0)).max(0.0)
                }
            }
            None => 0.0,
        }
    }
}

impl Effect for AttentionEffect {
    fn name(&self) -> &'static str {
        "ATTENTION"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn begin_frame(&mut self, target: &mut dyn EffectTarget) {
        self.hovered = target.over_index().filter(|&i| self.core.covers(i));
    }

    fn on_apply(
        &mut self,
        _glyph: Glyph,
        local: usize,
        global: usize,
        delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let goal = self.goal(global);
        let level = self.levels.get(local).unwrap_or(0.0);
        let step = self.speed * Self::DEFAULT_SPEED * delta;
        let level = if level < goal {
            (level + step).min(goal)
        } else {
            (level - step).max(goal)
        };
        self.levels.set(local, level);
        if level > 0.0 {
            let grow = target.line_height(global) * self.size_y * Self::DEFAULT_SIZE_Y * level;
            target.add_size(global, 0.0, grow);
            target.add_offset(global, 0.0, grow * 0.5);
        }
    }

    fn tracks_input(&self) -> bool {
        true
    }
}

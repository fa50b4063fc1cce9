#![forbid(unsafe_code)]

//! `{HIGHLIGHT=baseColor;distance;frequency;saturation;lightness;all}`: the
//! glyph under the pointer (or the whole range, with `all`) cycles through
//! hues; every other glyph shows `baseColor`, or its own color when no base
//! color is given.

use typist_core::{Glyph, PackedRgba};

use super::GlyphSlots;
use super::rainbow::HueCycle;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct HighlightEffect {
    core: EffectCore,
    base_color: Option<PackedRgba>,
    cycle: HueCycle,
    all: bool,
    hovered: Option<usize>,
    originals: GlyphSlots<PackedRgba>,
}

impl HighlightEffect {
    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            base_color: params.color(0),
            cycle: HueCycle {
                distance: params.float(1, 1.0),
                frequency: params.float(2, 1.0),
                saturation: params.float(3, 1.0),
                lightness: params.float(4, 0.5),
            },
            all: params.bool(5, false),
            hovered: None,
            originals: GlyphSlots::default(),
        }
    }

    fn is_lit(&self, global: usize) -> bool {
        match self.hovered {
            Some(_) if self.all => true,
            Some(over) => over == global,
            None => false,
        }
    }
}

impl Effect for HighlightEffect {
    fn name(&self) -> &'static str {
        "HIGHLIGHT"
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
        glyph: Glyph,
        local: usize,
        global: usize,
        _delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let original = self.originals.get_or_insert_with(local, || glyph.color());
        let color = if self.is_lit(global) {
            self.cycle.color(&self.core, local, original)
        } else {
            self.base_color.unwrap_or(original)
        };
        target.set_glyph(global, glyph.with_color(color));
    }

    fn tracks_input(&self) -> bool {
        true
    }
}

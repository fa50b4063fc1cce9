#![forbid(unsafe_code)]

//! `{STYLIST=bold;oblique;underline;strikethrough;subscript;midscript;superscript;all}`:
//! while the pointer is over a glyph (or anywhere in the range, with `all`),
//! the chosen styles are layered on; otherwise the glyph's own style bits
//! are put back.

use typist_core::{Glyph, GlyphFlags, Script};

use super::GlyphSlots;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct StylistEffect {
    core: EffectCore,
    flags: GlyphFlags,
    script: Option<Script>,
    all: bool,
    hovered: Option<usize>,
    originals: GlyphSlots<(GlyphFlags, Script)>,
}

impl StylistEffect {
    pub fn new(params: &Params<'_>) -> Self {
        let mut flags = GlyphFlags::empty();
        flags.set(GlyphFlags::BOLD, params.bool(0, false));
        flags.set(GlyphFlags::OBLIQUE, params.bool(1, false));
        flags.set(GlyphFlags::UNDERLINE, params.bool(2, true));
        flags.set(GlyphFlags::STRIKETHROUGH, params.bool(3, false));
        let script = if params.bool(4, false) {
            Some(Script::Sub)
        } else if params.bool(5, false) {
            Some(Script::Mid)
        } else if params.bool(6, false) {
            Some(Script::Super)
        } else {
            None
        };
        Self {
            core: EffectCore::default(),
            flags,
            script,
            all: params.bool(7, false),
            hovered: None,
            originals: GlyphSlots::default(),
        }
    }
}

impl Effect for StylistEffect {
    fn name(&self) -> &'static str {
        "STYLIST"
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
        let (flags, script) = self
            .originals
            .get_or_insert_with(local, || (glyph.flags(), glyph.script()));
        let lit = match self.hovered {
            Some(_) if self.all => true,
            Some(over) => over == global,
            None => false,
        };
        let styled = if lit {
            glyph
                .with_flags(flags | self.flags)
                .with_script(self.script.unwrap_or(script))
        } else {
            glyph.with_flags(flags).with_script(script)
        };
        target.set_glyph(global, styled);
    }

    fn tracks_input(&self) -> bool {
        true
    }
}

#![forbid(unsafe_code)]

//! `{LINK=url;hoverColor}`: a clickable span. Hovering anywhere on it
//! recolors the whole span (or underlines it when no hover color is given);
//! a click inside it asks the host to open `url`, once per click.

use typist_core::{Glyph, GlyphFlags, PackedRgba};

use super::GlyphSlots;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct LinkEffect {
    core: EffectCore,
    url: String,
    hover_color: Option<PackedRgba>,
    hovered: bool,
    originals: GlyphSlots<(PackedRgba, GlyphFlags)>,
}

impl LinkEffect {
    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            url: params.get(0).unwrap_or_default().to_string(),
            hover_color: params.color(1),
            hovered: false,
            originals: GlyphSlots::default(),
        }
    }

    /// Target of the link.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Effect for LinkEffect {
    fn name(&self) -> &'static str {
        "LINK"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn begin_frame(&mut self, target: &mut dyn EffectTarget) {
        let revealed = self.core.revealed_range(target.visible_count());
        self.hovered = target.over_index().is_some_and(|i| revealed.contains(&i));
        if target.take_touch_in(revealed).is_some() && !self.url.is_empty() {
            tracing::debug!(url = %self.url, "link clicked");
            target.open_url(&self.url);
        }
    }

    fn on_apply(
        &mut self,
        glyph: Glyph,
        local: usize,
        global: usize,
        _delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let (color, flags) = self
            .originals
            .get_or_insert_with(local, || (glyph.color(), glyph.flags()));
        let shown = match (self.hovered, self.hover_color) {
            (true, Some(hover)) => glyph.with_color(hover).with_flags(flags),
            (true, None) => glyph.with_color(color).with_flags(flags | GlyphFlags::UNDERLINE),
            (false, _) => glyph.with_color(color).with_flags(flags),
        };
        target.set_glyph(global, shown);
    }

    fn tracks_input(&self) -> bool {
        true
    }
}

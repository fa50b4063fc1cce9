#![forbid(unsafe_code)]

//! The glyph buffer and per-frame state that effects write into.

use std::ops::Range;

use typist_core::{Glyph, Xorshift64};
use typist_effects::EffectTarget;

use crate::accumulator::Accumulator2;
use crate::metrics::{FixedLineHeight, LineMetrics, line_indices};

/// Pointer sample handed to [`TypingLabel::update`](crate::TypingLabel::update).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    /// Glyph under the pointer.
    pub over: Option<usize>,
    /// Glyph clicked since the previous frame.
    pub touched: Option<usize>,
}

impl PointerState {
    /// Pointer resting over `index`.
    pub const fn hover(index: usize) -> Self {
        Self {
            over: Some(index),
            touched: None,
        }
    }

    /// Click on `index` (the pointer is over it too).
    pub const fn click(index: usize) -> Self {
        Self {
            over: Some(index),
            touched: Some(index),
        }
    }
}

/// Something the host should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingEvent {
    /// An `{EVENT=...}` token was reached.
    Event(String),
    /// A clickable effect fired.
    Trigger { name: String, payload: String },
    /// A link was clicked.
    OpenUrl(String),
    /// Every glyph has been revealed.
    End,
}

/// Glyphs, layout accumulators and the frame's input, seen by effects
/// through [`EffectTarget`].
#[derive(Debug)]
pub(crate) struct Stage {
    pub(crate) glyphs: Vec<Glyph>,
    line_of: Vec<usize>,
    pub(crate) metrics: Box<dyn LineMetrics>,
    pub(crate) offsets: Accumulator2,
    pub(crate) sizing: Accumulator2,
    pub(crate) rotations: Vec<f32>,
    pub(crate) pointer: PointerState,
    pub(crate) visible: usize,
    pub(crate) rng: Xorshift64,
    pub(crate) events: Vec<TypingEvent>,
}

impl Stage {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            glyphs: Vec::new(),
            line_of: Vec::new(),
            metrics: Box::new(FixedLineHeight::default()),
            offsets: Accumulator2::default(),
            sizing: Accumulator2::default(),
            rotations: Vec::new(),
            pointer: PointerState::default(),
            visible: 0,
            rng: Xorshift64::new(seed),
            events: Vec::new(),
        }
    }

    /// Replace the buffer and size every per-glyph array to match.
    pub(crate) fn load(&mut self, glyphs: Vec<Glyph>, text: &str, seed: u64) {
        self.line_of = line_indices(text);
        self.offsets.reset_to(glyphs.len());
        self.sizing.reset_to(glyphs.len());
        self.rotations.clear();
        self.rotations.resize(glyphs.len(), 0.0);
        self.glyphs = glyphs;
        self.pointer = PointerState::default();
        self.visible = 0;
        self.rng = Xorshift64::new(seed);
        self.events.clear();
    }

    pub(crate) fn begin_frame(&mut self, pointer: PointerState) {
        self.offsets.clear();
        self.sizing.clear();
        self.rotations.fill(0.0);
        self.pointer = pointer;
    }
}

impl EffectTarget for Stage {
    fn line_height(&self, global: usize) -> f32 {
        let line = self
            .line_of
            .get(global)
            .or_else(|| self.line_of.last())
            .copied()
            .unwrap_or(0);
        self.metrics.line_height(line)
    }

    fn glyph(&self, global: usize) -> Glyph {
        self.glyphs.get(global).copied().unwrap_or_default()
    }

    fn set_glyph(&mut self, global: usize, glyph: Glyph) {
        if let Some(slot) = self.glyphs.get_mut(global) {
            *slot = glyph;
        }
    }

    fn add_offset(&mut self, global: usize, x: f32, y: f32) {
        self.offsets.add(global, x, y);
    }

    fn add_size(&mut self, global: usize, x: f32, y: f32) {
        self.sizing.add(global, x, y);
    }

    fn add_rotation(&mut self, global: usize, degrees: f32) {
        if let Some(r) = self.rotations.get_mut(global) {
            *r += degrees;
        }
    }

    fn over_index(&self) -> Option<usize> {
        self.pointer.over
    }

    fn take_touch_in(&mut self, range: Range<usize>) -> Option<usize> {
        let hit = self.pointer.touched.filter(|i| range.contains(i))?;
        self.pointer.touched = None;
        Some(hit)
    }

    fn trigger_event(&mut self, name: &str, payload: &str) {
        tracing::debug!(name, payload, "trigger event");
        self.events.push(TypingEvent::Trigger {
            name: name.to_string(),
            payload: payload.to_string(),
        });
    }

    fn open_url(&mut self, url: &str) {
        self.events.push(TypingEvent::OpenUrl(url.to_string()));
    }

    fn random(&mut self) -> f32 {
        self.rng.next_f32()
    }

    fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn visible_count(&self) -> usize {
        self.visible.min(self.glyphs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::LineHeights;
    use typist_core::PackedRgba;

    fn stage(text: &str) -> Stage {
        let mut s = Stage::new(1);
        let glyphs = text.chars().map(|c| Glyph::new(c, PackedRgba::WHITE)).collect();
        s.load(glyphs, text, 1);
        s
    }

    #[test]
    fn line_height_follows_newlines() {
        let mut s = stage("ab\ncd");
        s.metrics = Box::new(LineHeights(vec![10.0, 20.0]));
        assert_eq!(s.line_height(0), 10.0);
        assert_eq!(s.line_height(2), 10.0);
        assert_eq!(s.line_height(3), 20.0);
        assert_eq!(s.line_height(99), 20.0);
    }

    #[test]
    fn touch_is_consumed_once() {
        let mut s = stage("abcdef");
        s.begin_frame(PointerState::click(3));
        assert_eq!(s.take_touch_in(0..2), None);
        assert_eq!(s.take_touch_in(2..5), Some(3));
        assert_eq!(s.take_touch_in(2..5), None);
        assert_eq!(s.over_index(), Some(3));
    }

    #[test]
    fn begin_frame_zeroes_accumulators() {
        let mut s = stage("ab");
        s.add_offset(1, 1.0, 2.0);
        s.add_size(0, 3.0, 3.0);
        s.add_rotation(1, 45.0);
        s.begin_frame(PointerState::default());
        assert_eq!(s.offsets.get(1), (0.0, 0.0));
        assert_eq!(s.sizing.get(0), (0.0, 0.0));
        assert_eq!(s.rotations, vec![0.0, 0.0]);
    }
}

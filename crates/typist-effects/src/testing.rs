#![forbid(unsafe_code)]

//! In-memory [`EffectTarget`] for exercising effects without a label.

use std::ops::Range;

use typist_core::{Glyph, PackedRgba, Xorshift64};

use crate::effect::{Effect, EffectTarget};

/// Host event recorded by [`RecordingTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    /// `trigger_event(name, payload)`.
    Event { name: String, payload: String },
    /// `open_url(url)`.
    Url(String),
}

/// A flat glyph buffer with accumulators and scripted pointer state.
#[derive(Debug, Clone)]
pub struct RecordingTarget {
    pub glyphs: Vec<Glyph>,
    pub line_height: f32,
    pub offsets: Vec<(f32, f32)>,
    pub sizes: Vec<(f32, f32)>,
    pub rotations: Vec<f32>,
    pub over: Option<usize>,
    pub touched: Option<usize>,
    /// Glyphs revealed so far; starts with every glyph shown.
    pub visible: usize,
    pub recorded: Vec<Recorded>,
    rng: Xorshift64,
}

impl RecordingTarget {
    /// One glyph per char of `text`, all in `color`, line height 1.
    pub fn new(text: &str, color: PackedRgba) -> Self {
        let glyphs: Vec<Glyph> = text.chars().map(|c| Glyph::new(c, color)).collect();
        let n = glyphs.len();
        Self {
            glyphs,
            line_height: 1.0,
            offsets: vec![(0.0, 0.0); n],
            sizes: vec![(0.0, 0.0); n],
            rotations: vec![0.0; n],
            over: None,
            touched: None,
            visible: n,
            recorded: Vec::new(),
            rng: Xorshift64::new(1),
        }
    }

    /// Use a different line height.
    #[must_use]
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Zero every accumulator.
    pub fn reset_accumulators(&mut self) {
        self.offsets.fill((0.0, 0.0));
        self.sizes.fill((0.0, 0.0));
        self.rotations.fill(0.0);
    }

    /// Run one frame of `effect` over every glyph in its range: reset the
    /// accumulators, update, begin the frame, then apply per glyph.
    pub fn step(&mut self, effect: &mut dyn Effect, delta: f32) {
        self.reset_accumulators();
        effect.update(delta);
        effect.begin_frame(&mut *self);
        let range = effect.core().revealed_range(self.visible_count());
        for global in range.clone() {
            let glyph = self.glyphs[global];
            effect.on_apply(glyph, global - range.start, global, delta, &mut *self);
        }
    }
}

impl EffectTarget for RecordingTarget {
    fn line_height(&self, _global: usize) -> f32 {
        self.line_height
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
        if let Some(o) = self.offsets.get_mut(global) {
            o.0 += x;
            o.1 += y;
        }
    }

    fn add_size(&mut self, global: usize, x: f32, y: f32) {
        if let Some(s) = self.sizes.get_mut(global) {
            s.0 += x;
            s.1 += y;
        }
    }

    fn add_rotation(&mut self, global: usize, degrees: f32) {
        if let Some(r) = self.rotations.get_mut(global) {
            *r += degrees;
        }
    }

    fn over_index(&self) -> Option<usize> {
        self.over
    }

    fn take_touch_in(&mut self, range: Range<usize>) -> Option<usize> {
        let hit = self.touched.filter(|i| range.contains(i))?;
        self.touched = None;
        Some(hit)
    }

    fn trigger_event(&mut self, name: &str, payload: &str) {
        self.recorded.push(Recorded::Event {
            name: name.to_string(),
            payload: payload.to_string(),
        });
    }

    fn open_url(&mut self, url: &str) {
        self.recorded.push(Recorded::Url(url.to_string()));
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

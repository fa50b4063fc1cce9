#![forbid(unsafe_code)]

//! The typing label: typewriter progression plus the per-frame effect loop.
//!
//! # Frame order
//!
//! [`TypingLabel::update`] first zeroes the offset, sizing and rotation
//! accumulators. It then advances the typewriter, handling every token that
//! sits at the cursor before the glyph under the cursor is revealed. Last,
//! each active effect (in activation order) is updated, finished and dropped
//! if its duration has run out, and otherwise applied to the revealed glyphs
//! of its range.
//!
//! # Invariants
//!
//! 1. `visible_count() <= glyphs().len()` and it never decreases between
//!    `set_text` calls.
//! 2. [`TypingEvent::End`] is queued exactly once per text.
//! 3. A click is consumed by at most one effect per frame.

use std::fmt;

use rustc_hash::FxHashMap;
use typist_core::{Glyph, TypingConfig};
use typist_effects::{Effect, EffectRegistry};
use typist_markup::{MarkupParser, TokenCategory, TokenEntry, TokenList, VariableResolver};

use crate::error::LabelError;
use crate::metrics::{FixedLineHeight, LineMetrics};
use crate::stage::{PointerState, Stage, TypingEvent};
use crate::translate::markup_to_glyphs;

/// What one call to [`TypingLabel::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// An effect consumed the click passed in with the frame.
    pub touch_consumed: bool,
    /// Glyphs revealed during this frame.
    pub revealed: usize,
}

#[derive(Debug)]
struct ActiveEffect {
    name: String,
    effect: Box<dyn Effect>,
    open: bool,
}

/// A label that types its text out over time and animates it with effects.
pub struct TypingLabel {
    config: TypingConfig,
    registry: EffectRegistry,
    variables: FxHashMap<String, String>,
    resolver: Option<Box<dyn VariableResolver>>,
    source: String,
    text: String,
    tokens: TokenList,
    active: Vec<ActiveEffect>,
    stage: Stage,

    cursor: usize,
    delay: f32,
    cooldown: f32,
    skip_remaining: f32,
    end_emitted: bool,
}

impl fmt::Debug for TypingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypingLabel")
            .field("source", &self.source)
            .field("text", &self.text)
            .field("tokens", &self.tokens.len())
            .field("active", &self.active)
            .field("cursor", &self.cursor)
            .field("delay", &self.delay)
            .field("cooldown", &self.cooldown)
            .field("resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for TypingLabel {
    fn default() -> Self {
        Self::new(TypingConfig::default())
    }
}

impl TypingLabel {
    /// An empty label using the built-in effect set.
    pub fn new(config: TypingConfig) -> Self {
        let stage = Stage::new(config.seed);
        let delay = config.default_speed_per_char;
        Self {
            config,
            registry: EffectRegistry::with_defaults(),
            variables: FxHashMap::default(),
            resolver: None,
            source: String::new(),
            text: String::new(),
            tokens: TokenList::new(),
            active: Vec::new(),
            stage,
            cursor: 0,
            delay,
            cooldown: 0.0,
            skip_remaining: 0.0,
            end_emitted: false,
        }
    }

    /// Replace the effect registry.
    #[must_use]
    pub fn with_registry(mut self, registry: EffectRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use `metrics` for effect line heights.
    #[must_use]
    pub fn with_line_metrics(mut self, metrics: impl LineMetrics + 'static) -> Self {
        self.stage.metrics = Box::new(metrics);
        self
    }

    /// Give every line the same height.
    #[must_use]
    pub fn with_line_height(self, height: f32) -> Self {
        self.with_line_metrics(FixedLineHeight(height))
    }

    /// Consult `resolver` before any variable table.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl VariableResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Set a label variable.
    #[must_use]
    pub fn with_variable(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_variable(name, value);
        self
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// Parse `markup`, rebuild the glyph buffer and start typing from the
    /// beginning. Every running effect is discarded.
    pub fn set_text(&mut self, markup: &str) -> Result<(), LabelError> {
        let parsed = {
            let mut parser = MarkupParser::new(&self.config, &self.registry)
                .with_variables(&self.variables);
            if let Some(resolver) = self.resolver.as_deref() {
                parser = parser.with_resolver(resolver);
            }
            parser.parse(markup)?
        };
        let glyphs = markup_to_glyphs(&parsed.markup, &parsed.text, &self.config);
        tracing::debug!(
            chars = glyphs.len(),
            tokens = parsed.tokens.len(),
            "set label text"
        );

        self.stage.load(glyphs, &parsed.text, self.config.seed);
        self.source = markup.to_string();
        self.text = parsed.text;
        self.tokens = parsed.tokens;
        self.active.clear();
        self.cursor = 0;
        self.delay = self.config.default_speed_per_char;
        self.cooldown = 0.0;
        self.skip_remaining = 0.0;
        self.end_emitted = false;
        Ok(())
    }

    /// Parse the current markup again, picking up variable changes.
    pub fn restart(&mut self) -> Result<(), LabelError> {
        let source = self.source.clone();
        self.set_text(&source)
    }

    /// Set a label variable (names are case-insensitive). Takes effect the
    /// next time the text is parsed.
    pub fn set_variable(&mut self, name: &str, value: impl Into<String>) {
        self.variables
            .insert(name.trim().to_uppercase(), value.into());
    }

    /// Replace the variable resolver. Takes effect the next time the text is
    /// parsed.
    pub fn set_resolver(&mut self, resolver: impl VariableResolver + 'static) {
        self.resolver = Some(Box::new(resolver));
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Advance the label by `delta` seconds with the given pointer sample.
    pub fn update(&mut self, delta: f32, pointer: PointerState) -> FrameReport {
        let span = tracing::trace_span!("label_update", delta);
        let _guard = span.enter();

        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.stage.begin_frame(pointer);
        let revealed = self.advance(delta);
        self.run_effects(delta);

        FrameReport {
            touch_consumed: pointer.touched.is_some() && self.stage.pointer.touched.is_none(),
            revealed,
        }
    }

    /// Reveal every remaining glyph now. Tokens along the way still run,
    /// waits are ignored.
    pub fn skip_to_end(&mut self) {
        self.skip_remaining = f32::INFINITY;
        self.advance(0.0);
    }

    fn advance(&mut self, delta: f32) -> usize {
        if self.end_emitted {
            return 0;
        }
        self.cooldown -= delta;
        let len = self.stage.glyphs.len();
        let mut revealed = 0;
        loop {
            while let Some(entry) = self.tokens.pop_at_or_before(self.cursor) {
                self.process_token(entry);
            }
            if self.cursor >= len {
                self.skip_remaining = 0.0;
                self.end_emitted = true;
                self.stage.events.push(TypingEvent::End);
                break;
            }
            let skipping = self.skip_remaining > 0.0;
            if !skipping && self.cooldown > 0.0 {
                break;
            }
            self.cursor += 1;
            revealed += 1;
            if skipping {
                self.skip_remaining -= 1.0;
            } else {
                self.cooldown += self.delay;
            }
        }
        revealed
    }

    fn process_token(&mut self, entry: TokenEntry) {
        match entry.category {
            TokenCategory::Wait => {
                if self.skip_remaining <= 0.0 {
                    self.cooldown = self.cooldown.max(0.0) + entry.float_value;
                }
            }
            TokenCategory::Speed => self.delay = entry.float_value,
            TokenCategory::Event => {
                let payload = entry.string_value.unwrap_or_default();
                self.stage.events.push(TypingEvent::Event(payload));
            }
            TokenCategory::Skip => {
                if entry.string_value.is_none() {
                    self.skip_remaining = entry.float_value;
                }
            }
            TokenCategory::EffectStart => {
                self.close_effects(&entry.name, entry.position);
                if let Some(mut effect) = entry.effect {
                    let core = effect.core_mut();
                    core.index_start = entry.position;
                    core.index_end = self.stage.glyphs.len();
                    tracing::debug!(effect = %entry.name, start = entry.position, "activate effect");
                    self.active.push(ActiveEffect {
                        name: entry.name,
                        effect,
                        open: true,
                    });
                }
            }
            TokenCategory::EffectEnd => self.close_effects(&entry.name, entry.position),
        }
    }

    /// End the range of every open effect called `name` at `position`.
    fn close_effects(&mut self, name: &str, position: usize) {
        for active in self.active.iter_mut().filter(|a| a.open && a.name == name) {
            active.open = false;
            active.effect.core_mut().index_end = position;
            tracing::debug!(effect = name, end = position, "close effect");
        }
    }

    fn run_effects(&mut self, delta: f32) {
        let visible = self.cursor;
        let stage = &mut self.stage;
        stage.visible = visible;
        self.active.retain_mut(|active| {
            active.effect.update(delta);
            if active.effect.is_finished() {
                active.effect.on_finish(&mut *stage);
                tracing::debug!(effect = %active.name, "effect finished");
                return false;
            }
            active.effect.begin_frame(&mut *stage);
            let range = active.effect.core().range();
            for global in active.effect.core().revealed_range(visible) {
                let glyph = stage.glyphs[global];
                active
                    .effect
                    .on_apply(glyph, global - range.start, global, delta, &mut *stage);
            }
            true
        });
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Every glyph has been revealed and every token handled.
    pub fn is_finished(&self) -> bool {
        self.end_emitted
    }

    /// Number of revealed glyphs, counted from the start.
    pub fn visible_count(&self) -> usize {
        self.cursor
    }

    /// The markup last passed to [`set_text`](Self::set_text).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The visible text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The whole glyph buffer, revealed or not.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.stage.glyphs
    }

    /// The revealed glyphs.
    pub fn visible_glyphs(&self) -> &[Glyph] {
        &self.stage.glyphs[..self.cursor.min(self.stage.glyphs.len())]
    }

    /// Positional offset of every glyph for the current frame.
    pub fn offsets(&self) -> &[(f32, f32)] {
        self.stage.offsets.as_slice()
    }

    /// Size delta of every glyph for the current frame.
    pub fn sizing(&self) -> &[(f32, f32)] {
        self.stage.sizing.as_slice()
    }

    /// Rotation of every glyph for the current frame, in degrees.
    pub fn rotations(&self) -> &[f32] {
        &self.stage.rotations
    }

    /// Whether any running effect wants pointer samples.
    pub fn tracks_input(&self) -> bool {
        self.active.iter().any(|a| a.effect.tracks_input())
    }

    /// Names of the running effects, in activation order.
    pub fn active_effects(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(|a| a.name.as_str())
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<TypingEvent> {
        std::mem::take(&mut self.stage.events)
    }

    pub fn config(&self) -> &TypingConfig {
        &self.config
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Register or remove effects. Takes effect the next time the text is
    /// parsed.
    pub fn registry_mut(&mut self) -> &mut EffectRegistry {
        &mut self.registry
    }
}

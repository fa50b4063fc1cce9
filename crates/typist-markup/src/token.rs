#![forbid(unsafe_code)]

//! Parsed tokens and their processing order.
//!
//! A [`TokenList`] is kept sorted by descending position so the driver can
//! pop the next token off the back as the typewriter cursor advances.
//! Entries that share a position are ordered by [`TokenCategory::priority`]:
//! the lowest priority is popped first, so an effect that ends at an index
//! is closed before one that starts there.

use std::cmp::Ordering;
use std::fmt;

use typist_effects::Effect;

/// What a token does when the cursor reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    /// Pause the typewriter for `float_value` seconds.
    Wait,
    /// Set the per-character delay to `float_value` seconds.
    Speed,
    /// Hand `string_value` to the host.
    Event,
    /// A bracket tag (`string_value`), or a `{SKIP}` directive when the name
    /// is `SKIP` and `string_value` is `None`.
    Skip,
    /// Open an effect; `effect` holds the instance.
    EffectStart,
    /// Close the most recent open effects named `name`.
    EffectEnd,
}

impl TokenCategory {
    /// Tie-break priority at equal position. Lower runs first.
    pub const fn priority(self) -> u8 {
        match self {
            Self::EffectEnd => 0,
            Self::Skip => 1,
            Self::EffectStart => 2,
            Self::Speed => 3,
            Self::Event => 4,
            Self::Wait => 5,
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Wait => "WAIT",
            Self::Speed => "SPEED",
            Self::Event => "EVENT",
            Self::Skip => "SKIP",
            Self::EffectStart => "EFFECT_START",
            Self::EffectEnd => "EFFECT_END",
        };
        f.write_str(s)
    }
}

/// One parsed token.
#[derive(Debug)]
pub struct TokenEntry {
    /// Canonical token name (uppercase effect name for effect tokens).
    pub name: String,
    pub category: TokenCategory,
    /// Char index into the clean text where the token takes effect.
    pub position: usize,
    pub float_value: f32,
    pub string_value: Option<String>,
    pub effect: Option<Box<dyn Effect>>,
}

impl TokenEntry {
    /// A token with no payload.
    pub fn new(name: impl Into<String>, category: TokenCategory, position: usize) -> Self {
        Self {
            name: name.into(),
            category,
            position,
            float_value: 0.0,
            string_value: None,
            effect: None,
        }
    }

    #[must_use]
    pub fn with_float(mut self, value: f32) -> Self {
        self.float_value = value;
        self
    }

    #[must_use]
    pub fn with_string(mut self, value: impl Into<String>) -> Self {
        self.string_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Box<dyn Effect>) -> Self {
        self.effect = Some(effect);
        self
    }

    /// List order: descending position, then descending priority, then
    /// descending name, string and float value. Effects are not compared.
    pub fn list_order(&self, other: &Self) -> Ordering {
        other
            .position
            .cmp(&self.position)
            .then_with(|| other.category.priority().cmp(&self.category.priority()))
            .then_with(|| other.name.cmp(&self.name))
            .then_with(|| other.string_value.cmp(&self.string_value))
            .then_with(|| other.float_value.total_cmp(&self.float_value))
    }
}

/// Tokens in processing order, next token last.
#[derive(Debug, Default)]
pub struct TokenList {
    entries: Vec<TokenEntry>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sorted list from unordered entries.
    pub fn from_entries(entries: Vec<TokenEntry>) -> Self {
        let mut list = Self { entries };
        list.sort();
        list
    }

    /// Add an entry. Call [`sort`](Self::sort) before consuming.
    pub fn push(&mut self, entry: TokenEntry) {
        self.entries.push(entry);
    }

    /// Restore list order. Stable, so entries equal under
    /// [`TokenEntry::list_order`] keep their insertion order.
    pub fn sort(&mut self) {
        self.entries.sort_by(TokenEntry::list_order);
    }

    /// Next token to process, if any.
    pub fn peek_next(&self) -> Option<&TokenEntry> {
        self.entries.last()
    }

    /// Remove and return the next token.
    pub fn pop_next(&mut self) -> Option<TokenEntry> {
        self.entries.pop()
    }

    /// Remove and return the next token if it sits at or before `position`.
    pub fn pop_at_or_before(&mut self, position: usize) -> Option<TokenEntry> {
        if self.peek_next()?.position <= position {
            self.entries.pop()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in list order (next token last).
    pub fn iter(&self) -> std::slice::Iter<'_, TokenEntry> {
        self.entries.iter()
    }

    /// Entries in the order they will be processed.
    pub fn in_processing_order(&self) -> impl Iterator<Item = &TokenEntry> {
        self.entries.iter().rev()
    }

    pub fn as_slice(&self) -> &[TokenEntry] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<TokenEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a TokenEntry;
    type IntoIter = std::slice::Iter<'a, TokenEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

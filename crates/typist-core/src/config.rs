#![forbid(unsafe_code)]

//! Typing configuration shared by the parser and the label driver.
//!
//! There is no process-wide mutable state: every parser and label owns a
//! [`TypingConfig`], and `TypingConfig::default()` is the single source of
//! default timing, colors and variables.

use rustc_hash::FxHashMap;

use crate::color::{PackedRgba, normalize_color_name};

/// Placeholder character used in clean text for `[+region]` inline images.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Timing, color, variable and font settings for typed text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypingConfig {
    /// Seconds between revealed characters at NORMAL speed.
    /// Default: 0.035
    pub default_speed_per_char: f32,

    /// Smallest factor accepted by `{SPEED=factor}`.
    /// Default: 0.001
    pub min_speed_modifier: f32,

    /// Largest factor accepted by `{SPEED=factor}`.
    /// Default: 100.0
    pub max_speed_modifier: f32,

    /// Seconds paused by `{WAIT}` without a parameter.
    /// Default: 0.25
    pub default_wait: f32,

    /// Color of glyphs before any color markup.
    /// Default: white
    pub default_color: PackedRgba,

    /// Color emitted by `{CLEARCOLOR}` and `{ENDCOLOR}`.
    /// Default: white
    pub clear_color: PackedRgba,

    /// Markup prepended to every text before parsing and re-emitted by the
    /// reset tokens.
    /// Default: empty
    pub default_token: String,

    /// Variables visible to every label. Keys are stored uppercase.
    pub global_variables: FxHashMap<String, String>,

    /// Extra named colors, consulted before the built-in table. Keys are
    /// stored in normalized form.
    pub colors: FxHashMap<String, PackedRgba>,

    /// Font family names; the position is the 4-bit family index, and index
    /// 0 is the default family.
    pub font_families: Vec<String>,

    /// Inline image regions mapped to the glyph character that draws them.
    pub inline_images: FxHashMap<String, char>,

    /// Seed for the label's random source.
    /// Default: 0x9E37_79B9_7F4A_7C15
    pub seed: u64,

    /// Upper bound on text replacements in one parse; stops runaway
    /// self-referential variables.
    /// Default: 4096
    pub max_replacements: usize,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            default_speed_per_char: 0.035,
            min_speed_modifier: 0.001,
            max_speed_modifier: 100.0,
            default_wait: 0.25,
            default_color: PackedRgba::WHITE,
            clear_color: PackedRgba::WHITE,
            default_token: String::new(),
            global_variables: FxHashMap::default(),
            colors: FxHashMap::default(),
            font_families: Vec::new(),
            inline_images: FxHashMap::default(),
            seed: 0x9E37_79B9_7F4A_7C15,
            max_replacements: 4096,
        }
    }
}

impl TypingConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the NORMAL per-character delay in seconds.
    #[must_use]
    pub fn with_default_speed_per_char(mut self, seconds: f32) -> Self {
        self.default_speed_per_char = seconds.max(0.0);
        self
    }

    /// Set the clamp range for `{SPEED=factor}`.
    #[must_use]
    pub fn with_speed_modifier_range(mut self, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_speed_modifier = min;
        self.max_speed_modifier = max;
        self
    }

    /// Set the pause used by `{WAIT}` without a parameter.
    #[must_use]
    pub fn with_default_wait(mut self, seconds: f32) -> Self {
        self.default_wait = seconds.max(0.0);
        self
    }

    /// Set the initial glyph color.
    #[must_use]
    pub fn with_default_color(mut self, color: PackedRgba) -> Self {
        self.default_color = color;
        self
    }

    /// Set the color emitted by `{CLEARCOLOR}`.
    #[must_use]
    pub fn with_clear_color(mut self, color: PackedRgba) -> Self {
        self.clear_color = color;
        self
    }

    /// Set the markup prepended to every text.
    #[must_use]
    pub fn with_default_token(mut self, token: impl Into<String>) -> Self {
        self.default_token = token.into();
        self
    }

    /// Add a global variable.
    #[must_use]
    pub fn with_global_variable(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_global_variable(name, value);
        self
    }

    /// Add a named color.
    #[must_use]
    pub fn with_color(mut self, name: &str, color: PackedRgba) -> Self {
        self.colors.insert(normalize_color_name(name), color);
        self
    }

    /// Append a font family; its index is its position in the list.
    #[must_use]
    pub fn with_font_family(mut self, name: impl Into<String>) -> Self {
        self.font_families.push(name.into());
        self
    }

    /// Map an inline image region to the character that draws it.
    #[must_use]
    pub fn with_inline_image(mut self, region: impl Into<String>, ch: char) -> Self {
        self.inline_images.insert(region.into(), ch);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the replacement guard.
    #[must_use]
    pub fn with_max_replacements(mut self, max: usize) -> Self {
        self.max_replacements = max;
        self
    }

    /// Insert or replace a global variable (case-insensitive name).
    pub fn set_global_variable(&mut self, name: &str, value: impl Into<String>) {
        self.global_variables
            .insert(name.to_uppercase(), value.into());
    }

    /// Look up a global variable (case-insensitive name).
    pub fn global_variable(&self, name: &str) -> Option<&str> {
        self.global_variables
            .get(&name.to_uppercase())
            .map(String::as_str)
    }

    /// Resolve a color name: configured colors first, then the built-in
    /// table.
    pub fn color(&self, name: &str) -> Option<PackedRgba> {
        self.colors
            .get(&normalize_color_name(name))
            .copied()
            .or_else(|| PackedRgba::named(name))
    }

    /// Resolve a color from a name or from 6/8 hex digits.
    pub fn parse_color(&self, text: &str) -> Option<PackedRgba> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.color(text).or_else(|| PackedRgba::from_hex(text))
    }

    /// Index of a font family by case-insensitive name.
    pub fn font_family_index(&self, name: &str) -> Option<u8> {
        self.font_families
            .iter()
            .position(|f| f.eq_ignore_ascii_case(name))
            .and_then(|i| u8::try_from(i).ok())
            .filter(|&i| i < 16)
    }

    /// Character drawn for an inline image region.
    pub fn inline_image(&self, region: &str) -> char {
        self.inline_images
            .get(region)
            .copied()
            .unwrap_or(OBJECT_REPLACEMENT)
    }

    /// Clamp a SPEED factor into the configured range.
    pub fn clamp_speed_modifier(&self, factor: f32) -> f32 {
        factor.clamp(self.min_speed_modifier, self.max_speed_modifier)
    }
}

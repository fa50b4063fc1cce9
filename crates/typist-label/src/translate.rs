#![forbid(unsafe_code)]

//! Markup text to packed glyphs.
//!
//! Walks the bracket markup left by the parser, keeping a running style,
//! and emits exactly one glyph per char of the clean text.

use typist_core::{Glyph, GlyphFlags, PackedRgba, Script, TypingConfig};
use typist_markup::{BracketTag, MarkupScanner, Piece};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CaseMode {
    #[default]
    AsWritten,
    Upper,
    Lower,
    Capitalize,
}

#[derive(Debug, Clone, Copy)]
struct StyleState {
    color: PackedRgba,
    flags: GlyphFlags,
    script: Script,
    scale: u32,
    family: u8,
    case: CaseMode,
}

impl StyleState {
    fn new(color: PackedRgba) -> Self {
        Self {
            color,
            flags: GlyphFlags::empty(),
            script: Script::Normal,
            scale: 100,
            family: 0,
            case: CaseMode::AsWritten,
        }
    }

    fn toggle_script(&mut self, script: Script) {
        self.script = if self.script == script {
            Script::Normal
        } else {
            script
        };
    }

    fn toggle_case(&mut self, case: CaseMode) {
        self.case = if self.case == case {
            CaseMode::AsWritten
        } else {
            case
        };
    }

    fn glyph(&self, ch: char) -> Glyph {
        Glyph::new(ch, self.color)
            .with_flags(self.flags)
            .with_script(self.script)
            .with_scale_percent(self.scale)
            .with_family(self.family)
    }
}

/// Flags for every char of `text` that begins a word.
fn word_starts(text: &str) -> Vec<bool> {
    let mut starts = vec![false; text.chars().count()];
    let mut char_index = 0;
    let mut last_byte = 0;
    for (byte, word) in text.split_word_bound_indices() {
        char_index += text[last_byte..byte].chars().count();
        last_byte = byte;
        if word.chars().next().is_some_and(char::is_alphanumeric) {
            if let Some(slot) = starts.get_mut(char_index) {
                *slot = true;
            }
        }
    }
    starts
}

fn single_char(mut mapped: impl Iterator<Item = char>, original: char) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => c,
        _ => original,
    }
}

/// Single-char case mapping; mappings that expand to several chars keep
/// the original so glyphs stay aligned with the clean text.
fn map_case(ch: char, upper: bool) -> char {
    if upper {
        single_char(ch.to_uppercase(), ch)
    } else {
        single_char(ch.to_lowercase(), ch)
    }
}

/// Translate parser output into glyphs: one per char of `clean`.
pub fn markup_to_glyphs(markup: &str, clean: &str, config: &TypingConfig) -> Vec<Glyph> {
    let starts = word_starts(clean);
    let mut glyphs = Vec::with_capacity(starts.len());
    let mut style = StyleState::new(config.default_color);

    for (_, piece) in MarkupScanner::new(markup) {
        match piece {
            Piece::Char(ch) => {
                let index = glyphs.len();
                let ch = match style.case {
                    CaseMode::AsWritten => ch,
                    CaseMode::Upper => map_case(ch, true),
                    CaseMode::Lower => map_case(ch, false),
                    CaseMode::Capitalize => {
                        map_case(ch, starts.get(index).copied().unwrap_or(false))
                    }
                };
                glyphs.push(style.glyph(ch));
            }
            Piece::Tag { content, .. } => match BracketTag::parse(content) {
                BracketTag::Reset => style = StyleState::new(config.default_color),
                BracketTag::Bold => style.flags.toggle(GlyphFlags::BOLD),
                BracketTag::Oblique => style.flags.toggle(GlyphFlags::OBLIQUE),
                BracketTag::Underline => style.flags.toggle(GlyphFlags::UNDERLINE),
                BracketTag::Strikethrough => style.flags.toggle(GlyphFlags::STRIKETHROUGH),
                BracketTag::Superscript => style.toggle_script(Script::Super),
                BracketTag::Midscript => style.toggle_script(Script::Mid),
                BracketTag::Subscript => style.toggle_script(Script::Sub),
                BracketTag::Upper => style.toggle_case(CaseMode::Upper),
                BracketTag::Lower => style.toggle_case(CaseMode::Lower),
                BracketTag::Capitalize => style.toggle_case(CaseMode::Capitalize),
                BracketTag::Scale(percent) => style.scale = percent.unwrap_or(100),
                BracketTag::Family(None) => style.family = 0,
                BracketTag::Family(Some(name)) => {
                    if let Some(index) = config.font_family_index(name) {
                        style.family = index;
                    }
                }
                BracketTag::Color(color) => style.color = color,
                BracketTag::Named(name) => {
                    if let Some(color) = config.color(name) {
                        style.color = color;
                    }
                }
                BracketTag::Image(region) => {
                    glyphs.push(style.glyph(config.inline_image(region)));
                }
                BracketTag::Unknown(_) => {}
            },
        }
    }
    glyphs
}

#![forbid(unsafe_code)]

//! Bracket tag vocabulary, and the helpers that turn replacement-token
//! parameters into bracket tags.
//!
//! | tag | meaning |
//! |-----|---------|
//! | `[*]` `[/]` `[_]` `[~]` | toggle bold, oblique, underline, strikethrough |
//! | `[^]` `[=]` `[.]` | toggle superscript, midscript, subscript |
//! | `[!]` `[,]` `[;]` | toggle upper, lower, capitalized case |
//! | `[%DDD]` `[%]` | scale percent, reset scale |
//! | `[@Name]` `[@]` | font family, reset family |
//! | `[#RRGGBB]` `[#RRGGBBAA]` | hex color |
//! | `[name]` `[\|name]` | named color |
//! | `[+region]` | inline image |
//! | `[]` `[ ]` | reset everything |

use typist_core::{Glyph, PackedRgba};

/// A classified bracket tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketTag<'a> {
    Reset,
    Bold,
    Oblique,
    Underline,
    Strikethrough,
    Superscript,
    Midscript,
    Subscript,
    Upper,
    Lower,
    Capitalize,
    /// `Some(percent)` in `0..=375`, or `None` to reset.
    Scale(Option<u32>),
    /// `Some(name)`, or `None` to reset.
    Family(Option<&'a str>),
    Color(PackedRgba),
    Named(&'a str),
    Image(&'a str),
    Unknown(&'a str),
}

impl<'a> BracketTag<'a> {
    /// Classify the content of a bracket group (without the brackets).
    pub fn parse(content: &'a str) -> Self {
        if content.trim().is_empty() {
            return Self::Reset;
        }
        match content {
            "*" => return Self::Bold,
            "/" => return Self::Oblique,
            "_" => return Self::Underline,
            "~" => return Self::Strikethrough,
            "^" => return Self::Superscript,
            "=" => return Self::Midscript,
            "." => return Self::Subscript,
            "!" => return Self::Upper,
            "," => return Self::Lower,
            ";" => return Self::Capitalize,
            _ => {}
        }
        if let Some(rest) = content.strip_prefix('%') {
            if rest.is_empty() {
                return Self::Scale(None);
            }
            return match rest.parse::<u32>() {
                Ok(p) => Self::Scale(Some(p.min(Glyph::MAX_SCALE_PERCENT))),
                Err(_) => Self::Unknown(content),
            };
        }
        if let Some(rest) = content.strip_prefix('@') {
            let name = rest.trim();
            return Self::Family((!name.is_empty()).then_some(name));
        }
        if let Some(rest) = content.strip_prefix('#') {
            return match parse_hex(rest) {
                Some(color) => Self::Color(color),
                None => Self::Unknown(content),
            };
        }
        if let Some(rest) = content.strip_prefix('+') {
            return Self::Image(rest.trim());
        }
        if let Some(rest) = content.strip_prefix('|') {
            return Self::Named(rest);
        }
        Self::Named(content)
    }
}

fn is_hex_color(text: &str) -> bool {
    matches!(text.len(), 6 | 8) && text.chars().all(|c| c.is_ascii_hexdigit())
}

fn parse_hex(text: &str) -> Option<PackedRgba> {
    if is_hex_color(text) {
        PackedRgba::from_hex(text)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Replacement helpers
// ---------------------------------------------------------------------------

/// Bracket tag for a `{COLOR=...}` parameter.
///
/// Six or eight hex digits, with or without `#`, become `[#HEX]`; anything
/// else is taken as a color name. Names that start with a character which
/// would read as a short code are written as `[|name]`.
pub fn color_markup(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let hex = value.strip_prefix('#').unwrap_or(value);
    if is_hex_color(hex) {
        return format!("[#{hex}]");
    }
    let needs_bar = value
        .chars()
        .next()
        .is_some_and(|c| "*/_~^=.!,;%@#+|".contains(c));
    if needs_bar {
        format!("[|{value}]")
    } else {
        format!("[{value}]")
    }
}

/// Bracket tag for a `{STYLE=...}` keyword, or `None` for unknown keywords.
pub fn style_markup(keyword: &str) -> Option<&'static str> {
    let keyword = keyword.trim().to_ascii_uppercase();
    let tag = match keyword.as_str() {
        "*" | "B" | "BOLD" | "STRONG" => "[*]",
        "/" | "I" | "OBLIQUE" | "ITALIC" | "EM" => "[/]",
        "_" | "U" | "UNDER" | "UNDERLINE" => "[_]",
        "~" | "STRIKE" | "STRIKETHROUGH" => "[~]",
        "^" | "SUPER" | "SUPERSCRIPT" => "[^]",
        "=" | "MID" | "MIDSCRIPT" => "[=]",
        "." | "SUB" | "SUBSCRIPT" => "[.]",
        "!" | "UP" | "UPPER" => "[!]",
        "," | "LOW" | "LOWER" => "[,]",
        ";" | "EACH" | "TITLE" => "[;]",
        "RESET" | "NONE" => "[]",
        _ => return None,
    };
    Some(tag)
}

/// Bracket tag for a `{SIZE=...}` / `{SCALE=...}` parameter: `[%p]` with
/// `p` rounded and clamped to `0..=375`, or `[%]` when malformed.
pub fn size_markup(value: &str) -> String {
    let value = value.trim();
    let value = value.strip_suffix('%').unwrap_or(value).trim();
    match value.parse::<f32>() {
        Ok(p) if p.is_finite() => {
            let p = p.round().clamp(0.0, Glyph::MAX_SCALE_PERCENT as f32) as u32;
            format!("[%{p}]")
        }
        _ => "[%]".to_string(),
    }
}

/// Bracket tag for a `{FONT=...}` parameter.
pub fn font_markup(value: &str) -> String {
    format!("[@{}]", value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_short_codes() {
        assert_eq!(BracketTag::parse("*"), BracketTag::Bold);
        assert_eq!(BracketTag::parse(";"), BracketTag::Capitalize);
        assert_eq!(BracketTag::parse(""), BracketTag::Reset);
        assert_eq!(BracketTag::parse(" "), BracketTag::Reset);
        assert_eq!(BracketTag::parse("%"), BracketTag::Scale(None));
        assert_eq!(BracketTag::parse("%150"), BracketTag::Scale(Some(150)));
        assert_eq!(BracketTag::parse("%999"), BracketTag::Scale(Some(375)));
        assert_eq!(BracketTag::parse("%x"), BracketTag::Unknown("%x"));
        assert_eq!(BracketTag::parse("@Serif"), BracketTag::Family(Some("Serif")));
        assert_eq!(BracketTag::parse("@"), BracketTag::Family(None));
        assert_eq!(BracketTag::parse("+smile"), BracketTag::Image("smile"));
        assert_eq!(BracketTag::parse("|.dot"), BracketTag::Named(".dot"));
        assert_eq!(BracketTag::parse("RED"), BracketTag::Named("RED"));
        assert_eq!(
            BracketTag::parse("#FF000080"),
            BracketTag::Color(PackedRgba::rgba(255, 0, 0, 128))
        );
        assert_eq!(BracketTag::parse("#F00"), BracketTag::Unknown("#F00"));
    }

    #[test]
    fn color_markup_round_trip() {
        assert_eq!(color_markup("FF00aa"), "[#FF00aa]");
        assert_eq!(color_markup("#12345678"), "[#12345678]");
        assert_eq!(color_markup("red"), "[red]");
        assert_eq!(color_markup("light gray"), "[light gray]");
        assert_eq!(color_markup("*star"), "[|*star]");
        assert_eq!(color_markup("12345"), "[12345]");
        assert_eq!(color_markup(""), "");
    }

    #[test]
    fn style_keywords() {
        assert_eq!(style_markup("bold"), Some("[*]"));
        assert_eq!(style_markup("Em"), Some("[/]"));
        assert_eq!(style_markup("title"), Some("[;]"));
        assert_eq!(style_markup("none"), Some("[]"));
        assert_eq!(style_markup("sparkly"), None);
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(size_markup("0"), "[%0]");
        assert_eq!(size_markup("375"), "[%375]");
        assert_eq!(size_markup("9000"), "[%375]");
        assert_eq!(size_markup("-5"), "[%0]");
        assert_eq!(size_markup("150%"), "[%150]");
        assert_eq!(size_markup("big"), "[%]");
    }
}

//! End-to-end parsing scenarios.

use rustc_hash::FxHashMap;
use typist_core::TypingConfig;
use typist_effects::EffectRegistry;
use typist_markup::{MarkupParser, TokenCategory, color_markup, parse_tokens};

fn parse(text: &str) -> typist_markup::ParsedText {
    let config = TypingConfig::default();
    let registry = EffectRegistry::with_defaults();
    parse_tokens(text, &config, &registry).unwrap()
}

#[test]
fn unclosed_wave_covers_the_rest() {
    let parsed = parse("{WAVE=1;1;1;_}Hi");
    assert_eq!(parsed.text, "Hi");
    assert_eq!(parsed.tokens.len(), 1);
    let start = parsed.tokens.peek_next().unwrap();
    assert_eq!(start.category, TokenCategory::EffectStart);
    assert_eq!(start.name, "WAVE");
    assert_eq!(start.position, 0);
    let effect = start.effect.as_ref().unwrap();
    assert!(effect.core().duration.is_infinite());
    assert!(
        !parsed
            .tokens
            .iter()
            .any(|t| t.category == TokenCategory::EffectEnd)
    );
}

#[test]
fn bold_tags_become_skip_tokens() {
    let parsed = parse("[*]Bold[*]");
    assert_eq!(parsed.text, "Bold");
    assert_eq!(parsed.markup, "[*]Bold[*]");
    let skips: Vec<_> = parsed
        .tokens
        .in_processing_order()
        .map(|t| (t.category, t.position, t.string_value.as_deref()))
        .collect();
    assert_eq!(
        skips,
        vec![
            (TokenCategory::Skip, 0, Some("[*]")),
            (TokenCategory::Skip, 4, Some("[*]")),
        ]
    );
}

#[test]
fn label_variable_substitution() {
    let config = TypingConfig::default();
    let registry = EffectRegistry::with_defaults();
    let mut vars = FxHashMap::default();
    vars.insert("TITLE".to_string(), "Captain".to_string());
    let parsed = MarkupParser::new(&config, &registry)
        .with_variables(&vars)
        .parse("{VAR=title}")
        .unwrap();
    assert_eq!(parsed.text, "Captain");
    assert!(parsed.tokens.is_empty());
}

#[test]
fn global_variable_substitution() {
    let config = TypingConfig::default().with_global_variable("title", "Captain");
    let registry = EffectRegistry::with_defaults();
    let parsed = parse_tokens("{VAR=title}", &config, &registry).unwrap();
    assert_eq!(parsed.text, "Captain");
    assert!(parsed.tokens.is_empty());
}

#[test]
fn scale_extremes() {
    let parsed = parse("{SCALE=0}a{SCALE=375}b{SIZE=1000}c");
    assert_eq!(parsed.text, "abc");
    assert_eq!(parsed.markup, "[%0]a[%375]b[%375]c");
}

#[test]
fn color_markup_conventions() {
    for hex in ["FF8800", "00ff00", "12345678"] {
        assert_eq!(color_markup(hex), format!("[#{hex}]"));
    }
    for name in ["RED", "sky", "light gray"] {
        assert_eq!(color_markup(name), format!("[{name}]"));
    }
    let parsed = parse("{COLOR=FF8800}x{COLOR=red}y");
    assert_eq!(parsed.markup, "[#FF8800]x[red]y");
}

#[test]
fn end_and_start_at_same_index_close_first() {
    let parsed = parse("{SHAKE}ab{ENDSHAKE}{SHAKE}cd");
    let order: Vec<_> = parsed
        .tokens
        .in_processing_order()
        .map(|t| (t.position, t.category))
        .collect();
    assert_eq!(
        order,
        vec![
            (0, TokenCategory::EffectStart),
            (2, TokenCategory::EffectEnd),
            (2, TokenCategory::EffectStart),
        ]
    );
}

#[test]
fn default_token_is_prepended() {
    let config = TypingConfig::default().with_default_token("{FASTER}[RED]");
    let registry = EffectRegistry::with_defaults();
    let parsed = parse_tokens("hey", &config, &registry).unwrap();
    assert_eq!(parsed.text, "hey");
    assert_eq!(parsed.markup, "[RED]hey");
    let first = parsed.tokens.in_processing_order().next().unwrap();
    assert_eq!(first.category, TokenCategory::Skip);
    assert!(
        parsed
            .tokens
            .iter()
            .any(|t| t.name == "FASTER" && t.category == TokenCategory::Speed)
    );
}

#[test]
fn style_and_font_tokens() {
    let parsed = parse("{STYLE=italic}a{STYLE=reset}{FONT=Serif}b{CLEARFONT}");
    assert_eq!(parsed.markup, "[/]a[][@Serif]b[@]");
    assert_eq!(parsed.text, "ab");
}

#[test]
fn escaped_bracket_is_literal() {
    let parsed = parse("[[not a tag] ok");
    assert_eq!(parsed.text, "[not a tag] ok");
    assert!(parsed.tokens.is_empty());
}

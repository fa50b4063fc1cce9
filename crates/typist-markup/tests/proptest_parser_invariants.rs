//! Property-based invariant tests for the markup parser.
//!
//! 1. Parsing the markup again yields the same markup, the same text and no
//!    brace tokens. Without bracket markup the clean text is a fixed point.
//! 2. Token list order is total and sorted.
//! 3. Every token position is a valid index into the clean text.
//! 4. Arbitrary input never panics the parser.

use std::cmp::Ordering;

use proptest::prelude::*;
use typist_core::TypingConfig;
use typist_effects::EffectRegistry;
use typist_markup::{ParsedText, TokenCategory, parse_tokens};

// ── Helpers ─────────────────────────────────────────────────────────────

const BRACE_TOKENS: [&str; 14] = [
    "{WAVE}",
    "{ENDWAVE}",
    "{SHAKE=2;1}",
    "{ENDSHAKE}",
    "{WAIT=0.5}",
    "{EVENT=ping}",
    "{FAST}",
    "{SPEED=3}",
    "{COLOR=red}",
    "{STYLE=bold}",
    "{SIZE=150}",
    "{RESET}",
    "{VAR=who}",
    "{RAINBOW=1;1}",
];

const BRACKET_TAGS: [&str; 8] = ["[*]", "[/]", "[_]", "[]", "[#FF0000]", "[BLUE]", "[%200]", "[+icon]"];

/// Loose punctuation that can pair up with neighbours once tokens are gone.
const STRAYS: [&str; 7] = ["[[", "[", "]", "{", "}", "{WAIT", "WAIT}"];

fn piece_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z ]{1,6}",
        2 => prop::sample::select(BRACE_TOKENS.to_vec()).prop_map(str::to_string),
        2 => prop::sample::select(BRACKET_TAGS.to_vec()).prop_map(str::to_string),
        2 => prop::sample::select(STRAYS.to_vec()).prop_map(str::to_string),
    ]
}

fn markup_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(piece_strategy(), 0..16).prop_map(|pieces| pieces.concat())
}

/// Brace tokens that never expand into bracket markup.
const PLAIN_TOKENS: [&str; 9] = [
    "{WAVE}",
    "{ENDWAVE}",
    "{WAIT=0.5}",
    "{EVENT=ping}",
    "{FAST}",
    "{VAR=who}",
    "{{WAIT}",
    "{WAIT}}",
    "{",
];

fn bracket_free_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        2 => "[a-zA-Z ]{1,6}",
        3 => prop::sample::select(PLAIN_TOKENS.to_vec()).prop_map(str::to_string),
        1 => prop::sample::select(vec!["}", "{WAIT", "WAIT}"]).prop_map(str::to_string),
    ];
    prop::collection::vec(piece, 0..16).prop_map(|pieces| pieces.concat())
}

fn parse(text: &str) -> ParsedText {
    let config = TypingConfig::default().with_global_variable("who", "Ada");
    let registry = EffectRegistry::with_defaults();
    parse_tokens(text, &config, &registry).unwrap()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn markup_is_a_fixed_point(input in markup_strategy()) {
        let once = parse(&input);
        let twice = parse(&once.markup);
        prop_assert_eq!(&twice.markup, &once.markup, "input {:?}", input);
        prop_assert_eq!(&twice.text, &once.text, "input {:?}", input);
        prop_assert!(
            twice.tokens.iter().all(|t| t.category == TokenCategory::Skip),
            "brace tokens survived in {:?}",
            once.markup
        );
    }

    #[test]
    fn clean_text_is_a_fixed_point_without_brackets(input in bracket_free_strategy()) {
        let once = parse(&input);
        prop_assert!(!once.markup.contains('['));
        prop_assert_eq!(&once.text, &once.markup);
        let twice = parse(&once.text);
        prop_assert_eq!(&twice.text, &once.text, "input {:?}", input);
        prop_assert!(twice.tokens.is_empty(), "tokens survived in {:?}", once.text);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Ordering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn token_order_is_sorted_and_total(input in markup_strategy()) {
        let parsed = parse(&input);
        let entries = parsed.tokens.as_slice();
        for pair in entries.windows(2) {
            prop_assert_ne!(pair[0].list_order(&pair[1]), Ordering::Greater);
        }
        for a in entries {
            prop_assert_eq!(a.list_order(a), Ordering::Equal);
            for b in entries {
                prop_assert_eq!(a.list_order(b), b.list_order(a).reverse());
                if a.list_order(b) == Ordering::Equal {
                    prop_assert_eq!(a.position, b.position);
                    prop_assert_eq!(a.category, b.category);
                    prop_assert_eq!(&a.name, &b.name);
                    prop_assert_eq!(&a.string_value, &b.string_value);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Positions
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn positions_fit_the_clean_text(input in markup_strategy()) {
        let parsed = parse(&input);
        let len = parsed.text.chars().count();
        for token in &parsed.tokens {
            prop_assert!(token.position <= len, "{} at {} > {}", token.name, token.position, len);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Robustness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_text_never_panics(input in "[\\PC{}\\[\\];=]{0,64}") {
        let config = TypingConfig::default();
        let registry = EffectRegistry::with_defaults();
        let _ = parse_tokens(&input, &config, &registry);
    }
}

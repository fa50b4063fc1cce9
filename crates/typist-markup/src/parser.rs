#![forbid(unsafe_code)]

//! Three-pass markup parser.
//!
//! 1. **Replacement tokens** (`VAR`, `IF`, `COLOR`, `STYLE`, `SIZE`, `SCALE`,
//!    `FONT`, `CLEARSIZE`, `CLEARFONT`, `RESET`, `CLEARCOLOR`, `ENDCOLOR`)
//!    are substituted in place. Scanning resumes just before each
//!    substitution, so replacements may expand into further tokens.
//! 2. **Position tokens** (`WAIT`, `EVENT`, the speed family, `SKIP`, effect
//!    starts and ends) are removed and recorded with their offset.
//! 3. **Bracket groups** are recorded as `SKIP` tokens and dropped from the
//!    clean text, and every offset is mapped into clean-text char indices.
//!
//! Brace tokens with unregistered names are left in the text as written.
//!
//! [`ParsedText::markup`] is a fixed point: parsing it again gives back the
//! same markup and text, with only bracket-group tokens. The clean text is a
//! fixed point only while the markup has no `[`, since `[[` unescapes to `[`
//! and removing a bracket group can bring braces together.

use std::ops::Range;

use rustc_hash::FxHashMap;
use typist_core::{OBJECT_REPLACEMENT, TypingConfig};
use typist_effects::{Effect, EffectRegistry, END_PREFIX, Params, param_as_float};

use crate::error::ParseError;
use crate::scanner::{BraceToken, MarkupScanner, Piece, find_brace_token};
use crate::tag::{BracketTag, color_markup, font_markup, size_markup, style_markup};
use crate::token::{TokenCategory, TokenEntry, TokenList};

/// Delay multipliers of the named speed tokens.
pub const SPEED_PRESETS: [(&str, f32); 5] = [
    ("SLOWER", 2.0),
    ("SLOW", 1.5),
    ("NORMAL", 1.0),
    ("FAST", 0.5),
    ("FASTER", 0.25),
];

/// Supplies variable values ahead of the label and global tables.
pub trait VariableResolver {
    /// Value of `name` (as written in the markup), or `None` to fall through.
    fn resolve_variable(&self, name: &str) -> Option<String>;
}

impl<F> VariableResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve_variable(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Result of parsing one markup string.
#[derive(Debug)]
pub struct ParsedText {
    /// Visible text: no brace tokens, no bracket groups.
    pub text: String,
    /// Text with brace tokens removed and bracket groups kept.
    pub markup: String,
    pub tokens: TokenList,
}

/// Parse `text` with no label variables or resolver.
pub fn parse_tokens(
    text: &str,
    config: &TypingConfig,
    registry: &EffectRegistry,
) -> Result<ParsedText, ParseError> {
    MarkupParser::new(config, registry).parse(text)
}

/// Markup parser bound to a configuration and an effect registry.
#[derive(Clone, Copy)]
pub struct MarkupParser<'a> {
    config: &'a TypingConfig,
    registry: &'a EffectRegistry,
    variables: Option<&'a FxHashMap<String, String>>,
    resolver: Option<&'a dyn VariableResolver>,
}

impl std::fmt::Debug for MarkupParser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupParser")
            .field("variables", &self.variables.map(FxHashMap::len))
            .field("resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> MarkupParser<'a> {
    pub fn new(config: &'a TypingConfig, registry: &'a EffectRegistry) -> Self {
        Self {
            config,
            registry,
            variables: None,
            resolver: None,
        }
    }

    /// Label-level variables, keyed by uppercase name.
    #[must_use]
    pub fn with_variables(mut self, variables: &'a FxHashMap<String, String>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Resolver consulted before any variable table.
    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn VariableResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Parse `text` (with the configured default token prepended).
    pub fn parse(&self, text: &str) -> Result<ParsedText, ParseError> {
        let span = tracing::debug_span!("parse_tokens", len = text.len());
        let _guard = span.enter();

        let mut source = String::with_capacity(self.config.default_token.len() + text.len());
        source.push_str(&self.config.default_token);
        source.push_str(text);

        let mut replaced = 0;
        let expanded = self.expand_counted(source, &mut replaced);
        let (markup, pending) = self.strip_position_tokens(expanded, &mut replaced)?;
        let (clean, entries) = locate_tokens(&markup, pending);
        let tokens = TokenList::from_entries(entries);
        tracing::debug!(
            chars = clean.chars().count(),
            tokens = tokens.len(),
            "parsed markup"
        );
        Ok(ParsedText {
            text: clean,
            markup,
            tokens,
        })
    }

    // -----------------------------------------------------------------------
    // Pass 1
    // -----------------------------------------------------------------------

    /// Substitute every replacement token in `text`.
    pub fn expand_replacements(&self, text: &str) -> String {
        let mut replaced = 0;
        self.expand_counted(text.to_string(), &mut replaced)
    }

    fn expand_counted(&self, mut out: String, replaced: &mut usize) -> String {
        let mut from = 0;
        while let Some(token) = find_brace_token(&out, from) {
            let Some(replacement) = self.replacement_for(&token) else {
                from = token.end;
                continue;
            };
            if !self.take_replacement(replaced) {
                break;
            }
            tracing::trace!(token = token.name, "replace token");
            let (start, end) = (token.start, token.end);
            out.replace_range(start..end, &replacement);
            from = rescan_from(&out, start);
        }
        out
    }

    /// Count one replacement against the limit shared by both passes.
    fn take_replacement(&self, replaced: &mut usize) -> bool {
        if *replaced >= self.config.max_replacements {
            tracing::warn!(
                limit = self.config.max_replacements,
                "replacement limit reached, remaining tokens left as written"
            );
            return false;
        }
        *replaced += 1;
        true
    }

    fn replacement_for(&self, token: &BraceToken<'_>) -> Option<String> {
        let key = token.key();
        let param = token.first_param().unwrap_or_default();
        let text = match key.as_str() {
            "VAR" => self.variable(param),
            "IF" => self.conditional(token),
            "COLOR" => color_markup(param),
            "STYLE" => style_markup(param).unwrap_or_default().to_string(),
            "SIZE" | "SCALE" => size_markup(param),
            "FONT" if param.is_empty() => "[@]".to_string(),
            "FONT" => font_markup(param),
            "CLEARSIZE" => "[%]".to_string(),
            "CLEARFONT" => "[@]".to_string(),
            "RESET" => format!(
                "[]{}{{NORMAL}}{}",
                self.end_all_effects(),
                self.config.default_token
            ),
            "CLEARCOLOR" | "ENDCOLOR" => format!(
                "[#{}]{}{}",
                self.config.clear_color.to_hex(),
                self.end_all_effects(),
                self.config.default_token
            ),
            _ => return None,
        };
        Some(text)
    }

    /// Value of a variable: resolver, then label variables, then global
    /// variables, then the uppercased name itself.
    pub fn variable(&self, name: &str) -> String {
        let name = name.trim();
        if let Some(value) = self.resolver.and_then(|r| r.resolve_variable(name)) {
            return value;
        }
        let key = name.to_uppercase();
        if let Some(value) = self.variables.and_then(|v| v.get(&key)) {
            return value.clone();
        }
        if let Some(value) = self.config.global_variable(&key) {
            return value.to_string();
        }
        key
    }

    fn conditional(&self, token: &BraceToken<'_>) -> String {
        let params = token.split_params();
        let Some((key, cases)) = params.split_first() else {
            return String::new();
        };
        let value = self.variable(key);
        let value = value.trim();
        let mut fallback = None;
        for case in cases {
            match case.split_once('=') {
                Some((k, v)) if k.trim().is_empty() => {
                    if fallback.is_none() {
                        fallback = Some(v);
                    }
                }
                Some((k, v)) => {
                    if k.trim().eq_ignore_ascii_case(value) {
                        return v.to_string();
                    }
                }
                None => {
                    if fallback.is_none() {
                        fallback = Some(*case);
                    }
                }
            }
        }
        fallback.map(str::to_string).unwrap_or_default()
    }

    fn end_all_effects(&self) -> String {
        self.registry
            .names()
            .into_iter()
            .map(|name| format!("{{{END_PREFIX}{name}}}"))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Pass 2
    // -----------------------------------------------------------------------

    /// Remove position tokens, returning the remaining text and each token
    /// with its byte offset in that text.
    ///
    /// Every removal rescans from the splice point, so braces brought
    /// together by a removal are read as the token they now form.
    fn strip_position_tokens(
        &self,
        mut out: String,
        replaced: &mut usize,
    ) -> Result<(String, Vec<(usize, TokenEntry)>), ParseError> {
        let mut pending: Vec<(usize, TokenEntry)> = Vec::new();
        let mut from = 0;
        while let Some(token) = find_brace_token(&out, from) {
            let (start, end) = (token.start, token.end);
            if let Some(entry) = self.position_token(&token, &out)? {
                tracing::trace!(
                    token = %entry.name,
                    category = %entry.category,
                    "register token"
                );
                shift_pending(&mut pending, start..end, 0);
                pending.push((start, entry));
                out.replace_range(start..end, "");
                from = rescan_from(&out, start);
                continue;
            }
            match self.replacement_for(&token) {
                Some(replacement) if self.take_replacement(replaced) => {
                    tracing::trace!(token = token.name, "replace joined token");
                    shift_pending(&mut pending, start..end, replacement.len());
                    out.replace_range(start..end, &replacement);
                    from = rescan_from(&out, start);
                }
                _ => {
                    tracing::debug!(token = token.name, "unknown token left as text");
                    from = end;
                }
            }
        }
        pending.sort_by_key(|(at, _)| *at);
        Ok((out, pending))
    }

    fn position_token(
        &self,
        token: &BraceToken<'_>,
        text: &str,
    ) -> Result<Option<TokenEntry>, ParseError> {
        let key = token.key();
        let param = token.first_param();
        let entry = match key.as_str() {
            "WAIT" => {
                let wait = self.config.default_wait;
                let seconds = param.map_or(wait, |p| param_as_float(p, wait)).max(0.0);
                TokenEntry::new("WAIT", TokenCategory::Wait, 0).with_float(seconds)
            }
            "EVENT" => TokenEntry::new("EVENT", TokenCategory::Event, 0)
                .with_string(token.params.unwrap_or_default()),
            "SPEED" => {
                let factor = param.map_or(1.0, |p| param_as_float(p, 1.0));
                let delay = self.config.default_speed_per_char
                    / self.config.clamp_speed_modifier(factor);
                TokenEntry::new("SPEED", TokenCategory::Speed, 0).with_float(delay)
            }
            "SKIP" => {
                let count = param.map_or(f32::INFINITY, |p| param_as_float(p, f32::INFINITY));
                TokenEntry::new("SKIP", TokenCategory::Skip, 0).with_float(count.max(0.0))
            }
            _ => {
                if let Some(&(name, factor)) = SPEED_PRESETS.iter().find(|(n, _)| *n == key) {
                    TokenEntry::new(name, TokenCategory::Speed, 0)
                        .with_float(self.config.default_speed_per_char * factor)
                } else if self.registry.is_effect_token(&key) {
                    let (name, effect) = self.create_effect(token, text)?;
                    TokenEntry::new(name, TokenCategory::EffectStart, 0).with_effect(effect)
                } else if let Some(name) = self.registry.end_target(&key) {
                    TokenEntry::new(name, TokenCategory::EffectEnd, 0)
                } else {
                    return Ok(None);
                }
            }
        };
        Ok(Some(entry))
    }

    fn create_effect(
        &self,
        token: &BraceToken<'_>,
        text: &str,
    ) -> Result<(String, Box<dyn Effect>), ParseError> {
        let args = token.split_params();
        let params = Params::new(&args, self.config);
        let created = self.registry.resolve(token.name).and_then(|name| {
            let effect = self.registry.create(&name, &params)?;
            Ok((name, effect))
        });
        created.map_err(|source| {
            let position = text[..token.start].chars().count();
            tracing::error!(
                token = token.name,
                position,
                error = %source,
                "cannot create effect"
            );
            ParseError::UnresolvedEffect {
                token: token.name.to_string(),
                position,
                source,
            }
        })
    }
}

/// Where to resume scanning after a splice at `at`: the last `{` before it,
/// which is the only place a token spanning the splice can open.
fn rescan_from(text: &str, at: usize) -> usize {
    text[..at].rfind('{').unwrap_or(at)
}

/// Move pending byte offsets after `range` was replaced by `inserted` bytes.
fn shift_pending(pending: &mut [(usize, TokenEntry)], range: Range<usize>, inserted: usize) {
    for (at, _) in pending.iter_mut() {
        if *at >= range.end {
            *at = *at - range.end + range.start + inserted;
        } else if *at > range.start {
            *at = range.start;
        }
    }
}

// ---------------------------------------------------------------------------
// Pass 3
// ---------------------------------------------------------------------------

/// Build the clean text, add a `SKIP` token per bracket group, and move
/// pending tokens from byte offsets in `markup` to char indices in the clean
/// text.
fn locate_tokens(markup: &str, pending: Vec<(usize, TokenEntry)>) -> (String, Vec<TokenEntry>) {
    let mut text = String::with_capacity(markup.len());
    let mut count = 0usize;
    let mut tokens = Vec::with_capacity(pending.len());
    let mut pending = pending.into_iter().peekable();
    for (byte, piece) in MarkupScanner::new(markup) {
        while let Some((_, mut entry)) = pending.next_if(|(at, _)| *at <= byte) {
            entry.position = count;
            tokens.push(entry);
        }
        match piece {
            Piece::Char(c) => {
                text.push(c);
                count += 1;
            }
            Piece::Tag { content, raw } => {
                tokens.push(TokenEntry::new("SKIP", TokenCategory::Skip, count).with_string(raw));
                if matches!(BracketTag::parse(content), BracketTag::Image(_)) {
                    text.push(OBJECT_REPLACEMENT);
                    count += 1;
                }
            }
        }
    }
    for (_, mut entry) in pending {
        entry.position = count;
        tokens.push(entry);
    }
    (text, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;
    use typist_core::PackedRgba;

    fn parse(text: &str) -> ParsedText {
        let config = TypingConfig::default();
        let registry = EffectRegistry::with_defaults();
        parse_tokens(text, &config, &registry).unwrap()
    }

    fn summary(parsed: &ParsedText) -> Vec<(usize, TokenCategory, String)> {
        parsed
            .tokens
            .in_processing_order()
            .map(|t| (t.position, t.category, t.name.clone()))
            .collect()
    }

    #[test]
    fn wait_event_and_speed() {
        let p = parse("a{WAIT=2}b{EVENT=boom;x}c{FAST}d{SPEED=2}e{WAIT}");
        assert_eq!(p.text, "abcde");
        let t: Vec<_> = p.tokens.in_processing_order().collect();
        assert_eq!((t[0].position, t[0].float_value), (1, 2.0));
        assert_eq!(t[1].string_value.as_deref(), Some("boom;x"));
        assert_eq!(t[1].position, 2);
        assert_eq!(t[2].name, "FAST");
        assert!((t[2].float_value - 0.0175).abs() < 1e-6);
        assert!((t[3].float_value - 0.0175).abs() < 1e-6);
        assert_eq!((t[4].position, t[4].float_value), (5, 0.25));
    }

    #[test]
    fn effect_start_and_end_are_canonical() {
        let p = parse("{wave}hi{EndWave} there");
        assert_eq!(p.text, "hi there");
        assert_eq!(
            summary(&p),
            vec![
                (0, TokenCategory::EffectStart, "WAVE".to_string()),
                (2, TokenCategory::EffectEnd, "WAVE".to_string()),
            ]
        );
        let start = p.tokens.in_processing_order().next().unwrap();
        assert_eq!(start.effect.as_ref().map(|e| e.name()), Some("WAVE"));
    }

    #[test]
    fn unknown_tokens_stay_literal() {
        let p = parse("{NOPE=1}x{ENDNOPE}");
        assert_eq!(p.text, "{NOPE=1}x{ENDNOPE}");
        assert!(p.tokens.is_empty());
    }

    #[test]
    fn removal_reads_the_token_it_joins() {
        let p = parse("{{WAIT}WAIT}x");
        assert_eq!(p.text, "x");
        assert_eq!(p.markup, "x");
        assert_eq!(
            summary(&p),
            vec![
                (0, TokenCategory::Wait, "WAIT".to_string()),
                (0, TokenCategory::Wait, "WAIT".to_string()),
            ]
        );
        assert!(parse(&p.text).tokens.is_empty());
    }

    #[test]
    fn joined_token_keeps_earlier_offsets_in_place() {
        let p = parse("a{{WAIT=1}EVENT=x}b");
        assert_eq!(p.text, "ab");
        let t: Vec<_> = p.tokens.in_processing_order().collect();
        assert_eq!(t.len(), 2);
        assert!(t.iter().all(|t| t.position == 1));
        assert!(t.iter().any(|t| t.string_value.as_deref() == Some("x")));
    }

    #[test]
    fn joined_replacement_is_expanded() {
        let config = TypingConfig::default().with_global_variable("who", "Ada");
        let registry = EffectRegistry::with_defaults();
        let p = parse_tokens("{{WAIT}VAR=who}!", &config, &registry).unwrap();
        assert_eq!(p.text, "Ada!");
        let again = parse_tokens(&p.markup, &config, &registry).unwrap();
        assert_eq!(again.text, "Ada!");
        assert!(again.tokens.is_empty());
    }

    #[test]
    fn escaped_bracket_survives_in_markup_only() {
        let p = parse("[[*]bold");
        assert_eq!(p.text, "[*]bold");
        assert_eq!(p.markup, "[[*]bold");
        assert!(p.tokens.is_empty());

        let again = parse(&p.markup);
        assert_eq!(again.markup, p.markup);
        assert_eq!(again.text, p.text);

        // The clean text has lost the escape.
        assert_eq!(parse(&p.text).text, "bold");
    }

    #[test]
    fn dropped_group_can_join_braces() {
        let p = parse("{[*]WAIT}x");
        assert_eq!(p.markup, "{[*]WAIT}x");
        assert_eq!(p.text, "{WAIT}x");
        assert_eq!(summary(&p), vec![(1, TokenCategory::Skip, "SKIP".to_string())]);
        assert_eq!(parse(&p.markup).text, p.text);
    }

    #[test]
    fn replacement_tokens() {
        let config = TypingConfig::default()
            .with_global_variable("who", "world")
            .with_clear_color(PackedRgba::RED);
        let registry = EffectRegistry::new();
        let parser = MarkupParser::new(&config, &registry);
        assert_eq!(parser.expand_replacements("{VAR=who}"), "world");
        assert_eq!(parser.expand_replacements("{VAR=missing}"), "MISSING");
        assert_eq!(parser.expand_replacements("{COLOR=00FF00}"), "[#00FF00]");
        assert_eq!(parser.expand_replacements("{STYLE=bold}"), "[*]");
        assert_eq!(parser.expand_replacements("{STYLE=??}"), "");
        assert_eq!(parser.expand_replacements("{SIZE=200}{CLEARSIZE}"), "[%200][%]");
        assert_eq!(parser.expand_replacements("{FONT=Mono}{CLEARFONT}"), "[@Mono][@]");
        assert_eq!(parser.expand_replacements("{RESET}"), "[]{NORMAL}");
        assert_eq!(parser.expand_replacements("{CLEARCOLOR}"), "[#FF0000FF]");
    }

    #[test]
    fn reset_closes_every_effect() {
        let config = TypingConfig::default().with_default_token("{SLOW}");
        let registry = EffectRegistry::with_defaults();
        let parser = MarkupParser::new(&config, &registry);
        let out = parser.expand_replacements("{RESET}");
        assert!(out.starts_with("[]{ENDATTENTION}{ENDBLINK}"));
        assert!(out.ends_with("{ENDZIPPER}{NORMAL}{SLOW}"));
        let p = parser.parse("{JUMP}a{RESET}b").unwrap();
        assert_eq!(p.text, "ab");
        let ends = p
            .tokens
            .iter()
            .filter(|t| t.category == TokenCategory::EffectEnd)
            .count();
        assert_eq!(ends, registry.len());
    }

    #[test]
    fn conditional_branches() {
        let mut vars = FxHashMap::default();
        vars.insert("MOOD".to_string(), "Happy".to_string());
        let config = TypingConfig::default();
        let registry = EffectRegistry::new();
        let parser = MarkupParser::new(&config, &registry).with_variables(&vars);
        assert_eq!(parser.expand_replacements("{IF=mood;sad=boo;happy=yay;=meh}"), "yay");
        assert_eq!(parser.expand_replacements("{IF=other;sad=boo;=meh}"), "meh");
        assert_eq!(parser.expand_replacements("{IF=other;sad=boo;plain}"), "plain");
        assert_eq!(parser.expand_replacements("{IF=other;sad=boo}"), "");
    }

    #[test]
    fn resolver_takes_precedence() {
        let mut vars = FxHashMap::default();
        vars.insert("NAME".to_string(), "label".to_string());
        let config = TypingConfig::default().with_global_variable("name", "global");
        let registry = EffectRegistry::new();
        let resolver = |name: &str| (name == "name").then(|| "resolver".to_string());
        let base = MarkupParser::new(&config, &registry);
        assert_eq!(base.variable("name"), "global");
        let labeled = base.with_variables(&vars);
        assert_eq!(labeled.variable("Name"), "label");
        assert_eq!(labeled.with_resolver(&resolver).variable("name"), "resolver");
    }

    #[test]
    fn self_referential_variable_is_bounded() {
        let config = TypingConfig::default()
            .with_global_variable("loop", "x{VAR=loop}")
            .with_max_replacements(10);
        let registry = EffectRegistry::new();
        let out = MarkupParser::new(&config, &registry).expand_replacements("{VAR=loop}");
        assert_eq!(out, "xxxxxxxxxx{VAR=loop}");
    }

    #[test]
    fn inline_image_keeps_a_placeholder() {
        let p = parse("a[+smile]b");
        assert_eq!(p.text, format!("a{OBJECT_REPLACEMENT}b"));
        assert_eq!(p.markup, "a[+smile]b");
        assert_eq!(summary(&p), vec![(1, TokenCategory::Skip, "SKIP".to_string())]);
    }

    #[test]
    fn skip_directive() {
        let p = parse("ab{SKIP=3}cdef{SKIP}g");
        let t: Vec<_> = p.tokens.in_processing_order().collect();
        assert_eq!((t[0].position, t[0].float_value), (2, 3.0));
        assert!(t[0].string_value.is_none());
        assert!(t[1].float_value.is_infinite());
    }

    #[test]
    fn dangling_alias_is_fatal() {
        let config = TypingConfig::default();
        let mut registry = EffectRegistry::with_defaults();
        registry.register_alias("WOBBLE", "WAVE").unwrap();
        registry.unregister("WAVE");
        let err = parse_tokens("ab{WOBBLE}c", &config, &registry).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnresolvedEffect { ref token, position: 2, .. } if token == "WOBBLE"
        ));
    }

    #[traced_test]
    #[test]
    fn unresolvable_effect_is_logged() {
        let config = TypingConfig::default();
        let mut registry = EffectRegistry::with_defaults();
        registry.register_alias("BOUNCE", "JUMP").unwrap();
        registry.unregister("JUMP");
        let err = parse_tokens("go {bounce=2}!", &config, &registry).unwrap_err();
        let ParseError::UnresolvedEffect {
            token, position, ..
        } = &err;
        assert_eq!(token, "bounce");
        assert_eq!(*position, 3);
        assert!(logs_contain("cannot create effect"));
        assert!(logs_contain("bounce"));
    }

    #[traced_test]
    #[test]
    fn unknown_token_is_logged() {
        let p = parse("{MYSTERY}");
        assert_eq!(p.text, "{MYSTERY}");
        assert!(logs_contain("unknown token left as text"));
    }
}

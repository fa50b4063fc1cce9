#![forbid(unsafe_code)]

//! Markup tokenizer for Typist.
//!
//! Text is annotated with two kinds of markup:
//! - brace tokens, `{NAME}` or `{NAME=param;param}`, for variables,
//!   timing, events and effects
//! - bracket tags, `[*]`, `[#FF0000]`, `[+region]` and so on, for style
//!   and color
//!
//! [`MarkupParser::parse`] turns annotated text into a [`ParsedText`]: the
//! clean visible text, the markup text still holding bracket tags, and a
//! [`TokenList`] of everything that happens at a given char index.
//!
//! # Example
//! ```
//! use typist_core::TypingConfig;
//! use typist_effects::EffectRegistry;
//! use typist_markup::{TokenCategory, parse_tokens};
//!
//! let config = TypingConfig::default();
//! let registry = EffectRegistry::with_defaults();
//! let parsed = parse_tokens("{WAVE}[*]Hi[*]{ENDWAVE}!", &config, &registry).unwrap();
//!
//! assert_eq!(parsed.text, "Hi!");
//! assert_eq!(parsed.markup, "[*]Hi[*]!");
//!
//! let order: Vec<_> = parsed.tokens.in_processing_order().map(|t| t.category).collect();
//! assert_eq!(
//!     order,
//!     [
//!         TokenCategory::Skip,
//!         TokenCategory::EffectStart,
//!         TokenCategory::EffectEnd,
//!         TokenCategory::Skip,
//!     ]
//! );
//! ```

pub mod error;
pub mod parser;
pub mod scanner;
pub mod tag;
pub mod token;

pub use error::ParseError;
pub use parser::{MarkupParser, ParsedText, SPEED_PRESETS, VariableResolver, parse_tokens};
pub use scanner::{BraceToken, MarkupScanner, Piece, find_brace_token};
pub use tag::{BracketTag, color_markup, font_markup, size_markup, style_markup};
pub use token::{TokenCategory, TokenEntry, TokenList};

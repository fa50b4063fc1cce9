#![forbid(unsafe_code)]

//! Typist public facade crate.
//!
//! Re-exports the glyph model, the effect library, the markup parser and
//! (with the default `label` feature) the reference typing label, plus a
//! small prelude.
//!
//! ```
//! use typist::prelude::*;
//!
//! let config = TypingConfig::default();
//! let registry = EffectRegistry::with_defaults();
//! let parsed = parse_tokens("{WAVE=1;1;1;_}Hi", &config, &registry)?;
//! assert_eq!(parsed.text, "Hi");
//! # Ok::<(), typist::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use typist_core::{
    Glyph, GlyphFlags, Interpolation, NAMED_COLORS, NO_COLOR, OBJECT_REPLACEMENT, PackedRgba,
    Script, TypingConfig, Xorshift64,
};

// --- Effect re-exports -----------------------------------------------------

pub use typist_effects::{
    Effect, EffectCore, EffectError, EffectFactory, EffectRegistry, EffectTarget, END_PREFIX,
    Params,
};

// --- Markup re-exports -----------------------------------------------------

pub use typist_markup::{
    MarkupParser, ParseError, ParsedText, TokenCategory, TokenEntry, TokenList, VariableResolver,
    parse_tokens,
};

// --- Label re-exports ------------------------------------------------------

#[cfg(feature = "label")]
pub use typist_label::{
    FixedLineHeight, FrameReport, LabelError, LineHeights, LineMetrics, PointerState, TypingEvent,
    TypingLabel,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for typist users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Effect lookup failed.
    Effect(EffectError),
    /// Markup could not be parsed.
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effect(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Effect(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<EffectError> for Error {
    fn from(err: EffectError) -> Self {
        Self::Effect(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

#[cfg(feature = "label")]
impl From<LabelError> for Error {
    fn from(err: LabelError) -> Self {
        match err {
            LabelError::Parse(err) => Self::Parse(err),
        }
    }
}

/// Standard result type for typist APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Effect, EffectRegistry, Error, Glyph, GlyphFlags, PackedRgba, Result, TypingConfig,
        parse_tokens,
    };

    #[cfg(feature = "label")]
    pub use crate::{PointerState, TypingEvent, TypingLabel};

    pub use crate::{core, effects, markup};

    #[cfg(feature = "label")]
    pub use crate::label;
}

pub use typist_core as core;
pub use typist_effects as effects;
#[cfg(feature = "label")]
pub use typist_label as label;
pub use typist_markup as markup;

#![forbid(unsafe_code)]

//! Parse errors.

use typist_effects::EffectError;

/// Fatal markup problems. Everything else in a markup string is recovered
/// from: malformed parameters take defaults, unknown tokens stay literal,
/// unclosed effects run to the end of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An effect token named a registered effect (or alias) that could not
    /// be built.
    UnresolvedEffect {
        /// Token name as written.
        token: String,
        /// Char index of the token in the text after replacement tokens are
        /// expanded.
        position: usize,
        source: EffectError,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedEffect {
                token,
                position,
                source,
            } => write!(
                f,
                "cannot create effect '{}' at position {}: {}",
                token, position, source
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnresolvedEffect { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_and_source() {
        let err = ParseError::UnresolvedEffect {
            token: "wobble".into(),
            position: 3,
            source: EffectError::UnresolvedAlias {
                alias: "WOBBLE".into(),
                target: "WAVE".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("'wobble'"));
        assert!(msg.contains("position 3"));
        assert!(err.source().is_some());
    }
}

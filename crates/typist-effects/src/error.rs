#![forbid(unsafe_code)]

//! Registry errors.

/// Failure to turn an effect name into an effect instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// No effect or alias is registered under this name.
    UnknownEffect { name: String },
    /// The alias exists but its target is no longer registered.
    UnresolvedAlias { alias: String, target: String },
}

impl std::fmt::Display for EffectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEffect { name } => write!(f, "no effect registered as '{}'", name),
            Self::UnresolvedAlias { alias, target } => write!(
                f,
                "effect alias '{}' points to '{}', which is not registered",
                alias, target
            ),
        }
    }
}

impl std::error::Error for EffectError {}

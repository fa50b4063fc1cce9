#![forbid(unsafe_code)]

//! Name to effect factory map.
//!
//! Names are case-insensitive and stored uppercase. The closing token of an
//! effect is its name with an `END` prefix, so `{WAVE}` opens a wave and
//! `{ENDWAVE}` closes it.
//!
//! # Usage
//!
//! ```
//! use typist_core::TypingConfig;
//! use typist_effects::{EffectRegistry, Params};
//!
//! let mut registry = EffectRegistry::with_defaults();
//! registry.register_alias("wobble", "wave").unwrap();
//!
//! let config = TypingConfig::default();
//! let effect = registry.create("Wobble", &Params::new(&["2"], &config)).unwrap();
//! assert_eq!(effect.name(), "WAVE");
//! assert_eq!(registry.end_target("endwobble").as_deref(), Some("WAVE"));
//! ```

use rustc_hash::FxHashMap;

use crate::effect::Effect;
use crate::effects::*;
use crate::error::EffectError;
use crate::params::Params;

/// Prefix that turns an effect name into its closing token.
pub const END_PREFIX: &str = "END";

/// Builds one effect instance from its token parameters.
pub type EffectFactory = fn(&Params<'_>) -> Box<dyn Effect>;

macro_rules! factory {
    ($ty:ty) => {
        (|params: &Params<'_>| -> Box<dyn Effect> { Box::new(<$ty>::new(params)) }) as EffectFactory
    };
}

/// Every built-in effect with its canonical name.
const DEFAULTS: [(&str, EffectFactory); 35] = [
    ("ATTENTION", factory!(AttentionEffect)),
    ("BLINK", factory!(BlinkEffect)),
    ("CANNON", factory!(CannonEffect)),
    ("CAROUSEL", factory!(CarouselEffect)),
    ("CROWD", factory!(CrowdEffect)),
    ("EASE", factory!(EaseEffect)),
    ("EMERGE", factory!(EmergeEffect)),
    ("FADE", factory!(FadeEffect)),
    ("GRADIENT", factory!(GradientEffect)),
    ("HANG", factory!(HangEffect)),
    ("HEARTBEAT", factory!(HeartbeatEffect)),
    ("HIGHLIGHT", factory!(HighlightEffect)),
    ("JOLT", factory!(JoltEffect)),
    ("JUMP", factory!(JumpEffect)),
    ("LINK", factory!(LinkEffect)),
    ("MEET", factory!(MeetEffect)),
    ("OCEAN", factory!(OceanEffect)),
    ("PINCH", factory!(PinchEffect)),
    ("RAINBOW", factory!(RainbowEffect)),
    ("ROTATE", factory!(RotateEffect)),
    ("SHAKE", factory!(ShakeEffect)),
    ("SHRINK", factory!(ShrinkEffect)),
    ("SICK", factory!(SickEffect)),
    ("SLAM", factory!(SlamEffect)),
    ("SLIDE", factory!(SlideEffect)),
    ("SPIN", factory!(SpinEffect)),
    ("SPIRAL", factory!(SpiralEffect)),
    ("SPUTTER", factory!(SputterEffect)),
    ("SQUASH", factory!(SquashEffect)),
    ("STYLIST", factory!(StylistEffect)),
    ("THROB", factory!(ThrobEffect)),
    ("TRIGGER", factory!(TriggerEffect)),
    ("WAVE", factory!(WaveEffect)),
    ("WIND", factory!(WindEffect)),
    ("ZIPPER", factory!(ZipperEffect)),
];

/// Registry of effect factories and aliases.
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    factories: FxHashMap<String, EffectFactory>,
    aliases: FxHashMap<String, String>,
}

impl EffectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in effect.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, factory) in DEFAULTS {
            registry.register(name, factory);
        }
        registry
    }

    /// Register (or replace) a factory under `name`.
    pub fn register(&mut self, name: &str, factory: EffectFactory) {
        let key = name.trim().to_ascii_uppercase();
        tracing::trace!(name = %key, "register effect");
        self.factories.insert(key, factory);
    }

    /// Make `alias` another name for the registered effect `target`.
    ///
    /// Fails if `target` is not registered right now. Aliases of aliases
    /// resolve to the final effect name.
    pub fn register_alias(&mut self, alias: &str, target: &str) -> Result<(), EffectError> {
        let alias = alias.trim().to_ascii_uppercase();
        let target = self.resolve(target)?;
        tracing::trace!(alias = %alias, target = %target, "register effect alias");
        self.aliases.insert(alias, target);
        Ok(())
    }

    /// Remove the effect registered under `name`. Aliases pointing to it are
    /// kept and fail to resolve until it is registered again.
    pub fn unregister(&mut self, name: &str) -> bool {
        let key = name.trim().to_ascii_uppercase();
        let removed = self.factories.remove(&key).is_some();
        if removed {
            tracing::debug!(name = %key, "unregister effect");
        }
        removed
    }

    /// Whether `name` is a registered effect name or alias.
    ///
    /// A dangling alias still counts, so that markup using it fails loudly
    /// in [`create`](Self::create) instead of turning into literal text.
    pub fn is_effect_token(&self, name: &str) -> bool {
        let key = name.trim().to_ascii_uppercase();
        self.factories.contains_key(&key) || self.aliases.contains_key(&key)
    }

    /// For a closing token such as `ENDWAVE`, the canonical name of the
    /// effect it closes.
    pub fn end_target(&self, token: &str) -> Option<String> {
        let key = token.trim().to_ascii_uppercase();
        let name = key.strip_prefix(END_PREFIX)?;
        if name.is_empty() || !self.is_effect_token(name) {
            return None;
        }
        self.resolve(name).ok()
    }

    /// Canonical effect name for a name or alias.
    pub fn resolve(&self, name: &str) -> Result<String, EffectError> {
        let key = name.trim().to_ascii_uppercase();
        if self.factories.contains_key(&key) {
            return Ok(key);
        }
        match self.aliases.get(&key) {
            Some(target) if self.factories.contains_key(target) => Ok(target.clone()),
            Some(target) => Err(EffectError::UnresolvedAlias {
                alias: key,
                target: target.clone(),
            }),
            None => Err(EffectError::UnknownEffect { name: key }),
        }
    }

    /// Registered effect names, sorted. Aliases are not included.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered effects.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no effect is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build the effect registered under `name` (or an alias of it).
    pub fn create(&self, name: &str, params: &Params<'_>) -> Result<Box<dyn Effect>, EffectError> {
        let key = self.resolve(name)?;
        let factory = self
            .factories
            .get(&key)
            .ok_or(EffectError::UnknownEffect { name: key })?;
        Ok(factory(params))
    }
}

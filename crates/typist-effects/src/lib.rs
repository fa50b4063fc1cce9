#![forbid(unsafe_code)]

//! Per-glyph animation effects for Typist.
//!
//! This crate provides:
//! - [`Effect`] and [`EffectTarget`] - the contract between an effect and the
//!   glyph buffer it animates
//! - [`Params`] - lenient parsing of `;`-separated token parameters
//! - [`EffectRegistry`] - case-insensitive name to factory map
//! - [`effects`] - the built-in effect library
//! - [`testing`] - a recording target for driving effects without a label
//!
//! # Example
//! ```
//! use typist_core::{PackedRgba, TypingConfig};
//! use typist_effects::testing::RecordingTarget;
//! use typist_effects::{EffectRegistry, Params};
//!
//! let config = TypingConfig::default();
//! let registry = EffectRegistry::with_defaults();
//! let mut wave = registry.create("wave", &Params::new(&["1", "1"], &config)).unwrap();
//!
//! let mut target = RecordingTarget::new("Hi", PackedRgba::WHITE);
//! target.step(wave.as_mut(), 0.1);
//! assert!(target.offsets.iter().any(|o| o.1 != 0.0));
//! ```

pub mod effect;
pub mod effects;
pub mod error;
pub mod params;
pub mod registry;
pub mod testing;

pub use effect::{Effect, EffectCore, EffectTarget};
pub use effects::ELASTIC_DURATION_FACTOR;
pub use error::EffectError;
pub use params::{Params, param_as_bool, param_as_color, param_as_float, param_as_raw_color};
pub use registry::{END_PREFIX, EffectFactory, EffectRegistry};

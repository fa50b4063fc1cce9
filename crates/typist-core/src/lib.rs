#![forbid(unsafe_code)]

//! Core: packed glyphs, colors, interpolation curves, configuration, and the
//! seeded random source shared by the parser, the effects and the label.

pub mod color;
pub mod config;
pub mod easing;
pub mod glyph;
pub mod rng;

pub use color::{NAMED_COLORS, NO_COLOR, PackedRgba};
pub use config::{OBJECT_REPLACEMENT, TypingConfig};
pub use easing::Interpolation;
pub use glyph::{Glyph, GlyphFlags, Script};
pub use rng::Xorshift64;

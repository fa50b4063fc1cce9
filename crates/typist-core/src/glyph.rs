#![forbid(unsafe_code)]

//! The packed glyph: one visible character, its style bits and its color in
//! a single `u64`.
//!
//! # Layout (64 bits)
//!
//! ```text
//! [63..32: color RGBA8888][31: -][30: bold][29: oblique][28: underline]
//! [27: strikethrough][26: -][25..24: script][23..20: scale][19..16: family]
//! [15..0: char]
//! ```
//!
//! # Scale nibble
//!
//! The nibble `n` stores a percentage as `((n + 4) & 15) * 25`, which puts
//! the default 100% at `n = 0` and covers 0% through 375% in steps of 25.
//!
//! # Invariants
//!
//! 1. Every `with_*` setter masks out exactly its own field before OR-ing the
//!    new value in; no other field changes.
//! 2. Characters outside the Basic Multilingual Plane are stored as U+FFFD.

use crate::color::PackedRgba;

bitflags::bitflags! {
    /// Style flags living in bits 27..30 of a packed glyph.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GlyphFlags: u64 {
        /// Strikethrough line.
        const STRIKETHROUGH = 1 << 27;
        /// Underline.
        const UNDERLINE     = 1 << 28;
        /// Oblique (synthetic italic).
        const OBLIQUE       = 1 << 29;
        /// Bold.
        const BOLD          = 1 << 30;
    }
}

/// Vertical script placement, stored in bits 24..25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Script {
    /// Regular baseline placement.
    #[default]
    Normal = 0,
    /// Small, lowered.
    Sub = 1,
    /// Small, centered on the line.
    Mid = 2,
    /// Small, raised.
    Super = 3,
}

impl Script {
    const fn from_bits(bits: u64) -> Self {
        match bits & 3 {
            1 => Self::Sub,
            2 => Self::Mid,
            3 => Self::Super,
            _ => Self::Normal,
        }
    }
}

/// A packed glyph. See the module docs for the bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Glyph(pub u64);

impl Glyph {
    /// Bits holding the character code.
    pub const CHAR_MASK: u64 = 0xFFFF;
    /// Bits holding the font family index.
    pub const FAMILY_MASK: u64 = 0xF << Self::FAMILY_SHIFT;
    /// Shift of the family field.
    pub const FAMILY_SHIFT: u32 = 16;
    /// Bits holding the scale nibble.
    pub const SCALE_MASK: u64 = 0xF << Self::SCALE_SHIFT;
    /// Shift of the scale nibble.
    pub const SCALE_SHIFT: u32 = 20;
    /// Bits holding the script field.
    pub const SCRIPT_MASK: u64 = 0x3 << Self::SCRIPT_SHIFT;
    /// Shift of the script field.
    pub const SCRIPT_SHIFT: u32 = 24;
    /// Bits holding the style flags.
    pub const FLAGS_MASK: u64 = GlyphFlags::all().bits();
    /// Bits holding the color.
    pub const COLOR_MASK: u64 = 0xFFFF_FFFF_0000_0000;
    /// Largest representable scale percentage.
    pub const MAX_SCALE_PERCENT: u32 = 375;

    /// A glyph for `ch` in `color`, with default style, scale and family.
    #[inline]
    pub fn new(ch: char, color: PackedRgba) -> Self {
        Self(0).with_char(ch).with_color(color)
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// The stored character code.
    #[inline]
    pub const fn char_code(self) -> u16 {
        (self.0 & Self::CHAR_MASK) as u16
    }

    /// The stored character, U+FFFD for unpaired surrogate codes.
    #[inline]
    pub fn ch(self) -> char {
        char::from_u32(self.char_code() as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Replace the character.
    #[inline]
    pub fn with_char(self, ch: char) -> Self {
        let code = u16::try_from(ch as u32).unwrap_or(0xFFFD);
        self.with_char_code(code)
    }

    /// Replace the raw character code.
    #[inline]
    pub const fn with_char_code(self, code: u16) -> Self {
        Self((self.0 & !Self::CHAR_MASK) | code as u64)
    }

    /// The color in the high 32 bits.
    #[inline]
    pub const fn color(self) -> PackedRgba {
        PackedRgba((self.0 >> 32) as u32)
    }

    /// Replace the color, leaving char and style bits untouched.
    #[inline]
    pub const fn with_color(self, color: PackedRgba) -> Self {
        Self((self.0 & !Self::COLOR_MASK) | ((color.0 as u64) << 32))
    }

    /// The style flags.
    #[inline]
    pub const fn flags(self) -> GlyphFlags {
        GlyphFlags::from_bits_truncate(self.0)
    }

    /// Replace every style flag at once.
    #[inline]
    pub const fn with_flags(self, flags: GlyphFlags) -> Self {
        Self((self.0 & !Self::FLAGS_MASK) | flags.bits())
    }

    /// Whether `flag` is set.
    #[inline]
    pub const fn has(self, flag: GlyphFlags) -> bool {
        self.flags().contains(flag)
    }

    /// The script placement.
    #[inline]
    pub const fn script(self) -> Script {
        Script::from_bits(self.0 >> Self::SCRIPT_SHIFT)
    }

    /// Replace the script placement.
    #[inline]
    pub const fn with_script(self, script: Script) -> Self {
        Self((self.0 & !Self::SCRIPT_MASK) | ((script as u64) << Self::SCRIPT_SHIFT))
    }

    /// The raw scale nibble.
    #[inline]
    pub const fn scale_nibble(self) -> u8 {
        ((self.0 & Self::SCALE_MASK) >> Self::SCALE_SHIFT) as u8
    }

    /// The scale as a percentage (0..=375, multiple of 25).
    #[inline]
    pub const fn scale_percent(self) -> u32 {
        (((self.scale_nibble() as u32) + 4) & 15) * 25
    }

    /// The scale as a multiplier (1.0 is 100%).
    #[inline]
    pub fn scale(self) -> f32 {
        self.scale_percent() as f32 / 100.0
    }

    /// Replace the scale. Clamped to 0..=375 and rounded to the nearest 25.
    #[inline]
    pub fn with_scale_percent(self, percent: u32) -> Self {
        let steps = (percent.min(Self::MAX_SCALE_PERCENT) + 12) / 25;
        let nibble = (steps + 12) & 15;
        Self((self.0 & !Self::SCALE_MASK) | ((nibble as u64) << Self::SCALE_SHIFT))
    }

    /// The font family index.
    #[inline]
    pub const fn family(self) -> u8 {
        ((self.0 & Self::FAMILY_MASK) >> Self::FAMILY_SHIFT) as u8
    }

    /// Replace the font family index (only the low 4 bits are kept).
    #[inline]
    pub const fn with_family(self, family: u8) -> Self {
        Self((self.0 & !Self::FAMILY_MASK) | (((family & 0xF) as u64) << Self::FAMILY_SHIFT))
    }
}

impl From<u64> for Glyph {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Glyph> for u64 {
    fn from(glyph: Glyph) -> Self {
        glyph.0
    }
}

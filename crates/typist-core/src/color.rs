#![forbid(unsafe_code)]

//! Packed RGBA colors and the built-in named color table.
//!
//! Colors are stored exactly as they appear in the high half of a packed
//! [`Glyph`](crate::glyph::Glyph): RGBA8888, red in the most significant byte.

use std::fmt;

/// A compact RGBA color.
///
/// - **Size:** 4 bytes.
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
///
/// Straight alpha; channels are never pre-multiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

/// Raw sentinel meaning "no color was given".
///
/// Not a meaningful RGBA value in markup; the typed APIs use
/// `Option<PackedRgba>` and only the raw helpers surface this number.
pub const NO_COLOR: u32 = 256;

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque mid gray.
    pub const GRAY: Self = Self::rgb(0x7f, 0x7f, 0x7f);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Return a copy with a different alpha channel.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self((self.0 & 0xFFFF_FF00) | a as u32)
    }

    /// Return a copy whose alpha is scaled by `opacity` in `[0.0, 1.0]`.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let a = ((self.a() as f32) * opacity).round().clamp(0.0, 255.0) as u8;
        self.with_alpha(a)
    }

    /// Interpolate every channel, alpha included, toward `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self::rgba(
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
            mix(self.a(), other.a()),
        )
    }

    /// Build an opaque color from hue, saturation and lightness, each in `[0, 1]`.
    ///
    /// Hue wraps, so `1.25` is the same as `0.25`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::from_hsla(hue, saturation, lightness, 1.0)
    }

    /// Build a color from hue, saturation, lightness and alpha.
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgba(
            to_u8(r),
            to_u8(g),
            to_u8(b),
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }

    /// Parse 6 (`RRGGBB`, opaque) or 8 (`RRGGBBAA`) hex digits, with or
    /// without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok().map(|v| Self((v << 8) | 0xFF)),
            8 => u32::from_str_radix(hex, 16).ok().map(Self),
            _ => None,
        }
    }

    /// Look up a built-in color name.
    ///
    /// Matching ignores ASCII case, spaces and underscores, so `light gray`,
    /// `LIGHT_GRAY` and `LightGray` are the same color.
    pub fn named(name: &str) -> Option<Self> {
        let key = normalize_color_name(name);
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|&(_, c)| c)
    }

    /// Eight uppercase hex digits, `RRGGBBAA`.
    pub fn to_hex(self) -> String {
        format!("{:08X}", self.0)
    }
}

impl fmt::Display for PackedRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Canonical form used for named-color lookups.
pub fn normalize_color_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ' && *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Built-in palette, keyed by normalized name.
pub const NAMED_COLORS: &[(&str, PackedRgba)] = &[
    ("CLEAR", PackedRgba(0x0000_0000)),
    ("BLACK", PackedRgba(0x0000_00FF)),
    ("WHITE", PackedRgba(0xFFFF_FFFF)),
    ("LIGHTGRAY", PackedRgba(0xBFBF_BFFF)),
    ("GRAY", PackedRgba(0x7F7F_7FFF)),
    ("GREY", PackedRgba(0x7F7F_7FFF)),
    ("DARKGRAY", PackedRgba(0x3F3F_3FFF)),
    ("BLUE", PackedRgba(0x0000_FFFF)),
    ("NAVY", PackedRgba(0x0000_7FFF)),
    ("ROYAL", PackedRgba(0x4169_E1FF)),
    ("SLATE", PackedRgba(0x7080_90FF)),
    ("SKY", PackedRgba(0x87CE_EBFF)),
    ("CYAN", PackedRgba(0x00FF_FFFF)),
    ("TEAL", PackedRgba(0x007F_7FFF)),
    ("GREEN", PackedRgba(0x00FF_00FF)),
    ("CHARTREUSE", PackedRgba(0x7FFF_00FF)),
    ("LIME", PackedRgba(0x32CD_32FF)),
    ("FOREST", PackedRgba(0x228B_22FF)),
    ("OLIVE", PackedRgba(0x6B8E_23FF)),
    ("YELLOW", PackedRgba(0xFFFF_00FF)),
    ("GOLD", PackedRgba(0xFFD7_00FF)),
    ("GOLDENROD", PackedRgba(0xDAA5_20FF)),
    ("ORANGE", PackedRgba(0xFFA5_00FF)),
    ("BROWN", PackedRgba(0x8B45_13FF)),
    ("TAN", PackedRgba(0xD2B4_8CFF)),
    ("FIREBRICK", PackedRgba(0xB222_22FF)),
    ("RED", PackedRgba(0xFF00_00FF)),
    ("SCARLET", PackedRgba(0xFF34_1CFF)),
    ("CORAL", PackedRgba(0xFF7F_50FF)),
    ("SALMON", PackedRgba(0xFA80_72FF)),
    ("PINK", PackedRgba(0xFF69_B4FF)),
    ("MAGENTA", PackedRgba(0xFF00_FFFF)),
    ("PURPLE", PackedRgba(0xA020_F0FF)),
    ("VIOLET", PackedRgba(0xEE82_EEFF)),
    ("MAROON", PackedRgba(0xB030_60FF)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_is_4_bytes() {
        assert_eq!(core::mem::size_of::<PackedRgba>(), 4);
    }

    #[test]
    fn rgb_sets_alpha_to_255() {
        let c = PackedRgba::rgb(1, 2, 3);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 255));
        assert_eq!(c.0, 0x0102_03FF);
    }

    #[test]
    fn hex_six_digits_is_opaque() {
        assert_eq!(PackedRgba::from_hex("FF8000"), Some(PackedRgba::rgb(255, 128, 0)));
        assert_eq!(PackedRgba::from_hex("#ff8000"), Some(PackedRgba::rgb(255, 128, 0)));
    }

    #[test]
    fn hex_eight_digits_keeps_alpha() {
        assert_eq!(
            PackedRgba::from_hex("11223344"),
            Some(PackedRgba::rgba(0x11, 0x22, 0x33, 0x44))
        );
    }

    #[test]
    fn hex_rejects_bad_lengths_and_digits() {
        assert_eq!(PackedRgba::from_hex("FFF"), None);
        assert_eq!(PackedRgba::from_hex("GG0000"), None);
        assert_eq!(PackedRgba::from_hex(""), None);
    }

    #[test]
    fn named_ignores_case_and_separators() {
        assert_eq!(PackedRgba::named("red"), Some(PackedRgba::RED));
        assert_eq!(PackedRgba::named("Light Gray"), PackedRgba::named("LIGHT_GRAY"));
        assert_eq!(PackedRgba::named("not-a-color"), None);
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(PackedRgba::from_hsl(0.0, 1.0, 0.5), PackedRgba::RED);
        assert_eq!(PackedRgba::from_hsl(1.0 / 3.0, 1.0, 0.5), PackedRgba::GREEN);
        assert_eq!(PackedRgba::from_hsl(2.0 / 3.0, 1.0, 0.5), PackedRgba::BLUE);
        assert_eq!(PackedRgba::from_hsl(1.0, 1.0, 0.5), PackedRgba::RED);
    }

    #[test]
    fn hsl_zero_saturation_is_gray() {
        let c = PackedRgba::from_hsl(0.3, 0.0, 0.5);
        assert_eq!(c.r(), c.g());
        assert_eq!(c.g(), c.b());
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = PackedRgba::BLACK;
        let b = PackedRgba::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).r(), 128);
    }

    #[test]
    fn display_and_to_hex_agree() {
        let c = PackedRgba::rgba(0xAB, 0xCD, 0xEF, 0x01);
        assert_eq!(c.to_hex(), "ABCDEF01");
        assert_eq!(c.to_string(), "#ABCDEF01");
    }
}

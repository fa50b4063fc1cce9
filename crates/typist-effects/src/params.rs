#![forbid(unsafe_code)]

//! Parameter protocol shared by every effect.
//!
//! Effect tokens carry `;`-separated parameter strings. Parsing never fails:
//! a missing, empty or malformed parameter yields the caller's default.

use typist_core::{NO_COLOR, PackedRgba, TypingConfig};

/// Tokens accepted as `true` (case-insensitive).
pub const TRUTHY: [&str; 6] = ["true", "yes", "t", "y", "on", "1"];

/// Tokens accepted as `false` (case-insensitive).
pub const FALSY: [&str; 6] = ["false", "no", "f", "n", "off", "0"];

/// Parse a float, falling back to `default` on empty, malformed or NaN input.
///
/// `inf` and `infinity` are accepted.
pub fn param_as_float(value: &str, default: f32) -> f32 {
    match value.trim().parse::<f32>() {
        Ok(v) if !v.is_nan() => v,
        _ => default,
    }
}

/// Parse a boolean from the truthy/falsy token sets; anything else is
/// `default`.
pub fn param_as_bool(value: &str, default: bool) -> bool {
    let value = value.trim();
    if TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value)) {
        true
    } else if FALSY.iter().any(|t| t.eq_ignore_ascii_case(value)) {
        false
    } else {
        default
    }
}

/// Parse a color from a configured name, a built-in name, or 6/8 hex digits.
pub fn param_as_color(value: &str, config: &TypingConfig) -> Option<PackedRgba> {
    config.parse_color(value)
}

/// Like [`param_as_color`], returning the raw `0xRRGGBBAA` value or
/// [`NO_COLOR`] when the text names no color.
pub fn param_as_raw_color(value: &str, config: &TypingConfig) -> u32 {
    param_as_color(value, config).map_or(NO_COLOR, |c| c.0)
}

/// Positional parameters of one effect token, plus the configuration used to
/// resolve color names.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    args: &'a [&'a str],
    config: &'a TypingConfig,
}

impl<'a> Params<'a> {
    /// Wrap a parameter list.
    pub fn new(args: &'a [&'a str], config: &'a TypingConfig) -> Self {
        Self { args, config }
    }

    /// Number of parameters given.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether no parameters were given.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Configuration in effect.
    pub fn config(&self) -> &'a TypingConfig {
        self.config
    }

    /// Raw parameter `index`, trimmed; `None` if absent or empty.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Float parameter with a default.
    pub fn float(&self, index: usize, default: f32) -> f32 {
        self.get(index)
            .map_or(default, |s| param_as_float(s, default))
    }

    /// Boolean parameter with a default.
    pub fn bool(&self, index: usize, default: bool) -> bool {
        self.get(index).map_or(default, |s| param_as_bool(s, default))
    }

    /// Color parameter; `None` if absent or unparseable.
    pub fn color(&self, index: usize) -> Option<PackedRgba> {
        self.get(index).and_then(|s| param_as_color(s, self.config))
    }

    /// Color parameter with a default.
    pub fn color_or(&self, index: usize, default: PackedRgba) -> PackedRgba {
        self.color(index).unwrap_or(default)
    }

    /// Duration in seconds; infinite when absent or malformed, and negative
    /// values also mean infinite.
    pub fn duration(&self, index: usize) -> f32 {
        let d = self.float(index, f32::INFINITY);
        if d < 0.0 { f32::INFINITY } else { d }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_fall_back_on_garbage() {
        assert_eq!(param_as_float("2.5", 1.0), 2.5);
        assert_eq!(param_as_float(" 3 ", 1.0), 3.0);
        assert_eq!(param_as_float("_", 1.0), 1.0);
        assert_eq!(param_as_float("", 7.0), 7.0);
        assert_eq!(param_as_float("NaN", 7.0), 7.0);
        assert!(param_as_float("inf", 1.0).is_infinite());
    }

    #[test]
    fn bools_use_token_sets() {
        for t in ["true", "YES", "t", "Y", "On", "1"] {
            assert!(param_as_bool(t, false), "{t}");
        }
        for f in ["false", "no", "F", "n", "OFF", "0"] {
            assert!(!param_as_bool(f, true), "{f}");
        }
        assert!(param_as_bool("maybe", true));
        assert!(!param_as_bool("maybe", false));
    }

    #[test]
    fn colors_resolve_names_then_hex() {
        let config = TypingConfig::default().with_color("brand", PackedRgba::rgb(1, 2, 3));
        assert_eq!(param_as_color("brand", &config), Some(PackedRgba::rgb(1, 2, 3)));
        assert_eq!(param_as_color("red", &config), Some(PackedRgba::RED));
        assert_eq!(param_as_color("00FF00", &config), Some(PackedRgba::GREEN));
        assert_eq!(param_as_color("zzz", &config), None);
        assert_eq!(param_as_raw_color("zzz", &config), NO_COLOR);
        assert_eq!(param_as_raw_color("red", &config), 0xFF00_00FF);
    }

    #[test]
    fn params_index_and_defaults() {
        let config = TypingConfig::default();
        let args = ["1.5", "", "yes", "blue", "-2"];
        let p = Params::new(&args, &config);
        assert_eq!(p.len(), 5);
        assert_eq!(p.float(0, 1.0), 1.5);
        assert_eq!(p.float(1, 9.0), 9.0);
        assert_eq!(p.float(42, 9.0), 9.0);
        assert!(p.bool(2, false));
        assert_eq!(p.color(3), Some(PackedRgba::BLUE));
        assert_eq!(p.color(1), None);
        assert!(p.duration(4).is_infinite());
        assert!(p.duration(9).is_infinite());
        assert_eq!(p.get(1), None);
    }
}

// =============================================================================
// Lumen Scene - Colors
// =============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::SceneError;

/// An opaque 8-bit RGB color, parsed from CSS hex notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgba()` string with the given alpha, clamped to [0, 1].
    pub fn css(&self, alpha: f32) -> String {
        let alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 };
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
    }

    /// Linear blend toward `other`; `t` is clamped to [0, 1].
    pub fn mix(&self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl FromStr for Rgb {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SceneError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #abc expands to #aabbcc
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!("#3b82f6".parse::<Rgb>().unwrap(), Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!("#3B82F6".parse::<Rgb>().unwrap(), Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["3b82f6", "#3b82f", "#zzzzzz", "", "#", "#+1+2+3"] {
            assert!(
                matches!(bad.parse::<Rgb>(), Err(SceneError::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_and_css() {
        let c = Rgb::new(0x63, 0x66, 0xf1);
        assert_eq!(c.to_string(), "#6366f1");
        assert_eq!(c.css(0.6), "rgba(99, 102, 241, 0.600)");
        assert_eq!(c.css(4.0), "rgba(99, 102, 241, 1.000)");
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Rgb::new(0, 0, 0);
        assert_eq!(a.mix(Rgb::WHITE, 0.0), a);
        assert_eq!(a.mix(Rgb::WHITE, 1.0), Rgb::WHITE);
    }
}

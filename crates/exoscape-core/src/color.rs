//! 8-bit sRGB colour with `#rrggbb` serialisation and simple blending.

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn from_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| ColorParseError(s.to_string()))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation toward `target`; `t` is clamped to [0, 1].
    pub fn lerp(self, target: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| channel(a as f64 + (b as f64 - a as f64) * t);
        Rgb::new(mix(self.r, target.r), mix(self.g, target.g), mix(self.b, target.b))
    }

    /// Multiply every channel by `factor` (saturating).
    pub fn scale(self, factor: f64) -> Rgb {
        let f = factor.max(0.0);
        Rgb::new(
            channel(self.r as f64 * f),
            channel(self.g as f64 * f),
            channel(self.b as f64 * f),
        )
    }

    /// Channels as floats in [0, 1], the layout renderers expect.
    pub fn to_unit_f32(self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }

    /// Rec. 709 relative luminance in [0, 1] (on gamma-encoded values).
    pub fn luminance(self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }

    pub fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::parse_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_hex()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in [0, 1]) to RGB.
pub fn hsl(hue_deg: f64, saturation: f64, lightness: f64) -> Rgb {
    let h = hue_deg.rem_euclid(360.0) / 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    if s == 0.0 {
        let v = channel(l * 255.0);
        return Rgb::new(v, v, v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue_to_rgb = |mut t: f64| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    Rgb::new(
        channel(hue_to_rgb(h + 1.0 / 3.0) * 255.0),
        channel(hue_to_rgb(h) * 255.0),
        channel(hue_to_rgb(h - 1.0 / 3.0) * 255.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let c = Rgb::parse_hex("#cd853f").unwrap();
        assert_eq!(c, Rgb::new(0xcd, 0x85, 0x3f));
        assert_eq!(c.to_hex(), "#cd853f");
        assert_eq!(Rgb::parse_hex("CD853F").unwrap(), c);
    }

    #[test]
    fn malformed_hex_rejected() {
        assert!(Rgb::parse_hex("#abc").is_err());
        assert!(Rgb::parse_hex("#gg0000").is_err());
        assert!(serde_json::from_str::<Rgb>("\"red\"").is_err());
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
    }

    #[test]
    fn scale_darkens_and_saturates() {
        assert_eq!(Rgb::new(100, 200, 50).scale(0.8), Rgb::new(80, 160, 40));
        assert_eq!(Rgb::new(200, 200, 200).scale(2.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(hsl(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
        assert_eq!(hsl(240.0, 0.0, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::from_u32(0x4682b4)).unwrap();
        assert_eq!(json, "\"#4682b4\"");
    }
}

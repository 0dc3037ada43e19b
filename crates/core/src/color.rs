//! Additive RGB color with `f64` channels on the 0–255 scale.
//!
//! Channels are kept unclamped through arithmetic: barycentric weights can
//! drift slightly outside [0, 1] near triangle edges, and clamping there
//! would hide that. Clamping happens once, when a color is quantized to
//! bytes for output (see [`Rgb::channels_u8`]).

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGB color with channels nominally in [0, 255].
///
/// `Default` is opaque black. Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const RED: Rgb = Rgb::new(255.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 255.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 255.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Weighted sum of three colors, channel by channel.
    ///
    /// With barycentric weights this interpolates the vertex colors across
    /// the triangle. The result is not clamped.
    pub fn blend(colors: [Rgb; 3], weights: [f64; 3]) -> Rgb {
        let [c1, c2, c3] = colors;
        let [w1, w2, w3] = weights;
        Rgb {
            r: w1 * c1.r + w2 * c2.r + w3 * c3.r,
            g: w1 * c1.g + w2 * c2.g + w3 * c3.g,
            b: w1 * c1.b + w2 * c2.b + w3 * c3.b,
        }
    }

    /// Quantizes each channel to a byte: truncation toward zero, then
    /// saturation to [0, 255]. Non-finite channels become 0.
    pub fn channels_u8(self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Formats the color as `"#rrggbb"` from the truncated channels.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.channels_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    ///
    /// Returns `EngineError::InvalidColor` if the input is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgb, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(f64::from)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

/// `as` casts from float truncate toward zero and saturate (NaN maps to 0);
/// the explicit clamp keeps that contract visible.
fn quantize(channel: f64) -> u8 {
    channel.clamp(0.0, 255.0) as u8
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

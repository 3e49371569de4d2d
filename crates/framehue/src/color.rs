//! Frame color values.
//!
//! A [`Color`] is the opaque value that identifies a palette entry within a
//! mode. It is stored as the CSS hex string the host understands, and parsed
//! only when a configuration file is loaded or when RGB components are needed.
//!
//! # Example
//!
//! ```rust
//! use framehue::Color;
//!
//! let crimson = Color::from("#B8103D");
//! assert_eq!(crimson.as_rgb(), Some((0xB8, 0x10, 0x3D)));
//! ```

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A color specified by CSS hex string.
///
/// # Examples
///
/// ```rust
/// use framehue::Color;
///
/// let long = Color::from("#ff0000");
/// let short = Color::from("#f00");
/// assert_eq!(long.as_rgb(), short.as_rgb());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(pub String);

impl Color {
    /// Create a new color from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the raw color string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the hex digits into RGB components.
    pub fn as_rgb(&self) -> Option<(u8, u8, u8)> {
        let s = self.0.trim().trim_start_matches('#');
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some((r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some((r, g, b))
        } else {
            None
        }
    }

    /// Returns true if this color is a valid hex value.
    pub fn is_valid(&self) -> bool {
        self.as_rgb().is_some()
    }

    /// Perceived brightness in `0.0..=1.0` using ITU-R BT.601 weights.
    ///
    /// ```rust
    /// use framehue::Color;
    ///
    /// assert!(Color::from("#FFFFFF").luminance().unwrap() > 0.99);
    /// assert_eq!(Color::from("#000000").luminance(), Some(0.0));
    /// ```
    pub fn luminance(&self) -> Option<f64> {
        let (r, g, b) = self.as_rgb()?;
        let weighted = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
        Some(weighted / 255.0)
    }

    /// Returns the canonical `#RRGGBB` form, or `None` for invalid colors.
    ///
    /// Two colors that differ only in case or shorthand share a canonical form,
    /// which is what duplicate detection compares.
    pub fn to_hex(&self) -> Option<String> {
        self.as_rgb()
            .map(|(r, g, b)| format!("#{:02X}{:02X}{:02X}", r, g, b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a hex color string or RGB map")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_color_str(v).map_err(E::custom)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        parse_color_str(&v).map_err(E::custom)
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let mut r: Option<u8> = None;
        let mut g: Option<u8> = None;
        let mut b: Option<u8> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "r" | "red" => r = Some(map.next_value()?),
                "g" | "green" => g = Some(map.next_value()?),
                "b" | "blue" => b = Some(map.next_value()?),
                _ => {
                    let _ = map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        match (r, g, b) {
            (Some(r), Some(g), Some(b)) => Ok(Color::new(format!("#{:02X}{:02X}{:02X}", r, g, b))),
            _ => Err(de::Error::custom("RGB color requires r, g, b fields")),
        }
    }
}

fn parse_color_str(s: &str) -> Result<Color, String> {
    let raw = s.trim();
    if raw.is_empty() {
        return Err("color string is empty".to_string());
    }

    let hex = raw.trim_start_matches('#');
    let is_hex = hex.chars().all(|c| c.is_ascii_hexdigit());
    if !is_hex || !(hex.len() == 3 || hex.len() == 6) {
        return Err(format!("invalid hex color '{raw}'"));
    }

    if raw.starts_with('#') {
        Ok(Color::new(raw))
    } else {
        Ok(Color::new(format!("#{hex}")))
    }
}

//! Foundational color types used throughout hueblock.
//!
//! Color and ColorStop are the building blocks for the hue-strip gradient
//! and the sampled selection state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RGBA color with alpha channel, channels in [0.0, 1.0]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        )
    }

    /// The same color with the alpha channel forced to fully opaque.
    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }

    /// Convert to GTK RGBA
    #[cfg(feature = "gtk")]
    pub fn to_gdk_rgba(&self) -> gdk4::RGBA {
        gdk4::RGBA::new(self.r as f32, self.g as f32, self.b as f32, self.a as f32)
    }

    /// Create from GTK RGBA
    #[cfg(feature = "gtk")]
    pub fn from_gdk_rgba(rgba: &gdk4::RGBA) -> Self {
        Self {
            r: rgba.red() as f64,
            g: rgba.green() as f64,
            b: rgba.blue() as f64,
            a: rgba.alpha() as f64,
        }
    }

    /// Apply to Cairo context
    #[cfg(feature = "gtk")]
    pub fn apply_to_cairo(&self, cr: &cairo::Context) {
        cr.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Formats as a CSS `rgba(r,g,b,a)` string with 8-bit integer channels.
/// A fully opaque alpha prints as `1`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, _) = self.to_rgba8();
        write!(f, "rgba({},{},{},{})", r, g, b, self.a)
    }
}

/// Error parsing a `rgba(r,g,b,a)` color string
#[derive(Debug, Error, PartialEq)]
pub enum ParseColorError {
    #[error("expected `rgba(r,g,b,a)`, got `{0}`")]
    Syntax(String),
    #[error("expected 4 components, got {0}")]
    ComponentCount(usize),
    #[error("invalid channel value `{0}`")]
    Channel(String),
    #[error("invalid alpha value `{0}`")]
    Alpha(String),
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseColorError::Syntax(s.to_string()))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ParseColorError::ComponentCount(parts.len()));
        }

        let channel = |part: &str| {
            part.parse::<u8>()
                .map_err(|_| ParseColorError::Channel(part.to_string()))
        };
        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;

        let a: f64 = parts[3]
            .parse()
            .map_err(|_| ParseColorError::Alpha(parts[3].to_string()))?;
        if !(0.0..=1.0).contains(&a) {
            return Err(ParseColorError::Alpha(parts[3].to_string()));
        }

        Ok(Self {
            a,
            ..Self::from_rgba8(r, g, b, 255)
        })
    }
}

/// Color stop for gradients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ColorStop {
    pub position: f64, // 0.0 to 1.0
    pub color: Color,
}

impl ColorStop {
    pub const fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

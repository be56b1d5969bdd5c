//! RGBA colors and legend color literal parsing.
//!
//! Legend configuration carries colors as string literals in two forms:
//! hex (`#RRGGBB`, `#RRGGBBAA`) and function-call (`rgb(r,g,b)`,
//! `rgba(r,g,b,a)`). Parsing is strict internally (`FromStr` returns a typed
//! error) but the pipeline consumes colors through [`Rgba::parse_lossy`],
//! which degrades a malformed literal to transparent instead of failing the
//! whole legend compile.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A color with byte RGB channels and a float alpha in `[0, 1]`.
///
/// Matches the channel layout of WebGL style expressions, which take colors
/// as `[r, g, b, a]` arrays with 0-255 color channels and a 0-1 alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Fully transparent black, the degraded output for bad literals and the
    /// fallback for unclassified samples.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0.0,
        }
    }

    /// Parse a color literal, degrading to transparent on failure.
    ///
    /// Legend data arrives from config at the edge of the system; a single
    /// bad literal must not halt rendering, so the failure is logged and the
    /// stop renders transparent. Use [`str::parse`] where the distinction
    /// between "parsed transparent" and "failed to parse" matters.
    pub fn parse_lossy(literal: &str) -> Self {
        match literal.parse() {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!(literal = %literal, error = %err, "unparseable color literal, using transparent");
                Self::transparent()
            }
        }
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        match s.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => parse_rgb_call(s),
        }
    }
}

// Serialized as the `[r, g, b, a]` array form used in WebGL style JSON.
impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.r, self.g, self.b, self.a).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (r, g, b, a) = <(u8, u8, u8, f32)>::deserialize(deserializer)?;
        Ok(Self { r, g, b, a })
    }
}

/// Parse the digits of a hex literal (leading `#` already stripped).
///
/// Accepted lengths are 6 (`RRGGBB`, alpha = 1.0) and 8 (`RRGGBBAA`,
/// alpha = AA / 255). Shorthand forms (`#RGB`, `#RGBA`) are rejected rather
/// than expanded.
fn parse_hex(hex: &str) -> Result<Rgba, ColorParseError> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorParseError::BadHexDigit(hex.to_string()));
    }
    let byte = |range: &str| {
        u8::from_str_radix(range, 16).map_err(|_| ColorParseError::BadHexDigit(hex.to_string()))
    };
    match hex.len() {
        6 => Ok(Rgba {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: 1.0,
        }),
        8 => Ok(Rgba {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: byte(&hex[6..8])? as f32 / 255.0,
        }),
        n => Err(ColorParseError::BadHexLength(n)),
    }
}

/// Parse `rgb(r,g,b)` / `rgba(r,g,b,a)`. Color channels are byte integers;
/// alpha is a float in `[0, 1]`, defaulting to 1.0 when absent.
fn parse_rgb_call(s: &str) -> Result<Rgba, ColorParseError> {
    let lower = s.to_ascii_lowercase();
    let body = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ColorParseError::UnrecognizedFormat(s.to_string()))?;

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(ColorParseError::ChannelCount(parts.len()));
    }

    let channel = |part: &str| {
        part.parse::<u8>()
            .map_err(|_| ColorParseError::BadChannel(part.to_string()))
    };
    let alpha = match parts.get(3) {
        Some(part) => part
            .parse::<f32>()
            .map_err(|_| ColorParseError::BadChannel(part.to_string()))?,
        None => 1.0,
    };

    Ok(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: alpha,
    })
}

/// Why a color literal failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color literal")]
    Empty,

    #[error("hex literal has {0} digits, expected 6 or 8")]
    BadHexLength(usize),

    #[error("invalid hex digits in '{0}'")]
    BadHexDigit(String),

    #[error("invalid channel value '{0}'")]
    BadChannel(String),

    #[error("expected 3 or 4 channels, got {0}")]
    ChannelCount(usize),

    #[error("unrecognized color literal '{0}'")]
    UnrecognizedFormat(String),
}

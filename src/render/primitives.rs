use serde::{Deserialize, Serialize};

use crate::core::DomainPoint;
use crate::error::{AnnotationError, AnnotationResult};

/// Opaque RGB color used for drawing overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `#rrggbb` (leading `#` optional).
    pub fn from_hex(value: &str) -> AnnotationResult<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AnnotationError::InvalidData(format!(
                "color `{value}` must be a #rrggbb hex triplet"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| {
                AnnotationError::InvalidData(format!("color `{value}` has invalid channel: {e}"))
            })
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dotted,
    Dashed,
}

/// Creation request for a horizontal price line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLineSpec {
    pub price: f64,
    pub color: Color,
    pub style: LineStyle,
    pub width: f64,
    pub label: String,
}

/// Creation request for an auxiliary line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSeriesSpec {
    pub color: Color,
    pub width: f64,
}

/// One sample fed to a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: i64,
    pub value: f64,
}

impl SeriesPoint {
    #[must_use]
    pub const fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<DomainPoint> for SeriesPoint {
    fn from(point: DomainPoint) -> Self {
        Self::new(point.time, point.price)
    }
}

/// Creation request for a vertical line pinned to a bar time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeLineSpec {
    pub time: i64,
    pub color: Color,
    pub style: LineStyle,
    pub width: f64,
}

/// Creation request for a text note anchored in domain space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabelSpec {
    pub anchor: DomainPoint,
    pub text: String,
    pub color: Color,
}

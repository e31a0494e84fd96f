use serde::{Deserialize, Serialize};

use crate::drawings::OverlayStyle;
use crate::error::{AnnotationError, AnnotationResult};
use crate::render::{Color, LineStyle};
use crate::tools::ToolId;

/// Default color per drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPalette {
    pub horizontal_line: Color,
    pub trend_line: Color,
    pub ray: Color,
    pub rectangle: Color,
    pub fibonacci_retracement: Color,
    pub price_range: Color,
    pub text: Color,
}

impl Default for ToolPalette {
    fn default() -> Self {
        Self {
            horizontal_line: Color::rgb(0x29, 0x62, 0xff),
            trend_line: Color::rgb(0x26, 0xa6, 0x9a),
            ray: Color::rgb(0xff, 0x98, 0x00),
            rectangle: Color::rgb(0x9c, 0x27, 0xb0),
            fibonacci_retracement: Color::rgb(0xf2, 0x36, 0x45),
            price_range: Color::rgb(0x00, 0xbc, 0xd4),
            text: Color::rgb(0xd1, 0xd4, 0xdc),
        }
    }
}

impl ToolPalette {
    /// Palette entry for a drawing tool; navigation modes have none.
    #[must_use]
    pub fn color_for(self, tool: ToolId) -> Option<Color> {
        match tool {
            ToolId::Cursor | ToolId::Crosshair => None,
            ToolId::HorizontalLine => Some(self.horizontal_line),
            ToolId::TrendLine => Some(self.trend_line),
            ToolId::Ray => Some(self.ray),
            ToolId::Rectangle => Some(self.rectangle),
            ToolId::FibonacciRetracement => Some(self.fibonacci_retracement),
            ToolId::PriceRange => Some(self.price_range),
            ToolId::Text => Some(self.text),
        }
    }
}

/// Engine bootstrap configuration.
///
/// Serializable so hosts can keep annotation preferences next to their own
/// chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub price_precision: u8,
    pub palette: ToolPalette,
    pub price_line_style: LineStyle,
    pub fibonacci_line_style: LineStyle,
    pub range_line_style: LineStyle,
    pub line_width: f64,
    pub default_text: String,
    pub shortcuts_enabled: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        let style = OverlayStyle::default();
        Self {
            price_precision: style.price_precision,
            palette: ToolPalette::default(),
            price_line_style: style.price_line_style,
            fibonacci_line_style: style.fibonacci_line_style,
            range_line_style: style.range_line_style,
            line_width: style.line_width,
            default_text: "Text".to_owned(),
            shortcuts_enabled: true,
        }
    }
}

/// Upper bound for label decimals.
pub const MAX_PRICE_PRECISION: u8 = 12;

impl AnnotationConfig {
    pub fn validate(&self) -> AnnotationResult<()> {
        if self.price_precision > MAX_PRICE_PRECISION {
            return Err(AnnotationError::InvalidData(format!(
                "price_precision must be <= {MAX_PRICE_PRECISION}"
            )));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(AnnotationError::InvalidData(
                "line_width must be finite and > 0".to_owned(),
            ));
        }
        if self.default_text.trim().is_empty() {
            return Err(AnnotationError::InvalidData(
                "default_text must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> AnnotationResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            AnnotationError::InvalidData(format!("failed to parse annotation config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> AnnotationResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AnnotationError::InvalidData(format!("failed to serialize annotation config: {e}"))
        })
    }

    #[must_use]
    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            price_precision: self.price_precision,
            line_width: self.line_width,
            price_line_style: self.price_line_style,
            fibonacci_line_style: self.fibonacci_line_style,
            range_line_style: self.range_line_style,
        }
    }
}

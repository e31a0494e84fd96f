//! Static catalogue of annotation tools.

mod registry;

pub use registry::{ToolDescriptor, ToolRegistry, standard_tool_descriptors};

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolId {
    Cursor,
    Crosshair,
    HorizontalLine,
    TrendLine,
    Ray,
    Rectangle,
    FibonacciRetracement,
    PriceRange,
    Text,
}

impl ToolId {
    pub const ALL: [ToolId; 9] = [
        ToolId::Cursor,
        ToolId::Crosshair,
        ToolId::HorizontalLine,
        ToolId::TrendLine,
        ToolId::Ray,
        ToolId::Rectangle,
        ToolId::FibonacciRetracement,
        ToolId::PriceRange,
        ToolId::Text,
    ];

    /// Navigation modes never enter construction.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        !matches!(self, ToolId::Cursor | ToolId::Crosshair)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::Cursor => "cursor",
            ToolId::Crosshair => "crosshair",
            ToolId::HorizontalLine => "horizontalLine",
            ToolId::TrendLine => "trendLine",
            ToolId::Ray => "ray",
            ToolId::Rectangle => "rectangle",
            ToolId::FibonacciRetracement => "fibonacciRetracement",
            ToolId::PriceRange => "priceRange",
            ToolId::Text => "text",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a finalized drawing is turned into surface overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderStrategy {
    /// Navigation mode, nothing is drawn.
    None,
    PriceLine,
    Segment,
    /// Segment plus one extrapolated sample past the second point.
    ExtendedSegment,
    Box,
    FibonacciLevels,
    PriceRange,
    TextLabel,
}

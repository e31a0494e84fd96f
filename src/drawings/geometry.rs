//! Derived price math for multi-level overlays.

use serde::{Deserialize, Serialize};

use crate::core::DomainPoint;
use crate::error::{AnnotationError, AnnotationResult};
use crate::render::SeriesPoint;
use crate::tools::{RenderStrategy, ToolDescriptor, ToolId};

pub const FIBONACCI_LEVELS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Fixed multiple of the anchor time span used to extend a ray.
pub const RAY_EXTENSION_FACTOR: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    pub level: f64,
    pub price: f64,
}

impl FibonacciLevel {
    #[must_use]
    pub fn label(self) -> String {
        format!("{:.1}%", self.level * 100.0)
    }
}

/// Retracement levels measured back from `second` towards `first`.
///
/// Level `0` sits at `second.price`, level `1` at `first.price`.
#[must_use]
pub fn fibonacci_levels(first: DomainPoint, second: DomainPoint) -> [FibonacciLevel; 7] {
    let diff = second.price - first.price;
    FIBONACCI_LEVELS.map(|level| FibonacciLevel {
        level,
        price: second.price - diff * level,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRangeMetrics {
    pub high: f64,
    pub low: f64,
    pub mid: f64,
    pub span: f64,
    pub percent_change: f64,
}

/// High/low/mid and relative span between two prices.
///
/// A non-positive low leaves the percentage undefined and is rejected.
pub fn price_range_metrics(
    first: DomainPoint,
    second: DomainPoint,
) -> AnnotationResult<PriceRangeMetrics> {
    let high = first.price.max(second.price);
    let low = first.price.min(second.price);
    if low <= 0.0 {
        return Err(AnnotationError::DegenerateDrawing {
            tool: ToolId::PriceRange,
            reason: format!("low price {low} leaves the percentage change undefined"),
        });
    }
    let span = high - low;
    let metrics = PriceRangeMetrics {
        high,
        low,
        mid: (high + low) / 2.0,
        span,
        percent_change: span / low * 100.0,
    };
    ensure_finite(ToolId::PriceRange, metrics.percent_change)?;
    Ok(metrics)
}

/// Synthetic third ray sample, `RAY_EXTENSION_FACTOR` spans past `second`.
pub fn ray_extension_point(first: DomainPoint, second: DomainPoint) -> AnnotationResult<SeriesPoint> {
    let dt = second.time - first.time;
    if dt == 0 {
        return Err(AnnotationError::DegenerateDrawing {
            tool: ToolId::Ray,
            reason: "anchor points share the same time".to_owned(),
        });
    }
    let offset = dt
        .checked_mul(RAY_EXTENSION_FACTOR)
        .ok_or_else(|| AnnotationError::DegenerateDrawing {
            tool: ToolId::Ray,
            reason: "extension overflows the time axis".to_owned(),
        })?;
    let time = second
        .time
        .checked_add(offset)
        .ok_or_else(|| AnnotationError::DegenerateDrawing {
            tool: ToolId::Ray,
            reason: "extension overflows the time axis".to_owned(),
        })?;
    let slope = (second.price - first.price) / dt as f64;
    let value = second.price + slope * offset as f64;
    ensure_finite(ToolId::Ray, value)?;
    Ok(SeriesPoint::new(time, value))
}

/// Rejects point sets that cannot produce a well-formed drawing.
pub(crate) fn validate_points(
    descriptor: &ToolDescriptor,
    points: &[DomainPoint],
) -> AnnotationResult<()> {
    let tool = descriptor.id;
    if points.len() != usize::from(descriptor.required_points) {
        return Err(AnnotationError::DegenerateDrawing {
            tool,
            reason: format!(
                "expected {} points, got {}",
                descriptor.required_points,
                points.len()
            ),
        });
    }
    for point in points {
        ensure_finite(tool, point.price)?;
    }
    if let [first, second] = points {
        if descriptor.requires_distinct_times && first.time == second.time {
            return Err(AnnotationError::DegenerateDrawing {
                tool,
                reason: "anchor points share the same time".to_owned(),
            });
        }
        match descriptor.strategy {
            RenderStrategy::ExtendedSegment => {
                ray_extension_point(*first, *second)?;
            }
            RenderStrategy::PriceRange => {
                price_range_metrics(*first, *second)?;
            }
            RenderStrategy::FibonacciLevels => {
                ensure_finite(tool, second.price - first.price)?;
                for level in fibonacci_levels(*first, *second) {
                    ensure_finite(tool, level.price)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn ensure_finite(tool: ToolId, value: f64) -> AnnotationResult<()> {
    if value.is_finite() {
        return Ok(());
    }
    Err(AnnotationError::DegenerateDrawing {
        tool,
        reason: "derived value is not finite".to_owned(),
    })
}

//! Turns finalized drawings into surface overlays and tears them down again.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{DomainPoint, format_price};
use crate::error::{AnnotationError, AnnotationResult};
use crate::render::{
    ChartSurface, Color, LineSeriesSpec, LineStyle, OverlayHandle, OverlayHandles, PriceLineSpec,
    SeriesPoint, TextLabelSpec, TimeLineSpec, release_overlay,
};
use crate::tools::RenderStrategy;

use super::DrawingDraft;
use super::geometry::{fibonacci_levels, price_range_metrics, ray_extension_point};

/// Visual parameters shared by all overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub price_precision: u8,
    pub line_width: f64,
    pub price_line_style: LineStyle,
    pub fibonacci_line_style: LineStyle,
    pub range_line_style: LineStyle,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            price_precision: 2,
            line_width: 2.0,
            price_line_style: LineStyle::Solid,
            fibonacci_line_style: LineStyle::Dashed,
            range_line_style: LineStyle::Dotted,
        }
    }
}

/// Result of rendering one drawing.
///
/// `handles` lists every overlay that was created, including when `error`
/// reports that rendering stopped part way.
#[derive(Debug)]
pub struct OverlayBuild {
    pub handles: OverlayHandles,
    pub error: Option<AnnotationError>,
}

impl OverlayBuild {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of releasing a batch of handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSummary {
    pub released: usize,
    pub failed: usize,
}

impl ReleaseSummary {
    pub fn merge(&mut self, other: ReleaseSummary) {
        self.released += other.released;
        self.failed += other.failed;
    }
}

/// Creates the overlays for `draft` according to `strategy`.
pub fn build_overlays<S>(
    surface: &mut S,
    strategy: RenderStrategy,
    draft: &DrawingDraft,
    style: &OverlayStyle,
) -> OverlayBuild
where
    S: ChartSurface + ?Sized,
{
    let mut builder = OverlayBuilder {
        surface,
        style,
        color: draft.color,
        handles: OverlayHandles::new(),
    };
    let result = builder.render(strategy, draft);
    OverlayBuild {
        handles: builder.handles,
        error: result.err(),
    }
}

/// Releases every handle, swallowing per-handle failures.
pub fn release_overlays<S>(surface: &mut S, handles: &[OverlayHandle]) -> ReleaseSummary
where
    S: ChartSurface + ?Sized,
{
    let mut summary = ReleaseSummary::default();
    for &handle in handles {
        match release_overlay(surface, handle) {
            Ok(()) => summary.released += 1,
            Err(err) => {
                summary.failed += 1;
                warn!(error = %err, ?handle, "ignoring overlay release failure");
            }
        }
    }
    trace!(
        released = summary.released,
        failed = summary.failed,
        "released overlays"
    );
    summary
}

struct OverlayBuilder<'a, S: ChartSurface + ?Sized> {
    surface: &'a mut S,
    style: &'a OverlayStyle,
    color: Color,
    handles: OverlayHandles,
}

impl<S: ChartSurface + ?Sized> OverlayBuilder<'_, S> {
    fn render(&mut self, strategy: RenderStrategy, draft: &DrawingDraft) -> AnnotationResult<()> {
        match (strategy, draft.points.as_slice()) {
            (RenderStrategy::None, _) => Ok(()),
            (RenderStrategy::PriceLine, [point]) => {
                let label = format_price(point.price, self.style.price_precision);
                self.price_line(point.price, self.style.price_line_style, label)
            }
            (RenderStrategy::TextLabel, [point]) => self.text_label(*point, draft.text.as_deref()),
            (RenderStrategy::Segment, [first, second]) => {
                self.segment(&[(*first).into(), (*second).into()])
            }
            (RenderStrategy::ExtendedSegment, [first, second]) => {
                let extension = ray_extension_point(*first, *second)?;
                self.segment(&[(*first).into(), (*second).into(), extension])
            }
            (RenderStrategy::Box, [first, second]) => self.rectangle(*first, *second),
            (RenderStrategy::FibonacciLevels, [first, second]) => {
                for level in fibonacci_levels(*first, *second) {
                    self.price_line(level.price, self.style.fibonacci_line_style, level.label())?;
                }
                Ok(())
            }
            (RenderStrategy::PriceRange, [first, second]) => {
                let metrics = price_range_metrics(*first, *second)?;
                let line_style = self.style.range_line_style;
                self.price_line(metrics.high, line_style, "High".to_owned())?;
                self.price_line(metrics.low, line_style, "Low".to_owned())?;
                let span = format_price(metrics.span, self.style.price_precision);
                let label = format!("{span} ({:.2}%)", metrics.percent_change);
                self.price_line(metrics.mid, line_style, label)
            }
            (strategy, points) => Err(AnnotationError::InvalidData(format!(
                "strategy {strategy:?} cannot render {} points",
                points.len()
            ))),
        }
    }

    fn price_line(&mut self, price: f64, style: LineStyle, label: String) -> AnnotationResult<()> {
        let spec = PriceLineSpec {
            price,
            color: self.color,
            style,
            width: self.style.line_width,
            label,
        };
        let handle = self.surface.create_price_line(&spec)?;
        self.handles.push(handle);
        Ok(())
    }

    /// One line series through `points`, ordered by time for the surface.
    fn segment(&mut self, points: &[SeriesPoint]) -> AnnotationResult<()> {
        let series = self.surface.create_line_series(LineSeriesSpec {
            color: self.color,
            width: self.style.line_width,
        })?;
        self.handles.push(series);
        let mut ordered = points.to_vec();
        ordered.sort_by_key(|point| point.time);
        self.surface.set_series_points(series, &ordered)
    }

    fn rectangle(&mut self, first: DomainPoint, second: DomainPoint) -> AnnotationResult<()> {
        let (left, right) = (first.time.min(second.time), first.time.max(second.time));
        let (low, high) = (first.price.min(second.price), first.price.max(second.price));
        self.segment(&[SeriesPoint::new(left, high), SeriesPoint::new(right, high)])?;
        self.segment(&[SeriesPoint::new(left, low), SeriesPoint::new(right, low)])?;
        for time in [left, right] {
            let handle = self.surface.create_time_line(TimeLineSpec {
                time,
                color: self.color,
                style: self.style.price_line_style,
                width: self.style.line_width,
            })?;
            self.handles.push(handle);
        }
        Ok(())
    }

    fn text_label(&mut self, anchor: DomainPoint, text: Option<&str>) -> AnnotationResult<()> {
        let text = text.filter(|value| !value.is_empty()).ok_or_else(|| {
            AnnotationError::InvalidData("text drawing requires non-empty content".to_owned())
        })?;
        let handle = self.surface.create_text_label(&TextLabelSpec {
            anchor,
            text: text.to_owned(),
            color: self.color,
        })?;
        self.handles.push(handle);
        Ok(())
    }
}

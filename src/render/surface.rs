use crate::core::{PriceTick, Viewport};
use crate::error::{AnnotationError, AnnotationResult};
use crate::render::{
    LineSeriesSpec, OverlayHandle, PriceLineSpec, SeriesPoint, TextLabelSpec, TimeLineSpec,
};

/// Contract implemented by the chart renderer the annotation engine sits on.
///
/// The surface owns the time/price coordinate space and the candle series.
/// Pointer, crosshair, resize and keyboard events are pushed into
/// `AnnotationEngine` by the host in the order the surface emits them.
pub trait ChartSurface {
    /// `false` once the underlying renderer has been destroyed. Dead surfaces
    /// are never called during teardown.
    fn is_alive(&self) -> bool {
        true
    }

    fn inverse_project_price(&self, pixel_y: f64) -> Option<f64>;

    /// Inclusive visible time domain, `None` when no bars are plotted.
    fn time_domain(&self) -> Option<(i64, i64)>;

    fn create_price_line(&mut self, spec: &PriceLineSpec) -> AnnotationResult<OverlayHandle>;
    fn create_line_series(&mut self, spec: LineSeriesSpec) -> AnnotationResult<OverlayHandle>;
    fn set_series_points(
        &mut self,
        series: OverlayHandle,
        points: &[SeriesPoint],
    ) -> AnnotationResult<()>;
    fn create_time_line(&mut self, spec: TimeLineSpec) -> AnnotationResult<OverlayHandle>;
    fn create_text_label(&mut self, spec: &TextLabelSpec) -> AnnotationResult<OverlayHandle>;

    fn remove_price_line(&mut self, handle: OverlayHandle) -> AnnotationResult<()>;
    fn remove_series(&mut self, handle: OverlayHandle) -> AnnotationResult<()>;
    fn remove_time_line(&mut self, handle: OverlayHandle) -> AnnotationResult<()>;
    fn remove_text_label(&mut self, handle: OverlayHandle) -> AnnotationResult<()>;

    fn resize(&mut self, viewport: Viewport) -> AnnotationResult<()>;

    /// Updates the rightmost candle from a live tick.
    fn update_live_bar(&mut self, tick: PriceTick) -> AnnotationResult<()>;
}

/// Dispatches a handle to the matching removal primitive.
pub fn release_overlay<S>(surface: &mut S, handle: OverlayHandle) -> AnnotationResult<()>
where
    S: ChartSurface + ?Sized,
{
    if !surface.is_alive() {
        return Err(AnnotationError::SurfaceDestroyed);
    }
    match handle {
        OverlayHandle::PriceLine(_) => surface.remove_price_line(handle),
        OverlayHandle::Series(_) => surface.remove_series(handle),
        OverlayHandle::TimeLine(_) => surface.remove_time_line(handle),
        OverlayHandle::TextLabel(_) => surface.remove_text_label(handle),
    }
}

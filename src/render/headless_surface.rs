use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::{PointerSample, PriceAxis, PriceTick, Viewport};
use crate::error::{AnnotationError, AnnotationResult};
use crate::render::{
    ChartSurface, LineSeriesSpec, OverlayHandle, PriceLineSpec, SeriesPoint, TextLabelSpec,
    TimeLineSpec,
};

/// Line series created on a `HeadlessSurface`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    pub spec: LineSeriesSpec,
    pub points: Vec<SeriesPoint>,
}

/// In-memory chart surface used by tests and headless hosts.
///
/// It keeps every live overlay so callers can assert exactly what was
/// created and released. Series point updates are validated the way a real
/// renderer would (strictly increasing, finite samples).
#[derive(Debug)]
pub struct HeadlessSurface {
    viewport: Viewport,
    price_axis: PriceAxis,
    bar_times: Vec<i64>,
    next_handle_id: u64,
    price_lines: IndexMap<u64, PriceLineSpec>,
    series: IndexMap<u64, SeriesRecord>,
    time_lines: IndexMap<u64, TimeLineSpec>,
    text_labels: IndexMap<u64, TextLabelSpec>,
    alive: bool,
    remaining_creations: Option<usize>,
    removal_calls: usize,
    last_tick: Option<PriceTick>,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport, price_min: f64, price_max: f64) -> AnnotationResult<Self> {
        Ok(Self {
            viewport: viewport.validate()?,
            price_axis: PriceAxis::new(price_min, price_max)?,
            bar_times: Vec::new(),
            next_handle_id: 1,
            price_lines: IndexMap::new(),
            series: IndexMap::new(),
            time_lines: IndexMap::new(),
            text_labels: IndexMap::new(),
            alive: true,
            remaining_creations: None,
            removal_calls: 0,
            last_tick: None,
        })
    }

    /// Sets the plotted bar times. Input is sorted and deduplicated.
    #[must_use]
    pub fn with_bar_times(mut self, mut bar_times: Vec<i64>) -> Self {
        bar_times.sort_unstable();
        bar_times.dedup();
        self.bar_times = bar_times;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Time-axis hit-test: snaps a horizontal pixel to the nearest bar time.
    #[must_use]
    pub fn time_at_pixel(&self, pixel_x: f64) -> Option<i64> {
        let (&first, &last) = (self.bar_times.first()?, self.bar_times.last()?);
        let width = f64::from(self.viewport.width);
        if !pixel_x.is_finite() || !(0.0..=width).contains(&pixel_x) {
            return None;
        }
        let span = last as f64 - first as f64;
        let target = first as f64 + (pixel_x / width) * span;
        self.bar_times
            .iter()
            .copied()
            .min_by_key(|time| OrderedFloat((*time as f64 - target).abs()))
    }

    /// Builds the pointer payload a renderer would attach to a click at `(x, y)`.
    #[must_use]
    pub fn pointer_sample(&self, pixel_x: f64, pixel_y: f64) -> PointerSample {
        PointerSample::new(pixel_y, self.time_at_pixel(pixel_x))
    }

    pub fn price_to_pixel(&self, price: f64) -> AnnotationResult<f64> {
        self.price_axis.price_to_pixel(price, self.viewport)
    }

    /// Marks the surface as destroyed; every later call fails.
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    /// Lets the next `count` creations succeed, then fails every creation.
    pub fn fail_creations_after(&mut self, count: usize) {
        self.remaining_creations = Some(count);
    }

    pub fn price_lines(&self) -> impl Iterator<Item = &PriceLineSpec> {
        self.price_lines.values()
    }

    pub fn series(&self) -> impl Iterator<Item = &SeriesRecord> {
        self.series.values()
    }

    pub fn time_lines(&self) -> impl Iterator<Item = &TimeLineSpec> {
        self.time_lines.values()
    }

    pub fn text_labels(&self) -> impl Iterator<Item = &TextLabelSpec> {
        self.text_labels.values()
    }

    #[must_use]
    pub fn live_overlay_count(&self) -> usize {
        self.price_lines.len() + self.series.len() + self.time_lines.len() + self.text_labels.len()
    }

    /// Number of removal calls received, successful or not.
    #[must_use]
    pub fn removal_calls(&self) -> usize {
        self.removal_calls
    }

    #[must_use]
    pub fn last_tick(&self) -> Option<PriceTick> {
        self.last_tick
    }

    fn ensure_alive(&self) -> AnnotationResult<()> {
        if self.alive {
            Ok(())
        } else {
            Err(AnnotationError::SurfaceDestroyed)
        }
    }

    fn allocate_id(&mut self) -> AnnotationResult<u64> {
        self.ensure_alive()?;
        if let Some(remaining) = self.remaining_creations.as_mut() {
            if *remaining == 0 {
                return Err(AnnotationError::InvalidData(
                    "surface refused to create overlay".to_owned(),
                ));
            }
            *remaining -= 1;
        }
        let id = self.next_handle_id;
        self.next_handle_id += 1;
        Ok(id)
    }

    fn begin_removal(&mut self) -> AnnotationResult<()> {
        self.removal_calls += 1;
        self.ensure_alive()
    }
}

fn validate_finite(value: f64, name: &str) -> AnnotationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnnotationError::InvalidData(format!("{name} must be finite")))
    }
}

fn validate_width(width: f64) -> AnnotationResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(AnnotationError::InvalidData(
            "line width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

impl ChartSurface for HeadlessSurface {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn inverse_project_price(&self, pixel_y: f64) -> Option<f64> {
        if !self.alive {
            return None;
        }
        self.price_axis.pixel_to_price(pixel_y, self.viewport)
    }

    fn time_domain(&self) -> Option<(i64, i64)> {
        if !self.alive {
            return None;
        }
        Some((*self.bar_times.first()?, *self.bar_times.last()?))
    }

    fn create_price_line(&mut self, spec: &PriceLineSpec) -> AnnotationResult<OverlayHandle> {
        validate_finite(spec.price, "price line price")?;
        validate_width(spec.width)?;
        let id = self.allocate_id()?;
        self.price_lines.insert(id, spec.clone());
        Ok(OverlayHandle::PriceLine(id))
    }

    fn create_line_series(&mut self, spec: LineSeriesSpec) -> AnnotationResult<OverlayHandle> {
        validate_width(spec.width)?;
        let id = self.allocate_id()?;
        self.series.insert(
            id,
            SeriesRecord {
                spec,
                points: Vec::new(),
            },
        );
        Ok(OverlayHandle::Series(id))
    }

    fn set_series_points(
        &mut self,
        series: OverlayHandle,
        points: &[SeriesPoint],
    ) -> AnnotationResult<()> {
        self.ensure_alive()?;
        let OverlayHandle::Series(id) = series else {
            return Err(AnnotationError::UnknownHandle(series));
        };
        for point in points {
            validate_finite(point.value, "series value")?;
        }
        if points.windows(2).any(|pair| pair[0].time >= pair[1].time) {
            return Err(AnnotationError::InvalidData(
                "series points must have strictly increasing time".to_owned(),
            ));
        }
        let record = self
            .series
            .get_mut(&id)
            .ok_or(AnnotationError::UnknownHandle(series))?;
        record.points = points.to_vec();
        Ok(())
    }

    fn create_time_line(&mut self, spec: TimeLineSpec) -> AnnotationResult<OverlayHandle> {
        validate_width(spec.width)?;
        let id = self.allocate_id()?;
        self.time_lines.insert(id, spec);
        Ok(OverlayHandle::TimeLine(id))
    }

    fn create_text_label(&mut self, spec: &TextLabelSpec) -> AnnotationResult<OverlayHandle> {
        validate_finite(spec.anchor.price, "text anchor price")?;
        if spec.text.is_empty() {
            return Err(AnnotationError::InvalidData(
                "text label must not be empty".to_owned(),
            ));
        }
        let id = self.allocate_id()?;
        self.text_labels.insert(id, spec.clone());
        Ok(OverlayHandle::TextLabel(id))
    }

    fn remove_price_line(&mut self, handle: OverlayHandle) -> AnnotationResult<()> {
        self.begin_removal()?;
        self.price_lines
            .shift_remove(&handle.raw_id())
            .map(|_| ())
            .ok_or(AnnotationError::UnknownHandle(handle))
    }

    fn remove_series(&mut self, handle: OverlayHandle) -> AnnotationResult<()> {
        self.begin_removal()?;
        self.series
            .shift_remove(&handle.raw_id())
            .map(|_| ())
            .ok_or(AnnotationError::UnknownHandle(handle))
    }

    fn remove_time_line(&mut self, handle: OverlayHandle) -> AnnotationResult<()> {
        self.begin_removal()?;
        self.time_lines
            .shift_remove(&handle.raw_id())
            .map(|_| ())
            .ok_or(AnnotationError::UnknownHandle(handle))
    }

    fn remove_text_label(&mut self, handle: OverlayHandle) -> AnnotationResult<()> {
        self.begin_removal()?;
        self.text_labels
            .shift_remove(&handle.raw_id())
            .map(|_| ())
            .ok_or(AnnotationError::UnknownHandle(handle))
    }

    fn resize(&mut self, viewport: Viewport) -> AnnotationResult<()> {
        self.ensure_alive()?;
        self.viewport = viewport.validate()?;
        Ok(())
    }

    fn update_live_bar(&mut self, tick: PriceTick) -> AnnotationResult<()> {
        self.ensure_alive()?;
        let tick = tick.validate()?;
        match self.bar_times.last() {
            Some(&last) if tick.time > last => self.bar_times.push(tick.time),
            Some(&last) if tick.time < last => {
                return Err(AnnotationError::InvalidData(
                    "live tick is older than the last bar".to_owned(),
                ));
            }
            Some(_) => {}
            None => self.bar_times.push(tick.time),
        }
        self.last_tick = Some(tick);
        Ok(())
    }
}

use chart_annotations::api::{AnnotationConfig, AnnotationEngine, TeardownReport};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use chart_annotations::AnnotationResult;
use chart_annotations::core::{PointerSample, PriceTick, Viewport};
use chart_annotations::interaction::{InputChannel, ToolState};
use chart_annotations::render::{
    ChartSurface, HeadlessSurface, LineSeriesSpec, OverlayHandle, PriceLineSpec, SeriesPoint,
    TextLabelSpec, TimeLineSpec,
};
use chart_annotations::tools::{ToolId, ToolRegistry};

/// Renderer that cannot report its own destruction.
struct NoLivenessSurface(HeadlessSurface);

impl ChartSurface for NoLivenessSurface {
    fn inverse_project_price(&self, pixel_y: f64) -> Option<f64> {
        self.0.inverse_project_price(pixel_y)
    }

    fn time_domain(&self) -> Option<(i64, i64)> {
        self.0.time_domain()
    }

    fn create_price_line(&mut self, spec: &PriceLineSpec) -> AnnotationResult<OverlayHandle> {
        self.0.create_price_line(spec)
    }

    fn create_line_series(&mut self, spec: LineSeriesSpec) -> AnnotationResult<OverlayHandle> {
        self.0.create_line_series(spec)
    }

    fn set_series_points(
        &mut self,
        series: OverlayHandle,
        points: &[SeriesPoint],
    ) -> AnnotationResult<()> {
        self.0.set_series_points(series, points)
    }

    fn create_time_line(&mut self, spec: TimeLineSpec) -> AnnotationResult<OverlayHandle> {
        self.0.create_time_line(spec)
    }

    fn create_text_label(&mut self, spec: &TextLabelSpec) -> AnnotationResult<OverlayHandle> {
        self.0.create_text_label(spec)
    }

    fn remove_price_line(&mut self, handle: OverlayHandle) -> AnnotationResult<()> {
        self.0.remove_price_line(handle)
    }

    fn remove_series(&mut self, handle: OverlayHandle) -> AnnotationResult<()> {
        self.0.remove_series(handle)
    }

    fn remove_time_line(&mut self, handle: OverlayHandle) -> AnnotationResult<()> {
        self.0.remove_time_line(handle)
    }

    fn remove_text_label(&mut self, handle: OverlayHandle) -> AnnotationResult<()> {
        self.0.remove_text_label(handle)
    }

    fn resize(&mut self, viewport: Viewport) -> AnnotationResult<()> {
        self.0.resize(viewport)
    }

    fn update_live_bar(&mut self, tick: PriceTick) -> AnnotationResult<()> {
        self.0.update_live_bar(tick)
    }
}

fn surface() -> HeadlessSurface {
    HeadlessSurface::new(Viewport::new(1000, 500), 0.0, 500.0)
        .expect("surface")
        .with_bar_times((0..=100).map(|i| i * 10).collect())
}

fn engine() -> AnnotationEngine<HeadlessSurface> {
    AnnotationEngine::with_surface(
        surface(),
        ToolRegistry::standard().expect("registry"),
        AnnotationConfig::default(),
    )
    .expect("engine init")
}

fn click(engine: &mut AnnotationEngine<HeadlessSurface>, time: i64, price: f64) {
    engine.pointer_click(PointerSample::new(500.0 - price, Some(time)));
}

fn populate(engine: &mut AnnotationEngine<HeadlessSurface>) {
    engine.select_tool(ToolId::HorizontalLine).expect("select");
    click(engine, 100, 100.0);
    engine.select_tool(ToolId::FibonacciRetracement).expect("select");
    click(engine, 100, 100.0);
    click(engine, 200, 200.0);
}

#[test]
fn replacing_surface_releases_every_handle_on_the_old_one() {
    let mut engine = engine();
    populate(&mut engine);
    assert_eq!(engine.drawings().overlay_count(), 8);

    let (old, report) = engine.replace_surface(surface());
    let old = old.expect("previous surface");
    assert_eq!(old.live_overlay_count(), 0);
    assert_eq!(old.removal_calls(), 8);
    assert_eq!(
        report,
        TeardownReport {
            drawings_discarded: 2,
            handles_released: 8,
            handles_failed: 0,
            handles_dropped: 0,
            construction_cancelled: false,
        }
    );

    assert!(engine.drawings().is_empty());
    assert_eq!(engine.surface().expect("new surface").live_overlay_count(), 0);
    assert!(engine.input().is_bound(InputChannel::Click));
}

#[test]
fn replacement_cancels_pending_construction_but_keeps_tool() {
    let mut engine = engine();
    engine.select_tool(ToolId::TrendLine).expect("select");
    click(&mut engine, 100, 100.0);

    let (_, report) = engine.replace_surface(surface());
    assert!(report.construction_cancelled);
    assert_eq!(engine.tool_state(), ToolState::Idle { tool: ToolId::TrendLine });

    click(&mut engine, 200, 150.0);
    assert!(engine.drawings().is_empty());
    assert!(engine.construction().is_some());
}

#[test]
fn removed_drawings_are_not_released_twice_on_teardown() {
    let mut engine = engine();
    populate(&mut engine);
    engine.delete_last();
    assert_eq!(engine.surface().expect("surface").removal_calls(), 7);

    let (old, report) = engine.teardown();
    let old = old.expect("surface");
    assert_eq!(report.handles_released, 1);
    assert_eq!(old.removal_calls(), 8);
    assert_eq!(old.live_overlay_count(), 0);
}

#[test]
fn stale_handle_errors_are_swallowed_during_teardown() {
    let mut engine = AnnotationEngine::with_surface(
        NoLivenessSurface(surface()),
        ToolRegistry::standard().expect("registry"),
        AnnotationConfig::default(),
    )
    .expect("engine init");
    engine.select_tool(ToolId::FibonacciRetracement).expect("select");
    engine.pointer_click(PointerSample::new(400.0, Some(100)));
    engine.pointer_click(PointerSample::new(300.0, Some(200)));
    assert_eq!(engine.drawings().overlay_count(), 7);

    engine.surface_mut().expect("surface").0.destroy();
    let (old, report) = engine.teardown();
    assert_eq!(report.drawings_discarded, 1);
    assert_eq!(report.handles_released, 0);
    assert_eq!(report.handles_failed, 7);
    assert_eq!(old.expect("surface").0.removal_calls(), 7);
}

#[test]
fn dead_surface_is_never_called_during_teardown() {
    let mut engine = engine();
    populate(&mut engine);
    engine.surface_mut().expect("surface").destroy();

    let (old, report) = engine.teardown();
    assert_eq!(report.handles_dropped, 8);
    assert_eq!(report.handles_released, 0);
    assert_eq!(old.expect("surface").removal_calls(), 0);
}

#[test]
fn surface_destroyed_notification_forgets_overlays() {
    let mut engine = engine();
    populate(&mut engine);

    let report = engine.surface_destroyed();
    assert_eq!(report.drawings_discarded, 2);
    assert_eq!(report.handles_dropped, 8);
    assert!(engine.surface().is_none());
    assert!(!engine.input().is_bound(InputChannel::Keyboard));
}

#[test]
fn drawings_are_not_restored_on_new_surface() {
    let mut engine = engine();
    populate(&mut engine);
    engine.attach_surface(surface());
    assert!(engine.drawings().is_empty());
    assert_eq!(engine.surface().expect("surface").live_overlay_count(), 0);
}

#[test]
fn price_ticks_never_touch_drawings_or_construction() {
    let mut engine = engine();
    engine.select_tool(ToolId::HorizontalLine).expect("select");
    click(&mut engine, 100, 100.0);
    engine.select_tool(ToolId::Ray).expect("select");
    click(&mut engine, 100, 100.0);
    let before = engine.snapshot();

    engine
        .apply_price_tick(PriceTick::new(1_000, 101.5))
        .expect("tick on last bar");
    engine
        .apply_price_tick(PriceTick::new(1_010, 102.0))
        .expect("tick opens new bar");

    assert_eq!(engine.snapshot(), before);
    let surface = engine.surface().expect("surface");
    assert_eq!(surface.last_tick(), Some(PriceTick::new(1_010, 102.0)));
    assert_eq!(surface.time_at_pixel(1000.0), Some(1_010));
}

#[test]
fn decimal_feed_ticks_open_new_bars() {
    let mut engine = engine();
    let time = Utc.timestamp_opt(1_020, 0).single().expect("valid time");
    let tick = PriceTick::from_decimal_time(time, Decimal::new(10_225, 2)).expect("decimal tick");
    engine.apply_price_tick(tick).expect("tick applied");

    let last = engine
        .surface()
        .expect("surface")
        .last_tick()
        .expect("tick recorded");
    assert_eq!(last.time, 1_020);
    assert!((last.price - 102.25).abs() <= 1e-9);

    let stale = Utc.timestamp_opt(900, 0).single().expect("valid time");
    let tick = PriceTick::from_decimal_time(stale, Decimal::ONE).expect("decimal tick");
    assert!(engine.apply_price_tick(tick).is_err());
}

#[test]
fn invalid_ticks_are_rejected() {
    let mut engine = engine();
    let err = engine
        .apply_price_tick(PriceTick::new(1_000, f64::NAN))
        .expect_err("nan tick must fail");
    assert!(format!("{err}").contains("tick price"));

    let err = engine
        .apply_price_tick(PriceTick::new(5, 10.0))
        .expect_err("stale tick must fail");
    assert!(format!("{err}").contains("older"));
}

#[test]
fn resize_is_forwarded_without_recreating_drawings() {
    let mut engine = engine();
    populate(&mut engine);
    engine.resize(Viewport::new(640, 320)).expect("resize");

    let surface = engine.surface().expect("surface");
    assert_eq!(surface.viewport(), Viewport::new(640, 320));
    assert_eq!(surface.live_overlay_count(), 8);
    assert_eq!(surface.removal_calls(), 0);

    let err = engine.resize(Viewport::new(0, 320)).expect_err("empty viewport");
    assert!(format!("{err}").contains("invalid viewport"));
}

#[test]
fn into_surface_releases_overlays() {
    let mut engine = engine();
    populate(&mut engine);
    let surface = engine.into_surface().expect("surface");
    assert_eq!(surface.live_overlay_count(), 0);
}

use chart_annotations::api::{AnnotationConfig, AnnotationEngine};
use chart_annotations::core::{DomainPoint, PointerSample, Viewport};
use chart_annotations::drawings::DrawingId;
use chart_annotations::interaction::{ConstructionState, ToolState};
use chart_annotations::render::HeadlessSurface;
use chart_annotations::tools::{ToolId, ToolRegistry};

/// Price axis 0..500 over 500px, bars every 10s from 0 to 1000.
fn engine() -> AnnotationEngine<HeadlessSurface> {
    let surface = HeadlessSurface::new(Viewport::new(1000, 500), 0.0, 500.0)
        .expect("surface")
        .with_bar_times((0..=100).map(|i| i * 10).collect());
    AnnotationEngine::with_surface(
        surface,
        ToolRegistry::standard().expect("registry"),
        AnnotationConfig::default(),
    )
    .expect("engine init")
}

fn click(engine: &mut AnnotationEngine<HeadlessSurface>, time: i64, price: f64) -> Option<DrawingId> {
    engine.pointer_click(PointerSample::new(500.0 - price, Some(time)))
}

const SINGLE_POINT_TOOLS: [ToolId; 2] = [ToolId::HorizontalLine, ToolId::Text];
const TWO_POINT_TOOLS: [ToolId; 5] = [
    ToolId::TrendLine,
    ToolId::Ray,
    ToolId::Rectangle,
    ToolId::FibonacciRetracement,
    ToolId::PriceRange,
];

#[test]
fn engine_starts_idle_on_cursor() {
    let engine = engine();
    assert_eq!(engine.tool_state(), ToolState::Idle { tool: ToolId::Cursor });
    assert!(engine.drawings().is_empty());
}

#[test]
fn navigation_modes_ignore_clicks() {
    let mut engine = engine();
    for tool in [ToolId::Cursor, ToolId::Crosshair] {
        engine.select_tool(tool).expect("select");
        assert_eq!(click(&mut engine, 100, 100.0), None);
        assert_eq!(engine.construction(), None);
    }
    assert!(engine.drawings().is_empty());
}

#[test]
fn single_point_tools_finalize_on_one_click_and_stay_active() {
    for tool in SINGLE_POINT_TOOLS {
        let mut engine = engine();
        engine.select_tool(tool).expect("select");

        let id = click(&mut engine, 100, 100.0).expect("drawing");
        let drawing = engine.drawings().get(id).expect("stored");
        assert_eq!(drawing.tool(), tool);
        assert_eq!(drawing.points(), &[DomainPoint::new(100, 100.0)]);
        assert_eq!(engine.tool_state(), ToolState::Idle { tool });

        click(&mut engine, 200, 150.0).expect("repeat placement");
        assert_eq!(engine.drawings().len(), 2);
    }
}

#[test]
fn two_point_tools_need_two_clicks() {
    for tool in TWO_POINT_TOOLS {
        let mut engine = engine();
        engine.select_tool(tool).expect("select");

        assert_eq!(click(&mut engine, 100, 100.0), None);
        assert!(engine.drawings().is_empty());
        assert_eq!(
            engine.construction(),
            Some(ConstructionState {
                tool,
                anchor: DomainPoint::new(100, 100.0),
            })
        );

        let id = click(&mut engine, 200, 150.0).expect("second click finalizes");
        let drawing = engine.drawings().get(id).expect("stored");
        assert_eq!(
            drawing.points(),
            &[DomainPoint::new(100, 100.0), DomainPoint::new(200, 150.0)]
        );
        assert_eq!(engine.tool_state(), ToolState::Idle { tool });
        assert_eq!(engine.drawings().len(), 1);
    }
}

#[test]
fn tool_switch_before_second_click_discards_construction() {
    let mut engine = engine();
    engine.select_tool(ToolId::TrendLine).expect("select");
    click(&mut engine, 0, 10.0);
    engine.select_tool(ToolId::HorizontalLine).expect("switch");

    assert!(engine.drawings().is_empty());
    assert_eq!(engine.active_tool(), ToolId::HorizontalLine);
    assert_eq!(engine.construction(), None);
}

#[test]
fn escape_discards_construction_and_returns_to_cursor() {
    let mut engine = engine();
    engine.select_tool(ToolId::FibonacciRetracement).expect("select");
    click(&mut engine, 100, 100.0);
    engine.escape();

    assert_eq!(engine.tool_state(), ToolState::Idle { tool: ToolId::Cursor });
    assert_eq!(click(&mut engine, 200, 200.0), None);
    assert!(engine.drawings().is_empty());
}

#[test]
fn out_of_domain_second_click_aborts_without_fallback() {
    let mut engine = engine();
    engine.select_tool(ToolId::TrendLine).expect("select");
    click(&mut engine, 100, 100.0);

    assert_eq!(engine.pointer_click(PointerSample::new(250.0, None)), None);
    assert_eq!(engine.tool_state(), ToolState::Idle { tool: ToolId::TrendLine });
    assert!(engine.drawings().is_empty());

    click(&mut engine, 100, 100.0);
    assert_eq!(engine.pointer_click(PointerSample::new(-20.0, Some(200))), None);
    assert_eq!(engine.construction(), None);

    click(&mut engine, 100, 100.0);
    assert_eq!(engine.pointer_click(PointerSample::new(250.0, Some(5_000))), None);
    assert_eq!(engine.construction(), None);
    assert_eq!(engine.surface().expect("surface").live_overlay_count(), 0);
}

#[test]
fn identical_times_are_rejected_for_slope_tools() {
    for tool in [ToolId::Ray, ToolId::TrendLine, ToolId::FibonacciRetracement, ToolId::Rectangle] {
        let mut engine = engine();
        engine.select_tool(tool).expect("select");
        click(&mut engine, 300, 100.0);
        assert_eq!(click(&mut engine, 300, 200.0), None, "{tool} must reject");
        assert!(engine.drawings().is_empty());
        assert_eq!(engine.tool_state(), ToolState::Idle { tool });
        assert_eq!(engine.surface().expect("surface").live_overlay_count(), 0);
    }
}

#[test]
fn price_range_accepts_identical_times_but_not_zero_low() {
    let mut engine = engine();
    engine.select_tool(ToolId::PriceRange).expect("select");
    click(&mut engine, 300, 100.0);
    assert!(click(&mut engine, 300, 150.0).is_some());

    click(&mut engine, 300, 0.0);
    assert_eq!(click(&mut engine, 400, 150.0), None);
    assert_eq!(engine.drawings().len(), 1);
}

#[test]
fn delete_last_removes_in_lifo_order() {
    let mut engine = engine();
    engine.select_tool(ToolId::HorizontalLine).expect("select");
    let first = click(&mut engine, 100, 100.0).expect("first");
    let second = click(&mut engine, 200, 200.0).expect("second");

    assert_eq!(engine.delete_last(), Some(second));
    assert_eq!(engine.delete_last(), Some(first));
    assert_eq!(engine.delete_last(), None);
    assert_eq!(engine.surface().expect("surface").live_overlay_count(), 0);
}

#[test]
fn delete_last_on_empty_store_changes_nothing() {
    let mut engine = engine();
    engine.select_tool(ToolId::Ray).expect("select");
    click(&mut engine, 100, 100.0);
    let before = engine.snapshot();

    assert_eq!(engine.delete_last(), None);
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.surface().expect("surface").removal_calls(), 0);
}

#[test]
fn drawing_ids_follow_creation_order() {
    let mut engine = engine();
    engine.select_tool(ToolId::HorizontalLine).expect("select");
    let ids: Vec<DrawingId> = (1..=3)
        .map(|i| click(&mut engine, i * 100, 50.0).expect("drawing"))
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(ids[0].to_string(), "drawing-1");

    assert!(engine.remove_drawing(ids[1]));
    assert!(!engine.remove_drawing(ids[1]));
    let remaining: Vec<DrawingId> = engine.drawings().iter().map(|d| d.id()).collect();
    assert_eq!(remaining, vec![ids[0], ids[2]]);
}

#[test]
fn active_color_and_text_content_apply_to_new_drawings() {
    let mut engine = engine();
    let palette = engine.config().palette;
    engine.select_tool(ToolId::Text).expect("select");

    let default_text = click(&mut engine, 100, 100.0).expect("text");
    let color = chart_annotations::render::Color::rgb(1, 2, 3);
    engine.set_active_color(Some(color));
    engine.set_text_content(Some("breakout".to_owned()));
    let custom_text = click(&mut engine, 200, 100.0).expect("text");

    let drawings = engine.drawings();
    let default_text = drawings.get(default_text).expect("stored");
    assert_eq!(default_text.text(), Some("Text"));
    assert_eq!(default_text.color(), palette.text);
    let custom_text = drawings.get(custom_text).expect("stored");
    assert_eq!(custom_text.text(), Some("breakout"));
    assert_eq!(custom_text.color(), color);

    engine.set_text_content(Some(String::new()));
    assert_eq!(click(&mut engine, 300, 100.0), None);
}

#[test]
fn detached_engine_ignores_clicks() {
    let mut engine: AnnotationEngine<HeadlessSurface> = AnnotationEngine::new(
        ToolRegistry::standard().expect("registry"),
        AnnotationConfig::default(),
    )
    .expect("engine init");
    engine.select_tool(ToolId::HorizontalLine).expect("select");
    assert_eq!(click(&mut engine, 100, 100.0), None);
    assert!(engine.drawings().is_empty());
}

use chart_annotations::api::{AnnotationConfig, AnnotationEngine};
use chart_annotations::core::{DomainPoint, PointerSample, Viewport};
use chart_annotations::drawings::{fibonacci_levels, price_range_metrics, ray_extension_point};
use chart_annotations::render::HeadlessSurface;
use chart_annotations::tools::{ToolId, ToolRegistry};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_overlay_math(c: &mut Criterion) {
    let first = DomainPoint::new(1_700_000_000, 101.25);
    let second = DomainPoint::new(1_700_003_600, 187.5);

    c.bench_function("fibonacci_levels", |b| {
        b.iter(|| fibonacci_levels(black_box(first), black_box(second)))
    });
    c.bench_function("ray_extension_point", |b| {
        b.iter(|| ray_extension_point(black_box(first), black_box(second)).expect("ray"))
    });
    c.bench_function("price_range_metrics", |b| {
        b.iter(|| price_range_metrics(black_box(first), black_box(second)).expect("range"))
    });
}

fn bench_place_and_clear_1k_drawings(c: &mut Criterion) {
    let registry = ToolRegistry::standard().expect("registry");
    let tools = [
        ToolId::HorizontalLine,
        ToolId::TrendLine,
        ToolId::Ray,
        ToolId::Rectangle,
        ToolId::FibonacciRetracement,
        ToolId::PriceRange,
        ToolId::Text,
    ];

    c.bench_function("place_and_clear_1k_drawings", |b| {
        b.iter(|| {
            let surface = HeadlessSurface::new(Viewport::new(1920, 1080), 0.0, 1_080.0)
                .expect("surface")
                .with_bar_times((0..=1_000).collect());
            let mut engine = AnnotationEngine::with_surface(
                surface,
                registry.clone(),
                AnnotationConfig::default(),
            )
            .expect("engine init");
            for i in 0..1_000_i64 {
                engine
                    .select_tool(tools[i as usize % tools.len()])
                    .expect("select");
                engine.pointer_click(PointerSample::new(200.0 + (i % 300) as f64, Some(i % 900)));
                engine.pointer_click(PointerSample::new(700.0 - (i % 300) as f64, Some(i % 900 + 50)));
            }
            black_box(engine.clear_drawings())
        })
    });
}

criterion_group!(benches, bench_overlay_math, bench_place_and_clear_1k_drawings);
criterion_main!(benches);

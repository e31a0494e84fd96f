mod drawing;
pub mod geometry;
mod overlay;
mod store;

pub use drawing::{Drawing, DrawingDraft, DrawingId, DrawingPoints};
pub use geometry::{
    FIBONACCI_LEVELS, FibonacciLevel, PriceRangeMetrics, RAY_EXTENSION_FACTOR, fibonacci_levels,
    price_range_metrics, ray_extension_point,
};
pub use overlay::{OverlayBuild, OverlayStyle, ReleaseSummary, build_overlays, release_overlays};
pub use store::DrawingStore;

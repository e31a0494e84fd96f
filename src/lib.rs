//! chart-annotations: interactive drawing engine for time-series price charts.
//!
//! The crate sits above a chart renderer (`render::ChartSurface`) and turns
//! pointer and keyboard input into persistent overlays: horizontal lines,
//! trend lines, rays, rectangles, Fibonacci retracements, price ranges and
//! text notes. Rendering internals stay behind the surface trait.

pub mod api;
pub mod core;
pub mod drawings;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;
pub mod tools;

pub use api::{AnnotationConfig, AnnotationEngine};
pub use error::{AnnotationError, AnnotationResult};

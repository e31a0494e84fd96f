//! Public facade: engine, configuration, lifecycle and snapshots.

mod config;
mod drawing_controller;
mod engine;
mod input_dispatch;
mod lifecycle;
mod snapshot;

pub use config::{AnnotationConfig, MAX_PRICE_PRECISION, ToolPalette};
pub use engine::AnnotationEngine;
pub use lifecycle::TeardownReport;
pub use snapshot::{
    ANNOTATION_SNAPSHOT_JSON_SCHEMA_V1, AnnotationSnapshot, AnnotationSnapshotJsonContractV1,
    DrawingSnapshot,
};

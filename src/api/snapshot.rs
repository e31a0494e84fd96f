use serde::{Deserialize, Serialize};

use crate::core::DomainPoint;
use crate::drawings::{Drawing, DrawingId};
use crate::error::{AnnotationError, AnnotationResult};
use crate::render::{ChartSurface, Color};
use crate::tools::ToolId;

use super::AnnotationEngine;

pub const ANNOTATION_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingSnapshot {
    pub id: DrawingId,
    pub tool: ToolId,
    pub color: Color,
    pub points: Vec<DomainPoint>,
    pub text: Option<String>,
    pub overlay_count: usize,
}

impl From<&Drawing> for DrawingSnapshot {
    fn from(drawing: &Drawing) -> Self {
        Self {
            id: drawing.id(),
            tool: drawing.tool(),
            color: drawing.color(),
            points: drawing.points().to_vec(),
            text: drawing.text().map(str::to_owned),
            overlay_count: drawing.overlays().len(),
        }
    }
}

/// Serializable engine state used by regression tests and debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSnapshot {
    pub active_tool: ToolId,
    pub pending_anchor: Option<DomainPoint>,
    pub surface_attached: bool,
    pub cursor: Option<DomainPoint>,
    pub drawings: Vec<DrawingSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: AnnotationSnapshot,
}

impl AnnotationSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> AnnotationResult<String> {
        let payload = AnnotationSnapshotJsonContractV1 {
            schema_version: ANNOTATION_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AnnotationError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> AnnotationResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<AnnotationSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: AnnotationSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                AnnotationError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != ANNOTATION_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(AnnotationError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<S: ChartSurface> AnnotationEngine<S> {
    #[must_use]
    pub fn snapshot(&self) -> AnnotationSnapshot {
        AnnotationSnapshot {
            active_tool: self.machine.active_tool(),
            pending_anchor: self.machine.construction().map(|c| c.anchor),
            surface_attached: self.surface.is_some(),
            cursor: self.cursor,
            drawings: self.store.iter().map(DrawingSnapshot::from).collect(),
        }
    }
}

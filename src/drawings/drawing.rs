use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::DomainPoint;
use crate::render::{Color, OverlayHandles};
use crate::tools::ToolId;

/// Points of one drawing: one for single-click tools, two otherwise.
pub type DrawingPoints = SmallVec<[DomainPoint; 2]>;

/// Creation-ordered drawing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DrawingId(pub u64);

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drawing-{}", self.0)
    }
}

/// Fully specified drawing that has not been rendered yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingDraft {
    pub tool: ToolId,
    pub color: Color,
    pub points: DrawingPoints,
    pub text: Option<String>,
}

/// Finalized annotation together with the overlays it owns on the surface.
///
/// Drawings are never edited in place. The overlay handles leave the drawing
/// only through removal or lifecycle teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    id: DrawingId,
    tool: ToolId,
    color: Color,
    points: DrawingPoints,
    text: Option<String>,
    overlays: OverlayHandles,
}

impl Drawing {
    pub(crate) fn finalize(id: DrawingId, draft: DrawingDraft, overlays: OverlayHandles) -> Self {
        Self {
            id,
            tool: draft.tool,
            color: draft.color,
            points: draft.points,
            text: draft.text,
            overlays,
        }
    }

    #[must_use]
    pub fn id(&self) -> DrawingId {
        self.id
    }

    #[must_use]
    pub fn tool(&self) -> ToolId {
        self.tool
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn points(&self) -> &[DomainPoint] {
        &self.points
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn overlays(&self) -> &OverlayHandles {
        &self.overlays
    }

    pub(crate) fn take_overlays(&mut self) -> OverlayHandles {
        std::mem::take(&mut self.overlays)
    }
}

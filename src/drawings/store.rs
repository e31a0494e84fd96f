use indexmap::IndexMap;

use super::{Drawing, DrawingDraft, DrawingId};
use crate::render::OverlayHandles;

/// Ordered collection of finalized drawings for one chart instance.
///
/// Read access is public; mutation goes through `AnnotationEngine` so overlay
/// handles are always released alongside the drawing.
#[derive(Debug, Default)]
pub struct DrawingStore {
    drawings: IndexMap<DrawingId, Drawing>,
    next_id: u64,
}

impl DrawingStore {
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: DrawingId) -> Option<&Drawing> {
        self.drawings.get(&id)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Drawing> {
        self.drawings.last().map(|(_, drawing)| drawing)
    }

    /// Drawings in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Drawing> {
        self.drawings.values()
    }

    /// Total number of overlay handles owned by stored drawings.
    #[must_use]
    pub fn overlay_count(&self) -> usize {
        self.drawings.values().map(|d| d.overlays().len()).sum()
    }

    pub(crate) fn insert(&mut self, draft: DrawingDraft, overlays: OverlayHandles) -> DrawingId {
        self.next_id += 1;
        let id = DrawingId(self.next_id);
        self.drawings
            .insert(id, Drawing::finalize(id, draft, overlays));
        id
    }

    pub(crate) fn remove(&mut self, id: DrawingId) -> Option<Drawing> {
        self.drawings.shift_remove(&id)
    }

    pub(crate) fn pop_last(&mut self) -> Option<Drawing> {
        self.drawings.pop().map(|(_, drawing)| drawing)
    }

    pub(crate) fn drain(&mut self) -> Vec<Drawing> {
        self.drawings.drain(..).map(|(_, drawing)| drawing).collect()
    }
}

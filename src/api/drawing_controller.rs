use tracing::{debug, trace, warn};

use crate::core::{PointerSample, to_domain_point};
use crate::drawings::geometry::validate_points;
use crate::drawings::{
    Drawing, DrawingDraft, DrawingId, ReleaseSummary, build_overlays, release_overlays,
};
use crate::error::AnnotationResult;
use crate::interaction::{ClickOutcome, CompletedPoints, InputChannel};
use crate::render::ChartSurface;
use crate::tools::ToolId;

use super::AnnotationEngine;

impl<S: ChartSurface> AnnotationEngine<S> {
    /// Activates `tool`, discarding any pending two-point construction.
    pub fn select_tool(&mut self, tool: ToolId) -> AnnotationResult<()> {
        self.registry.descriptor(tool)?;
        if let Some(discarded) = self.machine.select_tool(tool) {
            debug!(
                from = %discarded.tool,
                to = %tool,
                "discarded pending construction on tool switch"
            );
        }
        Ok(())
    }

    /// Returns to the cursor mode and drops any pending anchor.
    pub fn escape(&mut self) {
        if let Some(discarded) = self.machine.escape() {
            debug!(tool = %discarded.tool, "discarded pending construction on escape");
        }
    }

    /// Handles a click event from the surface.
    ///
    /// Returns the id of the drawing finalized by this click. Out-of-domain
    /// clicks, degenerate input and navigation modes yield `None`.
    pub fn pointer_click(&mut self, sample: PointerSample) -> Option<DrawingId> {
        if !self.input.is_bound(InputChannel::Click) {
            trace!("click ignored: no surface attached");
            return None;
        }
        let point = self
            .surface
            .as_ref()
            .and_then(|surface| to_domain_point(surface, sample));

        let outcome = match self.machine.pointer_click(&self.registry, point) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "ignoring click for unregistered tool");
                return None;
            }
        };

        match outcome {
            ClickOutcome::Ignored => None,
            ClickOutcome::AnchorPlaced(construction) => {
                trace!(
                    tool = %construction.tool,
                    time = construction.anchor.time,
                    price = construction.anchor.price,
                    "anchor placed"
                );
                None
            }
            ClickOutcome::Aborted(construction) => {
                debug!(
                    tool = %construction.tool,
                    "second click outside chart domain aborted construction"
                );
                None
            }
            ClickOutcome::Completed(completed) => self.finalize_drawing(completed),
        }
    }

    /// Removes the most recently added drawing. No-op on an empty store.
    pub fn delete_last(&mut self) -> Option<DrawingId> {
        let mut drawing = self.store.pop_last()?;
        self.release_drawing(&mut drawing);
        Some(drawing.id())
    }

    /// Removes one drawing by id. Returns `true` when it existed.
    pub fn remove_drawing(&mut self, id: DrawingId) -> bool {
        let Some(mut drawing) = self.store.remove(id) else {
            return false;
        };
        self.release_drawing(&mut drawing);
        true
    }

    /// Removes every drawing and returns how many were removed.
    pub fn clear_drawings(&mut self) -> usize {
        let drawings = self.store.drain();
        let count = drawings.len();
        let mut summary = ReleaseSummary::default();
        for mut drawing in drawings {
            summary.merge(self.release_drawing(&mut drawing));
        }
        debug!(
            count,
            released = summary.released,
            failed = summary.failed,
            "cleared drawings"
        );
        count
    }

    fn finalize_drawing(&mut self, completed: CompletedPoints) -> Option<DrawingId> {
        let CompletedPoints { tool, points } = completed;
        let descriptor = match self.registry.descriptor(tool) {
            Ok(descriptor) => *descriptor,
            Err(err) => {
                warn!(error = %err, "cannot finalize drawing");
                return None;
            }
        };
        if let Err(err) = validate_points(&descriptor, &points) {
            debug!(error = %err, "rejected degenerate drawing");
            return None;
        }
        let color = self
            .active_color
            .or_else(|| self.config.palette.color_for(tool))?;
        let text = (tool == ToolId::Text).then(|| {
            self.text_content
                .clone()
                .unwrap_or_else(|| self.config.default_text.clone())
        });
        if text.as_deref().is_some_and(str::is_empty) {
            debug!("rejected text drawing without content");
            return None;
        }

        let draft = DrawingDraft {
            tool,
            color,
            points,
            text,
        };
        let style = self.config.overlay_style();
        let surface = self.surface.as_mut()?;
        let build = build_overlays(surface, descriptor.strategy, &draft, &style);
        if let Some(err) = build.error {
            if build.handles.is_empty() {
                warn!(error = %err, %tool, "overlay creation failed, drawing discarded");
                return None;
            }
            warn!(
                error = %err,
                %tool,
                created = build.handles.len(),
                "overlay creation stopped part way, keeping created overlays"
            );
        }

        let id = self.store.insert(draft, build.handles);
        debug!(%id, %tool, drawings = self.store.len(), "drawing finalized");
        Some(id)
    }

    fn release_drawing(&mut self, drawing: &mut Drawing) -> ReleaseSummary {
        let handles = drawing.take_overlays();
        match self.surface.as_mut() {
            Some(surface) if surface.is_alive() => release_overlays(surface, &handles),
            _ => {
                debug!(
                    id = %drawing.id(),
                    dropped = handles.len(),
                    "surface unavailable, dropping overlay handles"
                );
                ReleaseSummary::default()
            }
        }
    }
}

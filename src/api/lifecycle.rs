use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drawings::release_overlays;
use crate::render::ChartSurface;

use super::AnnotationEngine;

/// What a surface teardown did with the drawings it discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    pub drawings_discarded: usize,
    pub handles_released: usize,
    /// Release calls that failed and were ignored.
    pub handles_failed: usize,
    /// Handles dropped without calling the surface because it was dead.
    pub handles_dropped: usize,
    pub construction_cancelled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TeardownMode {
    /// Release through the old surface, ignoring failures.
    Release,
    /// The surface is gone; drop handles without calling it.
    Drop,
}

/// Owns surface attachment, replacement and teardown.
///
/// Drawings are scoped to the surface that created them: replacing the
/// surface discards them rather than re-creating them on the new one.
pub(super) struct LifecycleCoordinator;

impl LifecycleCoordinator {
    fn teardown<S: ChartSurface>(
        engine: &mut AnnotationEngine<S>,
        mode: TeardownMode,
    ) -> (Option<S>, TeardownReport) {
        let mut report = TeardownReport {
            construction_cancelled: engine.machine.cancel_construction().is_some(),
            ..TeardownReport::default()
        };
        engine.input.unbind_all();
        engine.cursor = None;

        let mut surface = engine.surface.take();
        let drawings = engine.store.drain();
        report.drawings_discarded = drawings.len();
        for mut drawing in drawings {
            let handles = drawing.take_overlays();
            match surface.as_mut() {
                Some(surface) if mode == TeardownMode::Release && surface.is_alive() => {
                    let summary = release_overlays(surface, &handles);
                    report.handles_released += summary.released;
                    report.handles_failed += summary.failed;
                }
                _ => report.handles_dropped += handles.len(),
            }
        }

        debug!(
            drawings = report.drawings_discarded,
            released = report.handles_released,
            failed = report.handles_failed,
            dropped = report.handles_dropped,
            cancelled = report.construction_cancelled,
            "surface torn down"
        );
        (surface, report)
    }

    fn attach<S: ChartSurface>(engine: &mut AnnotationEngine<S>, surface: S) {
        engine.surface = Some(surface);
        engine.input.bind_all();
    }
}

impl<S: ChartSurface> AnnotationEngine<S> {
    /// Attaches `surface`, tearing down and dropping any previous one.
    pub fn attach_surface(&mut self, surface: S) -> TeardownReport {
        self.replace_surface(surface).1
    }

    /// Swaps in a new surface (asset or timeframe change).
    ///
    /// Teardown of the old surface completes before the new one is attached;
    /// the old surface is handed back to the caller.
    pub fn replace_surface(&mut self, surface: S) -> (Option<S>, TeardownReport) {
        let (old, report) = LifecycleCoordinator::teardown(self, TeardownMode::Release);
        LifecycleCoordinator::attach(self, surface);
        (old, report)
    }

    /// Component teardown: releases every overlay and detaches the surface.
    pub fn teardown(&mut self) -> (Option<S>, TeardownReport) {
        LifecycleCoordinator::teardown(self, TeardownMode::Release)
    }

    /// The host already destroyed the surface; forget its overlays.
    pub fn surface_destroyed(&mut self) -> TeardownReport {
        LifecycleCoordinator::teardown(self, TeardownMode::Drop).1
    }
}

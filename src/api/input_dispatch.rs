use tracing::{trace, warn};

use crate::core::{DomainPoint, PointerSample, PriceTick, Viewport, to_domain_point};
use crate::error::AnnotationResult;
use crate::interaction::{InputChannel, InputCommand, KeyEvent};
use crate::render::ChartSurface;

use super::AnnotationEngine;

impl<S: ChartSurface> AnnotationEngine<S> {
    /// Dispatches a key press. Returns `true` when it triggered a command.
    pub fn key_down(&mut self, event: KeyEvent) -> bool {
        let Some(command) = self.input.resolve_key(&self.registry, event) else {
            trace!(?event, "key ignored");
            return false;
        };
        match command {
            InputCommand::SelectTool(tool) => {
                if let Err(err) = self.select_tool(tool) {
                    warn!(error = %err, "shortcut resolved to unusable tool");
                    return false;
                }
            }
            InputCommand::Escape => self.escape(),
            InputCommand::DeleteLast => {
                self.delete_last();
            }
        }
        true
    }

    /// Crosshair movement. `None` means the pointer left the pane.
    pub fn pointer_move(&mut self, sample: Option<PointerSample>) {
        if !self.input.is_bound(InputChannel::CrosshairMove) {
            return;
        }
        self.cursor = sample.and_then(|sample| {
            self.surface
                .as_ref()
                .and_then(|surface| to_domain_point(surface, sample))
        });
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_move(None);
    }

    /// Domain position under the pointer for the cursor readout.
    #[must_use]
    pub fn cursor_readout(&self) -> Option<DomainPoint> {
        self.cursor
    }

    /// Forwards a resize notification. Drawings are domain-anchored and stay.
    pub fn resize(&mut self, viewport: Viewport) -> AnnotationResult<()> {
        let viewport = viewport.validate()?;
        if !self.input.is_bound(InputChannel::Resize) {
            return Ok(());
        }
        match self.surface.as_mut() {
            Some(surface) => surface.resize(viewport),
            None => Ok(()),
        }
    }

    /// Applies a live price tick to the surface's rightmost candle.
    ///
    /// Ticks never touch drawings or the construction state.
    pub fn apply_price_tick(&mut self, tick: PriceTick) -> AnnotationResult<()> {
        let tick = tick.validate()?;
        let Some(surface) = self.surface.as_mut() else {
            trace!("tick ignored: no surface attached");
            return Ok(());
        };
        surface.update_live_bar(tick).inspect_err(|err| {
            warn!(error = %err, time = tick.time, price = tick.price, "live tick rejected by surface");
        })
    }
}

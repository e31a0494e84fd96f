use crate::core::DomainPoint;
use crate::drawings::DrawingStore;
use crate::error::AnnotationResult;
use crate::interaction::{ConstructionState, DrawingStateMachine, InputController, ToolState};
use crate::render::{ChartSurface, Color};
use crate::tools::{ToolId, ToolRegistry};

use super::AnnotationConfig;

/// Annotation facade consumed by host applications.
///
/// `AnnotationEngine` owns the chart surface it draws on, the tool state
/// machine, and the drawing store. Every store mutation goes through it so
/// overlay handles are released exactly once.
pub struct AnnotationEngine<S: ChartSurface> {
    pub(super) surface: Option<S>,
    pub(super) registry: ToolRegistry,
    pub(super) config: AnnotationConfig,
    pub(super) machine: DrawingStateMachine,
    pub(super) store: DrawingStore,
    pub(super) input: InputController,
    pub(super) cursor: Option<DomainPoint>,
    pub(super) active_color: Option<Color>,
    pub(super) text_content: Option<String>,
}

impl<S: ChartSurface> AnnotationEngine<S> {
    /// Creates a detached engine. Attach a surface before feeding events.
    pub fn new(registry: ToolRegistry, config: AnnotationConfig) -> AnnotationResult<Self> {
        config.validate()?;
        Ok(Self {
            surface: None,
            input: InputController::new(config.shortcuts_enabled),
            registry,
            config,
            machine: DrawingStateMachine::default(),
            store: DrawingStore::default(),
            cursor: None,
            active_color: None,
            text_content: None,
        })
    }

    pub fn with_surface(
        surface: S,
        registry: ToolRegistry,
        config: AnnotationConfig,
    ) -> AnnotationResult<Self> {
        let mut engine = Self::new(registry, config)?;
        engine.attach_surface(surface);
        Ok(engine)
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mutable surface access for host-side updates (bars, styling).
    ///
    /// Overlays owned by drawings must not be removed through this reference.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    #[must_use]
    pub fn drawings(&self) -> &DrawingStore {
        &self.store
    }

    #[must_use]
    pub fn tool_state(&self) -> ToolState {
        self.machine.state()
    }

    #[must_use]
    pub fn active_tool(&self) -> ToolId {
        self.machine.active_tool()
    }

    #[must_use]
    pub fn construction(&self) -> Option<ConstructionState> {
        self.machine.construction()
    }

    #[must_use]
    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn set_shortcuts_enabled(&mut self, enabled: bool) {
        self.input.set_shortcuts_enabled(enabled);
    }

    /// Overrides the palette color for drawings created from now on.
    pub fn set_active_color(&mut self, color: Option<Color>) {
        self.active_color = color;
    }

    /// Text used by subsequent text placements. `None` restores the default.
    pub fn set_text_content(&mut self, text: Option<String>) {
        self.text_content = text;
    }

    #[must_use]
    pub fn into_surface(mut self) -> Option<S> {
        self.teardown().0
    }
}

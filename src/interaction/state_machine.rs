use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::core::DomainPoint;
use crate::drawings::DrawingPoints;
use crate::error::AnnotationResult;
use crate::tools::{ToolId, ToolRegistry};

/// Drawing construction state. At most one construction is live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToolState {
    Idle { tool: ToolId },
    AwaitingSecondPoint { tool: ToolId, anchor: DomainPoint },
}

impl ToolState {
    #[must_use]
    pub fn tool(self) -> ToolId {
        match self {
            ToolState::Idle { tool } | ToolState::AwaitingSecondPoint { tool, .. } => tool,
        }
    }
}

/// Pending two-point construction: first click received, second awaited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstructionState {
    pub tool: ToolId,
    pub anchor: DomainPoint,
}

/// Points collected for a tool once its required count is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedPoints {
    pub tool: ToolId,
    pub points: DrawingPoints,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Navigation mode or out-of-domain click with nothing pending.
    Ignored,
    AnchorPlaced(ConstructionState),
    /// Out-of-domain second click discarded the pending anchor.
    Aborted(ConstructionState),
    Completed(CompletedPoints),
}

/// Tool selection and multi-click construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingStateMachine {
    state: ToolState,
}

impl Default for DrawingStateMachine {
    fn default() -> Self {
        Self {
            state: ToolState::Idle {
                tool: ToolId::Cursor,
            },
        }
    }
}

impl DrawingStateMachine {
    #[must_use]
    pub fn state(self) -> ToolState {
        self.state
    }

    #[must_use]
    pub fn active_tool(self) -> ToolId {
        self.state.tool()
    }

    #[must_use]
    pub fn construction(self) -> Option<ConstructionState> {
        match self.state {
            ToolState::AwaitingSecondPoint { tool, anchor } => {
                Some(ConstructionState { tool, anchor })
            }
            ToolState::Idle { .. } => None,
        }
    }

    /// Switches tool, discarding any pending construction.
    pub fn select_tool(&mut self, tool: ToolId) -> Option<ConstructionState> {
        let discarded = self.construction();
        self.state = ToolState::Idle { tool };
        discarded
    }

    /// Resets to the cursor, discarding any pending construction.
    pub fn escape(&mut self) -> Option<ConstructionState> {
        self.select_tool(ToolId::Cursor)
    }

    /// Drops a pending construction but keeps the active tool.
    pub fn cancel_construction(&mut self) -> Option<ConstructionState> {
        let tool = self.active_tool();
        self.select_tool(tool)
    }

    /// Feeds a mapped click. `None` means the click landed outside the domain.
    pub fn pointer_click(
        &mut self,
        registry: &ToolRegistry,
        point: Option<DomainPoint>,
    ) -> AnnotationResult<ClickOutcome> {
        match (self.state, point) {
            (ToolState::Idle { tool }, _) if !tool.is_drawing() => Ok(ClickOutcome::Ignored),
            (ToolState::Idle { .. }, None) => Ok(ClickOutcome::Ignored),
            (ToolState::AwaitingSecondPoint { tool, anchor }, None) => {
                self.state = ToolState::Idle { tool };
                Ok(ClickOutcome::Aborted(ConstructionState { tool, anchor }))
            }
            (ToolState::AwaitingSecondPoint { tool, anchor }, Some(point)) => {
                self.state = ToolState::Idle { tool };
                Ok(ClickOutcome::Completed(CompletedPoints {
                    tool,
                    points: smallvec![anchor, point],
                }))
            }
            (ToolState::Idle { tool }, Some(point)) => {
                if registry.descriptor(tool)?.required_points == 1 {
                    return Ok(ClickOutcome::Completed(CompletedPoints {
                        tool,
                        points: smallvec![point],
                    }));
                }
                let construction = ConstructionState {
                    tool,
                    anchor: point,
                };
                self.state = ToolState::AwaitingSecondPoint {
                    tool,
                    anchor: point,
                };
                Ok(ClickOutcome::AnchorPlaced(construction))
            }
        }
    }
}

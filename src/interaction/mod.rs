mod input;
mod state_machine;

pub use input::{InputChannel, InputCommand, InputController, Key, KeyEvent, KeyModifiers};
pub use state_machine::{
    ClickOutcome, CompletedPoints, ConstructionState, DrawingStateMachine, ToolState,
};

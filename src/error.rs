use thiserror::Error;

use crate::render::OverlayHandle;
use crate::tools::ToolId;

pub type AnnotationResult<T> = Result<T, AnnotationError>;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("shortcut `{key}` is bound to both `{first}` and `{second}`")]
    DuplicateShortcut {
        key: char,
        first: ToolId,
        second: ToolId,
    },

    #[error("no descriptor registered for tool `{0}`")]
    MissingToolDescriptor(ToolId),

    #[error("degenerate `{tool}` drawing: {reason}")]
    DegenerateDrawing { tool: ToolId, reason: String },

    #[error("overlay handle {0:?} is not known to the surface")]
    UnknownHandle(OverlayHandle),

    #[error("chart surface has been destroyed")]
    SurfaceDestroyed,
}

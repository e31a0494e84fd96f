use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Opaque reference to a visual element created on a chart surface.
///
/// The numeric id is assigned by the surface and is only meaningful to the
/// surface instance that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayHandle {
    PriceLine(u64),
    Series(u64),
    TimeLine(u64),
    TextLabel(u64),
}

impl OverlayHandle {
    #[must_use]
    pub fn raw_id(self) -> u64 {
        match self {
            Self::PriceLine(id) | Self::Series(id) | Self::TimeLine(id) | Self::TextLabel(id) => id,
        }
    }
}

/// Handles owned by one drawing. Fibonacci retracements are the widest case.
pub type OverlayHandles = SmallVec<[OverlayHandle; 8]>;

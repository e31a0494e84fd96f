mod handles;
mod headless_surface;
mod primitives;
mod surface;

pub use handles::{OverlayHandle, OverlayHandles};
pub use headless_surface::{HeadlessSurface, SeriesRecord};
pub use primitives::{
    Color, LineSeriesSpec, LineStyle, PriceLineSpec, SeriesPoint, TextLabelSpec, TimeLineSpec,
};
pub use surface::{ChartSurface, release_overlay};

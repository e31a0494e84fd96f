pub mod coordinate_mapper;
pub mod price_axis;
pub mod primitives;
pub mod types;

pub use coordinate_mapper::{PointerSample, to_domain_point};
pub use price_axis::PriceAxis;
pub use primitives::format_price;
pub use types::{DomainPoint, PriceTick, Viewport};

use serde::{Deserialize, Serialize};

use crate::core::DomainPoint;
use crate::render::ChartSurface;

/// Pointer position as delivered by a surface event.
///
/// `time` is the result of the surface's own time-axis hit-test; it is `None`
/// when the pointer is not over a bar slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pixel_y: f64,
    pub time: Option<i64>,
}

impl PointerSample {
    #[must_use]
    pub const fn new(pixel_y: f64, time: Option<i64>) -> Self {
        Self { pixel_y, time }
    }
}

/// Maps a pointer sample to a domain point through the surface projection.
///
/// Returns `None` when the sample lies outside the plotted price range or the
/// visible time domain. Callers treat `None` as "ignore this click".
#[must_use]
pub fn to_domain_point<S>(surface: &S, sample: PointerSample) -> Option<DomainPoint>
where
    S: ChartSurface + ?Sized,
{
    if !sample.pixel_y.is_finite() {
        return None;
    }
    let time = sample.time?;
    let (start, end) = surface.time_domain()?;
    if time < start || time > end {
        return None;
    }
    let price = surface.inverse_project_price(sample.pixel_y)?;
    price.is_finite().then_some(DomainPoint::new(time, price))
}

#[cfg(test)]
mod tests {
    use super::{PointerSample, to_domain_point};
    use crate::core::Viewport;
    use crate::render::HeadlessSurface;

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(Viewport::new(1000, 500), 0.0, 100.0)
            .expect("surface")
            .with_bar_times((0..10).map(|i| 1_000 + i * 60).collect())
    }

    #[test]
    fn maps_inside_domain() {
        let point = to_domain_point(&surface(), PointerSample::new(250.0, Some(1_120)))
            .expect("inside domain");
        assert_eq!(point.time, 1_120);
        assert!((point.price - 50.0).abs() <= 1e-9);
    }

    #[test]
    fn rejects_time_outside_visible_domain() {
        assert_eq!(
            to_domain_point(&surface(), PointerSample::new(250.0, Some(999))),
            None
        );
        assert_eq!(
            to_domain_point(&surface(), PointerSample::new(250.0, None)),
            None
        );
    }

    #[test]
    fn rejects_pixel_outside_price_range() {
        assert_eq!(
            to_domain_point(&surface(), PointerSample::new(501.0, Some(1_120))),
            None
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{AnnotationError, AnnotationResult};

/// Linear vertical price projection over the plotted pane height.
///
/// Pixel `0` is the top edge and maps to `price_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAxis {
    price_min: f64,
    price_max: f64,
}

impl PriceAxis {
    pub fn new(price_min: f64, price_max: f64) -> AnnotationResult<Self> {
        if !price_min.is_finite() || !price_max.is_finite() || price_min >= price_max {
            return Err(AnnotationError::InvalidData(
                "price axis range must be finite and increasing".to_owned(),
            ));
        }
        Ok(Self {
            price_min,
            price_max,
        })
    }

    pub fn price_to_pixel(self, price: f64, viewport: Viewport) -> AnnotationResult<f64> {
        let viewport = viewport.validate()?;
        if !price.is_finite() {
            return Err(AnnotationError::InvalidData("price must be finite".to_owned()));
        }
        let normalized = (self.price_max - price) / (self.price_max - self.price_min);
        Ok(normalized * f64::from(viewport.height))
    }

    /// Inverse projection. Returns `None` outside the plotted pane.
    #[must_use]
    pub fn pixel_to_price(self, pixel_y: f64, viewport: Viewport) -> Option<f64> {
        if !viewport.is_valid() || !pixel_y.is_finite() {
            return None;
        }
        let height = f64::from(viewport.height);
        if !(0.0..=height).contains(&pixel_y) {
            return None;
        }
        let price_per_pixel = (self.price_max - self.price_min) / height;
        Some(self.price_max - pixel_y * price_per_pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::PriceAxis;
    use crate::core::Viewport;

    #[test]
    fn inverse_projection_rejects_pixels_outside_pane() {
        let axis = PriceAxis::new(100.0, 200.0).expect("axis");
        let viewport = Viewport::new(800, 400);
        assert_eq!(axis.pixel_to_price(-1.0, viewport), None);
        assert_eq!(axis.pixel_to_price(400.5, viewport), None);
        assert_eq!(axis.pixel_to_price(f64::NAN, viewport), None);
    }

    #[test]
    fn projection_round_trips_inside_pane() {
        let axis = PriceAxis::new(100.0, 200.0).expect("axis");
        let viewport = Viewport::new(800, 400);
        let pixel = axis.price_to_pixel(150.0, viewport).expect("to pixel");
        assert!((pixel - 200.0).abs() <= 1e-9);
        let price = axis.pixel_to_price(pixel, viewport).expect("inside pane");
        assert!((price - 150.0).abs() <= 1e-9);
    }

    #[test]
    fn axis_rejects_inverted_range() {
        let err = PriceAxis::new(10.0, 10.0).expect_err("empty range must fail");
        assert!(format!("{err}").contains("price axis range"));
    }
}

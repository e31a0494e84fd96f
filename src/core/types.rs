use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{AnnotationError, AnnotationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> AnnotationResult<Self> {
        if !self.is_valid() {
            return Err(AnnotationError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Point in chart domain space: unix seconds on the time axis plus a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainPoint {
    pub time: i64,
    pub price: f64,
}

impl DomainPoint {
    #[must_use]
    pub const fn new(time: i64, price: f64) -> Self {
        Self { time, price }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, price: Decimal) -> AnnotationResult<Self> {
        Ok(Self {
            time: datetime_to_unix_seconds(time),
            price: decimal_to_f64(price, "price")?,
        })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.price.is_finite()
    }
}

/// One update from the live price feed for the selected instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub time: i64,
    pub price: f64,
}

impl PriceTick {
    #[must_use]
    pub const fn new(time: i64, price: f64) -> Self {
        Self { time, price }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, price: Decimal) -> AnnotationResult<Self> {
        Ok(Self {
            time: datetime_to_unix_seconds(time),
            price: decimal_to_f64(price, "tick price")?,
        })
    }

    pub fn validate(self) -> AnnotationResult<Self> {
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(AnnotationError::InvalidData(
                "tick price must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

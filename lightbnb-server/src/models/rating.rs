//! Review rating bounds

use super::ValidationError;

/// Lowest rating a review can carry
pub const MIN_RATING: f64 = 1.0;

/// Highest rating a review can carry
pub const MAX_RATING: f64 = 5.0;

/// Minimum average rating used as a search threshold
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rating(f64);

impl Rating {
    /// Accepts any finite value in `0.0..=5.0`. A zero threshold filters nothing.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=MAX_RATING).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: "minimum_rating",
                reason: format!("{} is not between 0 and {}", value, MAX_RATING),
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

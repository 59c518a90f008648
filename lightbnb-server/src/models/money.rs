//! Currency amounts in minor units
//!
//! `cost_per_night` is stored as an integer number of cents. Search
//! bounds arrive in whole currency units and are scaled here, once.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Minor units per whole currency unit
pub const MINOR_UNITS_PER_UNIT: i32 = 100;

/// Amount in minor currency units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i32);

impl Cents {
    /// Wrap a non-negative amount already expressed in cents.
    pub fn new(cents: i32) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::OutOfRange {
                field: "cost_per_night",
                reason: format!("{} is negative", cents),
            });
        }
        Ok(Self(cents))
    }

    /// Scale a whole-unit amount (e.g. dollars) to cents.
    ///
    /// # Example
    /// ```
    /// use lightbnb_server::models::Cents;
    ///
    /// assert_eq!(Cents::from_whole_units(150).unwrap().get(), 15_000);
    /// ```
    pub fn from_whole_units(units: u32) -> Result<Self, ValidationError> {
        i32::try_from(units)
            .ok()
            .and_then(|u| u.checked_mul(MINOR_UNITS_PER_UNIT))
            .map(Self)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "price_per_night",
                reason: format!("{} is too large", units),
            })
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

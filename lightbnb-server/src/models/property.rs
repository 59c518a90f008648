//! Property input validation
//!
//! `PropertyInput` is the raw shape accepted from HTTP bodies and from the
//! `properties.json` fixture. `validate` turns it into a `NewProperty`.

use serde::Deserialize;

use super::validation::bounded_text;
use super::{Cents, ValidationError};

/// Maximum length for short text columns (title, city, street, ...)
const MAX_TEXT_LEN: usize = 255;

/// Unvalidated property fields
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyInput {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_photo_url: String,
    #[serde(default)]
    pub cover_photo_url: String,
    /// Minor units (cents)
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub post_code: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Validated property ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: Cents,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

impl PropertyInput {
    /// Validate and normalize.
    ///
    /// # Rules
    /// - `title` and `city` non-empty, max 255 characters
    /// - `cost_per_night` non-negative
    /// - room and parking counts non-negative
    pub fn validate(self) -> Result<NewProperty, ValidationError> {
        let title = bounded_text(&self.title, "title", MAX_TEXT_LEN)?;
        let city = bounded_text(&self.city, "city", MAX_TEXT_LEN)?;
        let cost_per_night = Cents::new(self.cost_per_night)?;

        for (field, value) in [
            ("parking_spaces", self.parking_spaces),
            ("number_of_bathrooms", self.number_of_bathrooms),
            ("number_of_bedrooms", self.number_of_bedrooms),
        ] {
            if value < 0 {
                return Err(ValidationError::OutOfRange {
                    field,
                    reason: format!("{} is negative", value),
                });
            }
        }

        for (field, value) in [
            ("country", &self.country),
            ("street", &self.street),
            ("province", &self.province),
            ("post_code", &self.post_code),
        ] {
            if value.chars().count() > MAX_TEXT_LEN {
                return Err(ValidationError::TooLong {
                    field,
                    max: MAX_TEXT_LEN,
                });
            }
        }

        Ok(NewProperty {
            owner_id: self.owner_id,
            title,
            description: self.description,
            thumbnail_photo_url: self.thumbnail_photo_url,
            cover_photo_url: self.cover_photo_url,
            cost_per_night,
            parking_spaces: self.parking_spaces,
            number_of_bathrooms: self.number_of_bathrooms,
            number_of_bedrooms: self.number_of_bedrooms,
            country: self.country,
            street: self.street,
            city,
            province: self.province,
            post_code: self.post_code,
            active: self.active,
        })
    }
}

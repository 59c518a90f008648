//! Property search filter
//!
//! Every predicate is optional and they AND-combine. The same filter
//! drives the SQL builder for Postgres and the in-memory matcher, so both
//! gateways agree on what a search returns.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use super::repos::Property;
use crate::models::query::empty_as_none;
use crate::models::{Cents, Limit, Rating, ValidationError};

/// Select list shared by every query that returns a full property row.
///
/// Expects the properties table aliased as `p`.
macro_rules! property_columns {
    () => {
        "p.id, p.owner_id, p.title, p.description, p.thumbnail_photo_url, \
         p.cover_photo_url, p.cost_per_night, p.parking_spaces, \
         p.number_of_bathrooms, p.number_of_bedrooms, p.country, p.street, \
         p.city, p.province, p.post_code, p.active"
    };
}
pub(crate) use property_columns;

/// Inclusive nightly price bounds, in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Cents,
    max: Cents,
}

impl PriceRange {
    pub fn new(min: Cents, max: Cents) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::OutOfRange {
                field: "price_per_night",
                reason: format!(
                    "minimum {} exceeds maximum {}",
                    min.get(),
                    max.get()
                ),
            });
        }
        Ok(Self { min, max })
    }

    /// Bounds given in whole currency units, scaled to cents.
    pub fn from_whole_units(min: u32, max: u32) -> Result<Self, ValidationError> {
        Self::new(Cents::from_whole_units(min)?, Cents::from_whole_units(max)?)
    }

    pub fn min(&self) -> Cents {
        self.min
    }

    pub fn max(&self) -> Cents {
        self.max
    }

    pub fn contains(&self, cost: i32) -> bool {
        self.min.get() <= cost && cost <= self.max.get()
    }
}

/// Composable property filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySearch {
    city: Option<String>,
    owner_id: Option<i32>,
    price: Option<PriceRange>,
    minimum_rating: Option<Rating>,
}

impl PropertySearch {
    /// Search with no predicates: every property, cheapest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep properties whose city contains `city`. Blank input is ignored.
    pub fn city(mut self, city: &str) -> Self {
        let city = city.trim();
        self.city = (!city.is_empty()).then(|| city.to_owned());
        self
    }

    pub fn owner(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    /// Keep properties whose average rating is at least `rating`.
    /// Zero means no rating filter, so unreviewed properties stay in.
    pub fn minimum_rating(mut self, rating: Rating) -> Self {
        self.minimum_rating = (rating.get() > 0.0).then_some(rating);
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.city.is_none()
            && self.owner_id.is_none()
            && self.price.is_none()
            && self.minimum_rating.is_none()
    }

    /// Build the SELECT for this filter.
    ///
    /// Placeholders are numbered in push order: city, owner, price bounds,
    /// rating, then the limit.
    pub fn to_query(&self, limit: Limit) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(concat!(
            "SELECT ",
            property_columns!(),
            ", avg(pr.rating)::float8 AS average_rating \
             FROM properties p \
             LEFT JOIN property_reviews pr ON pr.property_id = p.id",
        ));
        builder.push(" WHERE 1=1");

        if let Some(city) = &self.city {
            builder.push(r" AND p.city LIKE ");
            builder.push_bind(format!("%{}%", escape_like(city)));
            builder.push(r" ESCAPE '\'");
        }
        if let Some(owner_id) = self.owner_id {
            builder.push(" AND p.owner_id = ");
            builder.push_bind(owner_id);
        }
        if let Some(range) = self.price {
            builder.push(" AND p.cost_per_night >= ");
            builder.push_bind(range.min().get());
            builder.push(" AND p.cost_per_night <= ");
            builder.push_bind(range.max().get());
        }

        builder.push(" GROUP BY p.id");

        if let Some(rating) = self.minimum_rating {
            builder.push(" HAVING avg(pr.rating)::float8 >= ");
            builder.push_bind(rating.get());
        }

        builder.push(" ORDER BY p.cost_per_night ASC, p.id ASC LIMIT ");
        builder.push_bind(limit.as_i64());
        builder
    }

    /// In-memory equivalent of the SQL predicates.
    pub fn matches(&self, property: &Property, average_rating: Option<f64>) -> bool {
        if let Some(city) = &self.city {
            if !property.city.contains(city.as_str()) {
                return false;
            }
        }
        if let Some(owner_id) = self.owner_id {
            if property.owner_id != owner_id {
                return false;
            }
        }
        if let Some(range) = self.price {
            if !range.contains(property.cost_per_night) {
                return false;
            }
        }
        if let Some(rating) = self.minimum_rating {
            match average_rating {
                Some(avg) if avg >= rating.get() => {}
                _ => return false,
            }
        }
        true
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Query parameters accepted by the search endpoint
///
/// Price bounds are whole currency units and apply only when both are set.
/// Blank fields (`owner_id=`) count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertySearchParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub owner_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub minimum_price_per_night: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub maximum_price_per_night: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub minimum_rating: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u32>,
}

impl PropertySearchParams {
    pub fn limit(&self) -> Limit {
        self.limit.map(Limit::new).unwrap_or_default()
    }
}

impl TryFrom<PropertySearchParams> for PropertySearch {
    type Error = ValidationError;

    fn try_from(params: PropertySearchParams) -> Result<Self, Self::Error> {
        let mut search = PropertySearch::new();

        if let Some(city) = params.city.as_deref() {
            search = search.city(city);
        }
        if let Some(owner_id) = params.owner_id {
            search = search.owner(owner_id);
        }
        if let (Some(min), Some(max)) = (
            params.minimum_price_per_night,
            params.maximum_price_per_night,
        ) {
            search = search.price(PriceRange::from_whole_units(min, max)?);
        }
        if let Some(rating) = params.minimum_rating {
            search = search.minimum_rating(Rating::new(rating)?);
        }

        Ok(search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id: i32, owner_id: i32, city: &str, cost: i32) -> Property {
        Property {
            id,
            owner_id,
            title: format!("property {}", id),
            description: String::new(),
            thumbnail_photo_url: String::new(),
            cover_photo_url: String::new(),
            cost_per_night: cost,
            parking_spaces: 0,
            number_of_bathrooms: 1,
            number_of_bedrooms: 1,
            country: "Canada".into(),
            street: String::new(),
            city: city.into(),
            province: String::new(),
            post_code: String::new(),
            active: true,
        }
    }

    #[test]
    fn unfiltered_query() {
        let search = PropertySearch::new();
        assert!(search.is_unfiltered());

        let query = search.to_query(Limit::default());
        let sql = query.sql();
        assert!(sql.contains("WHERE 1=1 GROUP BY p.id"));
        assert!(sql.ends_with("ORDER BY p.cost_per_night ASC, p.id ASC LIMIT $1"));
        assert!(!sql.contains("HAVING"));
    }

    #[test]
    fn city_only_binds_first() {
        let query = PropertySearch::new().city("Van").to_query(Limit::new(5));
        let sql = query.sql();
        assert!(sql.contains(r"AND p.city LIKE $1 ESCAPE '\'"));
        assert!(sql.ends_with("LIMIT $2"));
    }

    #[test]
    fn all_filters_compose_in_order() {
        let search = PropertySearch::new()
            .city("Van")
            .owner(3)
            .price(PriceRange::from_whole_units(100, 200).unwrap())
            .minimum_rating(Rating::new(4.0).unwrap());
        let query = search.to_query(Limit::default());
        let sql = query.sql();

        assert!(sql.contains("p.city LIKE $1"));
        assert!(sql.contains("p.owner_id = $2"));
        assert!(sql.contains("p.cost_per_night >= $3 AND p.cost_per_night <= $4"));
        assert!(sql.contains("HAVING avg(pr.rating)::float8 >= $5"));
        assert!(sql.ends_with("LIMIT $6"));

        let where_pos = sql.find("WHERE").unwrap();
        let group_pos = sql.find("GROUP BY").unwrap();
        let having_pos = sql.find("HAVING").unwrap();
        assert!(where_pos < group_pos && group_pos < having_pos);
    }

    #[test]
    fn rating_without_other_filters() {
        let query = PropertySearch::new()
            .minimum_rating(Rating::new(3.5).unwrap())
            .to_query(Limit::default());
        let sql = query.sql();
        assert!(sql.contains("HAVING avg(pr.rating)::float8 >= $1"));
        assert!(sql.ends_with("LIMIT $2"));
    }

    #[test]
    fn blank_city_is_ignored() {
        assert!(PropertySearch::new().city("   ").is_unfiltered());
    }

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), r"50\%\_off\\");
        assert_eq!(escape_like("Vancouver"), "Vancouver");
    }

    #[test]
    fn price_range_scales_whole_units() {
        let range = PriceRange::from_whole_units(100, 200).unwrap();
        assert_eq!(range.min().get(), 10_000);
        assert_eq!(range.max().get(), 20_000);
        assert!(range.contains(10_000));
        assert!(range.contains(20_000));
        assert!(!range.contains(9_999));
        assert!(!range.contains(20_001));
    }

    #[test]
    fn price_range_rejects_inverted_bounds() {
        let err = PriceRange::from_whole_units(300, 200).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn matches_and_combines() {
        let search = PropertySearch::new().city("Van").owner(1);
        assert!(search.matches(&property(1, 1, "Vancouver", 100), None));
        assert!(!search.matches(&property(2, 2, "Vancouver", 100), None));
        assert!(!search.matches(&property(3, 1, "Calgary", 100), None));
    }

    #[test]
    fn city_match_is_case_sensitive_substring() {
        let search = PropertySearch::new().city("Van");
        assert!(search.matches(&property(1, 1, "North Vancouver", 1), None));
        assert!(!search.matches(&property(2, 1, "vancouver", 1), None));
    }

    #[test]
    fn minimum_rating_excludes_unreviewed() {
        let search = PropertySearch::new().minimum_rating(Rating::new(4.0).unwrap());
        let p = property(1, 1, "Calgary", 100);
        assert!(search.matches(&p, Some(4.0)));
        assert!(!search.matches(&p, Some(3.99)));
        assert!(!search.matches(&p, None));
    }

    #[test]
    fn zero_minimum_rating_is_no_filter() {
        let search = PropertySearch::new().minimum_rating(Rating::new(0.0).unwrap());
        assert!(search.is_unfiltered());
        assert!(search.matches(&property(1, 1, "Calgary", 100), None));
        assert!(!search.to_query(Limit::default()).sql().contains("HAVING"));
    }

    #[test]
    fn params_require_both_price_bounds() {
        let params = PropertySearchParams {
            minimum_price_per_night: Some(100),
            ..Default::default()
        };
        let search = PropertySearch::try_from(params).unwrap();
        assert!(search.is_unfiltered());

        let params = PropertySearchParams {
            minimum_price_per_night: Some(100),
            maximum_price_per_night: Some(200),
            ..Default::default()
        };
        let search = PropertySearch::try_from(params).unwrap();
        assert_eq!(
            search,
            PropertySearch::new().price(PriceRange::from_whole_units(100, 200).unwrap())
        );
    }

    #[test]
    fn params_reject_bad_rating() {
        let params = PropertySearchParams {
            minimum_rating: Some(9.0),
            ..Default::default()
        };
        assert!(PropertySearch::try_from(params).is_err());
    }

    #[test]
    fn params_default_limit() {
        assert_eq!(PropertySearchParams::default().limit().get(), 10);
        let params = PropertySearchParams {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(params.limit().get(), 100);
    }
}

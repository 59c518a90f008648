//! Property repository
//!
//! - search: one GROUP BY query with LEFT JOIN on reviews for the average
//! - create: INSERT ... RETURNING, persisted like every other write

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::search::{property_columns, PropertySearch};
use crate::db::DbError;
use crate::models::{Limit, NewProperty};

/// Property record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Minor units (cents)
    pub cost_per_night: i32,
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

/// Property with its derived average review rating
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    /// `None` when the property has no reviews
    pub average_rating: Option<f64>,
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Properties matching every predicate in `search`, cheapest first.
    pub async fn search(
        &self,
        search: &PropertySearch,
        limit: Limit,
    ) -> Result<Vec<PropertyListing>, DbError> {
        let mut builder = search.to_query(limit);
        tracing::debug!(sql = builder.sql(), ?search, "property search");

        let rows = builder
            .build_query_as::<PropertyListing>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Insert a property and return the stored row.
    ///
    /// An unknown `owner_id` is reported as `DbError::ForeignKey`.
    pub async fn create(&self, property: NewProperty) -> Result<Property, DbError> {
        sqlx::query_as::<_, Property>(concat!(
            r#"
            INSERT INTO properties AS p (
                owner_id, title, description, thumbnail_photo_url,
                cover_photo_url, cost_per_night, parking_spaces,
                number_of_bathrooms, number_of_bedrooms, country, street,
                city, province, post_code, active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING "#,
            property_columns!()
        ))
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night.get())
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(&property.country)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(property.active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_write("property", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::search::PriceRange;
    use crate::db::MIGRATOR;
    use crate::models::{PropertyInput, Rating};

    async fn owner(pool: &PgPool) -> i32 {
        sqlx::query_scalar("INSERT INTO users (name, email, password) VALUES ('o', 'o@x.io', 'pw') RETURNING id")
            .fetch_one(pool)
            .await
            .expect("insert owner")
    }

    fn new_property(owner_id: i32, city: &str, cost: i32) -> NewProperty {
        PropertyInput {
            owner_id,
            title: format!("{} stay", city),
            description: String::new(),
            thumbnail_photo_url: String::new(),
            cover_photo_url: String::new(),
            cost_per_night: cost,
            parking_spaces: 1,
            number_of_bathrooms: 1,
            number_of_bedrooms: 2,
            country: "Canada".into(),
            street: String::new(),
            city: city.into(),
            province: String::new(),
            post_code: String::new(),
            active: true,
        }
        .validate()
        .expect("valid property")
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn create_assigns_id(pool: PgPool) -> Result<(), DbError> {
        let owner_id = owner(&pool).await;
        let repo = PropertyRepo::new(&pool);
        let first = repo.create(new_property(owner_id, "Vancouver", 10_000)).await?;
        let second = repo.create(new_property(owner_id, "Calgary", 20_000)).await?;
        assert!(second.id > first.id);
        assert_eq!(first.city, "Vancouver");
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn create_with_unknown_owner_fails(pool: PgPool) -> Result<(), DbError> {
        let err = PropertyRepo::new(&pool)
            .create(new_property(9_999, "Nowhere", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { resource: "property", .. }));
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn search_filters_and_orders(pool: PgPool) -> Result<(), DbError> {
        let owner_id = owner(&pool).await;
        let repo = PropertyRepo::new(&pool);
        let cheap = repo.create(new_property(owner_id, "Vancouver", 12_000)).await?;
        repo.create(new_property(owner_id, "North Vancouver", 30_000)).await?;
        repo.create(new_property(owner_id, "Calgary", 15_000)).await?;
        let mid = repo.create(new_property(owner_id, "Vancouver", 18_000)).await?;

        sqlx::query("INSERT INTO property_reviews (guest_id, property_id, rating) VALUES ($1, $2, 5), ($1, $3, 2)")
            .bind(owner_id)
            .bind(cheap.id)
            .bind(mid.id)
            .execute(&pool)
            .await?;

        let by_city = repo
            .search(&PropertySearch::new().city("Van"), Limit::default())
            .await?;
        assert_eq!(by_city.len(), 3);
        assert!(by_city.iter().all(|l| l.property.city.contains("Van")));
        assert!(by_city
            .windows(2)
            .all(|w| w[0].property.cost_per_night <= w[1].property.cost_per_night));

        let in_range = repo
            .search(
                &PropertySearch::new()
                    .city("Van")
                    .price(PriceRange::from_whole_units(100, 200).unwrap()),
                Limit::default(),
            )
            .await?;
        let ids: Vec<i32> = in_range.iter().map(|l| l.property.id).collect();
        assert_eq!(ids, vec![cheap.id, mid.id]);

        let rated = repo
            .search(
                &PropertySearch::new().minimum_rating(Rating::new(4.0).unwrap()),
                Limit::default(),
            )
            .await?;
        assert_eq!(rated.len(), 1);
        assert_eq!(rated[0].property.id, cheap.id);
        assert_eq!(rated[0].average_rating, Some(5.0));

        let limited = repo.search(&PropertySearch::new(), Limit::new(2)).await?;
        assert_eq!(limited.len(), 2);
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn city_wildcards_match_literally(pool: PgPool) -> Result<(), DbError> {
        let owner_id = owner(&pool).await;
        let repo = PropertyRepo::new(&pool);
        repo.create(new_property(owner_id, "Vancouver", 100)).await?;

        let found = repo
            .search(&PropertySearch::new().city("%"), Limit::default())
            .await?;
        assert!(found.is_empty());
        Ok(())
    }
}

//! Reservation repository
//!
//! Guest reservations joined with their property and the property's
//! average rating. Reviews are LEFT JOINed and aggregated, so each
//! reservation appears once whether its property has zero or many reviews.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::Property;
use crate::db::search::property_columns;
use crate::db::DbError;
use crate::models::Limit;

/// Reservation with the reserved property
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct GuestReservation {
    pub reservation_id: i32,
    pub guest_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reservations for a guest, earliest start date first.
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<GuestReservation>, DbError> {
        let rows = sqlx::query_as::<_, GuestReservation>(concat!(
            r#"
            SELECT
                r.id AS reservation_id,
                r.guest_id,
                r.start_date,
                r.end_date,
                "#,
            property_columns!(),
            r#",
                avg(pr.rating)::float8 AS average_rating
            FROM reservations r
            JOIN properties p ON p.id = r.property_id
            LEFT JOIN property_reviews pr ON pr.property_id = p.id
            WHERE r.guest_id = $1
            GROUP BY r.id, p.id
            ORDER BY r.start_date ASC, r.id ASC
            LIMIT $2
            "#
        ))
        .bind(guest_id)
        .bind(limit.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MIGRATOR;

    async fn seed(pool: &PgPool) -> Result<(i32, i32), sqlx::Error> {
        let guest: i32 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password) VALUES ('g', 'g@x.io', 'pw') RETURNING id",
        )
        .fetch_one(pool)
        .await?;
        let property: i32 = sqlx::query_scalar(
            "INSERT INTO properties (owner_id, title, city, cost_per_night) VALUES ($1, 't', 'Banff', 100) RETURNING id",
        )
        .bind(guest)
        .fetch_one(pool)
        .await?;
        Ok((guest, property))
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn ordered_by_start_date_and_limited(pool: PgPool) -> Result<(), DbError> {
        let (guest, property) = seed(&pool).await?;
        for start in ["2024-05-01", "2023-01-10", "2024-01-02", "2022-12-31"] {
            sqlx::query(
                "INSERT INTO reservations (guest_id, property_id, start_date, end_date) \
                 VALUES ($1, $2, $3::date, $3::date + 3)",
            )
            .bind(guest)
            .bind(property)
            .bind(start)
            .execute(&pool)
            .await?;
        }
        sqlx::query("INSERT INTO property_reviews (guest_id, property_id, rating) VALUES ($1, $2, 4), ($1, $2, 5)")
            .bind(guest)
            .bind(property)
            .execute(&pool)
            .await?;

        let rows = ReservationRepo::new(&pool)
            .list_for_guest(guest, Limit::new(3))
            .await?;

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.guest_id == guest));
        assert!(rows.windows(2).all(|w| w[0].start_date <= w[1].start_date));
        assert_eq!(rows[0].start_date, NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
        assert_eq!(rows[0].average_rating, Some(4.5));
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn unreviewed_property_still_listed(pool: PgPool) -> Result<(), DbError> {
        let (guest, property) = seed(&pool).await?;
        sqlx::query(
            "INSERT INTO reservations (guest_id, property_id, start_date, end_date) \
             VALUES ($1, $2, '2024-02-01', '2024-02-03')",
        )
        .bind(guest)
        .bind(property)
        .execute(&pool)
        .await?;

        let rows = ReservationRepo::new(&pool)
            .list_for_guest(guest, Limit::default())
            .await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].average_rating, None);
        assert_eq!(rows[0].property.city, "Banff");
        Ok(())
    }
}

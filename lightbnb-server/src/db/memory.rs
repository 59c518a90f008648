//! In-process gateway
//!
//! Same contract as `PgGateway`, with tables held in `BTreeMap`s behind a
//! `tokio::sync::RwLock`. Used as the test double for handlers and for
//! serving fixture data without a database. Ids come from per-table
//! counters that only move forward.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::gateway::Gateway;
use super::repos::{GuestReservation, Property, PropertyListing, User, UserSummary};
use super::search::PropertySearch;
use super::DbError;
use crate::models::{Email, Limit, NewProperty, NewUser};
use crate::models::rating::{MAX_RATING, MIN_RATING};

#[derive(Debug, Clone)]
struct ReservationRow {
    id: i32,
    guest_id: i32,
    property_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Debug, Clone)]
struct ReviewRow {
    property_id: i32,
    rating: i16,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    properties: BTreeMap<i32, Property>,
    reservations: BTreeMap<i32, ReservationRow>,
    reviews: BTreeMap<i32, ReviewRow>,
    last_user_id: i32,
    last_property_id: i32,
    last_reservation_id: i32,
    last_review_id: i32,
}

impl Tables {
    fn average_rating(&self, property_id: i32) -> Option<f64> {
        let (sum, count) = self
            .reviews
            .values()
            .filter(|r| r.property_id == property_id)
            .fold((0i64, 0i64), |(sum, count), r| {
                (sum + i64::from(r.rating), count + 1)
            });
        (count > 0).then(|| sum as f64 / count as f64)
    }

    fn require_user(&self, resource: &'static str, id: i32) -> Result<(), DbError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DbError::ForeignKey {
                resource,
                detail: format!("user {} does not exist", id),
            })
        }
    }

    fn require_property(&self, resource: &'static str, id: i32) -> Result<(), DbError> {
        if self.properties.contains_key(&id) {
            Ok(())
        } else {
            Err(DbError::ForeignKey {
                resource,
                detail: format!("property {} does not exist", id),
            })
        }
    }
}

/// Gateway over process-local tables
#[derive(Debug, Default)]
pub struct MemoryGateway {
    tables: RwLock<Tables>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reservation. Both references must exist.
    pub async fn insert_reservation(
        &self,
        guest_id: i32,
        property_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<i32, DbError> {
        if end_date < start_date {
            return Err(DbError::Check {
                resource: "reservation",
                detail: format!("end date {} precedes start date {}", end_date, start_date),
            });
        }

        let mut tables = self.tables.write().await;
        tables.require_user("reservation", guest_id)?;
        tables.require_property("reservation", property_id)?;

        tables.last_reservation_id += 1;
        let id = tables.last_reservation_id;
        tables.reservations.insert(
            id,
            ReservationRow {
                id,
                guest_id,
                property_id,
                start_date,
                end_date,
            },
        );
        Ok(id)
    }

    /// Record a review with a rating in 1..=5.
    pub async fn insert_review(
        &self,
        guest_id: i32,
        property_id: i32,
        rating: i16,
    ) -> Result<i32, DbError> {
        if !(MIN_RATING..=MAX_RATING).contains(&f64::from(rating)) {
            return Err(DbError::Check {
                resource: "property_review",
                detail: format!("rating {} is outside {}..={}", rating, MIN_RATING, MAX_RATING),
            });
        }

        let mut tables = self.tables.write().await;
        tables.require_user("property_review", guest_id)?;
        tables.require_property("property_review", property_id)?;

        tables.last_review_id += 1;
        let id = tables.last_review_id;
        tables.reviews.insert(id, ReviewRow { property_id, rating });
        Ok(id)
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn user_by_email(&self, email: &Email) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email == email.as_str())
            .cloned())
    }

    async fn user_summary(&self, id: i32) -> Result<Option<UserSummary>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|u| UserSummary {
            name: u.name.clone(),
        }))
    }

    async fn add_user(&self, user: NewUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email.as_str()) {
            return Err(DbError::Conflict {
                resource: "user",
                detail: format!("email '{}' already registered", user.email.as_str()),
            });
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            name: user.name.into_string(),
            email: user.email.into_string(),
            password: user.password.as_str().to_owned(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn reservations_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<GuestReservation>, DbError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<GuestReservation> = tables
            .reservations
            .values()
            .filter(|r| r.guest_id == guest_id)
            .filter_map(|r| {
                let property = tables.properties.get(&r.property_id)?;
                Some(GuestReservation {
                    reservation_id: r.id,
                    guest_id: r.guest_id,
                    start_date: r.start_date,
                    end_date: r.end_date,
                    property: property.clone(),
                    average_rating: tables.average_rating(property.id),
                })
            })
            .collect();

        rows.sort_by_key(|r| (r.start_date, r.reservation_id));
        rows.truncate(limit.as_usize());
        Ok(rows)
    }

    async fn search_properties(
        &self,
        search: &PropertySearch,
        limit: Limit,
    ) -> Result<Vec<PropertyListing>, DbError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<PropertyListing> = tables
            .properties
            .values()
            .filter_map(|p| {
                let average_rating = tables.average_rating(p.id);
                search.matches(p, average_rating).then(|| PropertyListing {
                    property: p.clone(),
                    average_rating,
                })
            })
            .collect();

        rows.sort_by_key(|l| (l.property.cost_per_night, l.property.id));
        rows.truncate(limit.as_usize());
        Ok(rows)
    }

    async fn add_property(&self, property: NewProperty) -> Result<Property, DbError> {
        let mut tables = self.tables.write().await;
        tables.require_user("property", property.owner_id)?;

        tables.last_property_id += 1;
        let property = Property {
            id: tables.last_property_id,
            owner_id: property.owner_id,
            title: property.title,
            description: property.description,
            thumbnail_photo_url: property.thumbnail_photo_url,
            cover_photo_url: property.cover_photo_url,
            cost_per_night: property.cost_per_night.get(),
            parking_spaces: property.parking_spaces,
            number_of_bathrooms: property.number_of_bathrooms,
            number_of_bedrooms: property.number_of_bedrooms,
            country: property.country,
            street: property.street,
            city: property.city,
            province: property.province,
            post_code: property.post_code,
            active: property.active,
        };
        tables.properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

//! Reservation endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::GuestReservation;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{Limit, LimitParams};

#[derive(Debug, Serialize)]
pub struct ReservationsResponse {
    pub reservations: Vec<GuestReservation>,
}

/// GET /api/users/{id}/reservations - a guest's reservations, earliest first
async fn list_reservations(
    State(state): State<Arc<AppState>>,
    ValidId(guest_id): ValidId,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> Result<Json<ReservationsResponse>, ApiError> {
    let limit = Limit::from(params);
    let reservations = state
        .gateway
        .reservations_for_guest(guest_id, limit)
        .await?;

    Ok(Json(ReservationsResponse { reservations }))
}

/// Reservation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/{id}/reservations", get(list_reservations))
}

//! Property endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::{Property, PropertyListing, PropertySearch, PropertySearchParams};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery};
use crate::http::server::AppState;
use crate::models::PropertyInput;

#[derive(Debug, Serialize)]
pub struct PropertiesResponse {
    pub properties: Vec<PropertyListing>,
}

/// GET /api/properties - search with any combination of filters
async fn search_properties(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PropertySearchParams>,
) -> Result<Json<PropertiesResponse>, ApiError> {
    let limit = params.limit();
    let search = PropertySearch::try_from(params)?;
    let properties = state.gateway.search_properties(&search, limit).await?;

    Ok(Json(PropertiesResponse { properties }))
}

/// POST /api/properties - create a property
async fn create_property(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<PropertyInput>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let property = input.validate()?;
    let property = state.gateway.add_property(property).await?;

    Ok((StatusCode::CREATED, Json(property)))
}

/// Property routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/properties", get(search_properties).post(create_property))
}

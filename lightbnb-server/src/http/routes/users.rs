//! User endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{User, UserSummary};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{Email, NewUser};

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Lookup by email
#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// User response (password never leaves the server)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// Name-only user response
#[derive(Debug, Serialize)]
pub struct UserSummaryResponse {
    pub name: String,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(s: UserSummary) -> Self {
        Self { name: s.name }
    }
}

/// POST /api/users - register a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = NewUser::new(&req.name, &req.email, &req.password)?;
    let user = state.gateway.add_user(user).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users?email= - look up a user by exact email
async fn find_user(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<EmailQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    let email = Email::new(&query.email)?;
    let user = state
        .gateway
        .user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("user", email.as_str()))?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /api/users/{id} - name of a user
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<UserSummaryResponse>, ApiError> {
    let summary = state
        .gateway
        .user_summary(id)
        .await?
        .ok_or_else(|| ApiError::not_found("user", id))?;

    Ok(Json(UserSummaryResponse::from(summary)))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(find_user).post(create_user))
        .route("/api/users/{id}", get(get_user))
}

// Auth HTTP routes

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use evently_contracts::{
    ApiEnvelope, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
};
use evently_storage::Database;

use crate::auth::jwt::TokenIssuer;
use crate::auth::service::AuthService;
use crate::correlation::CorrelationId;
use crate::error::ApiError;
use crate::validate::ValidatedJson;

/// App state for auth routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            service: Arc::new(AuthService::new(db, tokens)),
        }
    }
}

/// Create auth routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .with_state(state)
}

/// POST /auth/register - Create a new account
pub async fn register(
    State(state): State<AppState>,
    correlation: CorrelationId,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<MessageResponse>>), ApiError> {
    let ack = state.service.register(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::new(ack, correlation.0)),
    ))
}

/// POST /auth/login - Exchange credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    correlation: CorrelationId,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiEnvelope<LoginResponse>>, ApiError> {
    let response = state.service.login(input).await?;

    Ok(Json(ApiEnvelope::new(response, correlation.0)))
}

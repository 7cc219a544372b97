// Event CRUD HTTP routes

use std::sync::Arc;

use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use evently_contracts::{ApiEnvelope, CreateEventRequest, Event, MessageResponse, UpdateEventRequest};
use evently_storage::Database;

use crate::auth::{AuthUser, TokenIssuer};
use crate::correlation::CorrelationId;
use crate::error::ApiError;
use crate::services::EventService;
use crate::validate::ValidatedJson;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(db: Arc<Database>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            service: Arc::new(EventService::new(db)),
            tokens,
        }
    }
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

/// Create event routes. Reads are public; mutations require a bearer token.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(state)
}

/// POST /events - Create a new event
pub async fn create_event(
    State(state): State<AppState>,
    correlation: CorrelationId,
    _user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiEnvelope<Event>>), ApiError> {
    let event = state.service.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::new(event, correlation.0)),
    ))
}

/// GET /events - List all events
pub async fn list_events(
    State(state): State<AppState>,
    correlation: CorrelationId,
) -> Result<Json<ApiEnvelope<Vec<Event>>>, ApiError> {
    let events = state.service.list().await?;

    Ok(Json(ApiEnvelope::new(events, correlation.0)))
}

/// GET /events/{id} - Get event by id
pub async fn get_event(
    State(state): State<AppState>,
    correlation: CorrelationId,
    Path(id): Path<i32>,
) -> Result<Json<ApiEnvelope<Event>>, ApiError> {
    let event = state.service.get(id).await?;

    Ok(Json(ApiEnvelope::new(event, correlation.0)))
}

/// PUT /events/{id} - Partially update an event
pub async fn update_event(
    State(state): State<AppState>,
    correlation: CorrelationId,
    Path(id): Path<i32>,
    _user: AuthUser,
    ValidatedJson(changes): ValidatedJson<UpdateEventRequest>,
) -> Result<Json<ApiEnvelope<Event>>, ApiError> {
    let event = state.service.update(id, changes).await?;

    Ok(Json(ApiEnvelope::new(event, correlation.0)))
}

/// DELETE /events/{id} - Delete an event
pub async fn delete_event(
    State(state): State<AppState>,
    correlation: CorrelationId,
    Path(id): Path<i32>,
    _user: AuthUser,
) -> Result<Json<ApiEnvelope<MessageResponse>>, ApiError> {
    let ack = state.service.remove(id).await?;

    Ok(Json(ApiEnvelope::new(ack, correlation.0)))
}

// Evently API server

mod auth;
mod config;
mod correlation;
mod error;
mod events;
mod services;
mod validate;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use evently_storage::Database;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::TokenIssuer;
use crate::config::AppConfig;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evently_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("evently-api starting...");

    // Load .env if present, then build the immutable config. Invalid
    // variables abort startup with every problem listed.
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().context("Invalid environment variables")?;
    tracing::info!(
        port = config.port,
        environment = ?config.environment,
        "Configuration loaded"
    );

    // Initialize database
    let db = Database::from_url(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to run migrations")?;
    tracing::info!("Connected to database");

    let db = Arc::new(db);
    let tokens = Arc::new(TokenIssuer::new(&config.jwt));

    let app = build_app(db, tokens, &config);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Assemble the full router. Pipeline order within one request:
/// correlation-id -> validation (extractors) -> handler -> envelope, with
/// error mapping wrapping all of it via `ApiError: IntoResponse`.
fn build_app(db: Arc<Database>, tokens: Arc<TokenIssuer>, config: &AppConfig) -> Router {
    let auth_state = auth::AppState::new(db.clone(), tokens.clone());
    let events_state = events::AppState::new(db, tokens);

    Router::new()
        .route("/health", get(health))
        .merge(auth::routes(auth_state))
        .merge(events::routes(events_state))
        .layer(middleware::from_fn(correlation::propagate_correlation_id))
        .layer(build_cors(&config.cors_origin))
        .layer(TraceLayer::new_for_http())
}

fn cors_methods() -> [Method; 5] {
    [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

fn cors_headers() -> [HeaderName; 4] {
    [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        HeaderName::from_static(correlation::CORRELATION_ID_HEADER),
    ]
}

/// `*` allows any origin (no credentials); anything else is treated as a
/// comma-separated allow-list with credentials, matching browser rules.
fn build_cors(cors_origin: &str) -> CorsLayer {
    if cors_origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(cors_methods())
            .allow_headers(cors_headers());
    }

    let origins: Vec<HeaderValue> = cors_origin
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(cors_methods())
        .allow_headers(cors_headers())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = Router::new().route("/health", get(health));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}

// Correlation-id propagation.
//
// Runs before every handler: reuse the inbound `x-correlation-id` header or
// mint a fresh UUID, expose it to handlers through request extensions, and
// echo it on the response so clients can correlate logs.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request};
use axum::http::header::HeaderValue;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Request-scoped opaque identifier.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The middleware always inserts the extension; a fresh id here only
        // covers routes mounted outside the layered router.
        Ok(parts
            .extensions
            .get::<CorrelationId>()
            .cloned()
            .unwrap_or_else(|| CorrelationId(Uuid::new_v4().to_string())))
    }
}

/// Middleware stage: must be layered so it runs before handlers and before
/// the response envelope reads the id.
pub async fn propagate_correlation_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(CorrelationId(id.clone()));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new()
            .route(
                "/echo",
                get(|id: CorrelationId| async move { id.0 }),
            )
            .layer(middleware::from_fn(propagate_correlation_id))
    }

    #[tokio::test]
    async fn generates_an_id_when_header_absent() {
        let response = test_app()
            .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("response must carry a correlation id")
            .to_str()
            .unwrap()
            .to_string();
        assert!(Uuid::parse_str(&header).is_ok());

        // Handler saw the same id that went out on the wire
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], header.as_bytes());
    }

    #[tokio::test]
    async fn preserves_an_inbound_id_verbatim() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/echo")
                    .header(CORRELATION_ID_HEADER, "client-supplied-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(CORRELATION_ID_HEADER).unwrap(),
            "client-supplied-id"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"client-supplied-id");
    }
}

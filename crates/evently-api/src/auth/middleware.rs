// Bearer-token extractor for protected routes

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::jwt::TokenIssuer;
use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller, decoded from the `Authorization` header.
/// Using this extractor is what makes a route protected.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<TokenIssuer>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let issuer = Arc::<TokenIssuer>::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(unauthorized)?;

        let claims = issuer.verify(token).map_err(|_| unauthorized())?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Unauthorized".to_string())
}

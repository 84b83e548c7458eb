use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::models::role::AuthRole;
use crate::utils::{time, token};
use crate::AppState;

/// Bearer token payload: the identity, its account type, and the issue and
/// expiry instants as unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub role: AuthRole,
    pub iat: i64,
    pub exp: i64,
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Decodes the bearer token, if any, into request extensions. Requests with
/// a missing, forged or expired token pass through unauthenticated; handlers
/// that need an identity reject them through [`AuthUser`].
pub async fn decode_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let claims = bearer_token(req.headers())
        .and_then(|token| token::verify_token(token, &state.config.jwt_secret, time::now()));

    match claims {
        Some(claims) => {
            req.extensions_mut().insert(claims);
        }
        None if req.headers().contains_key(AUTHORIZATION) => {
            tracing::debug!("Ignoring invalid or expired bearer token");
        }
        None => {}
    }
    next.run(req).await
}

/// Extractor for handlers that require an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| Error::Unauthorized("Unauthorized".to_string()))
    }
}

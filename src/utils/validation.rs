use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Json, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{Error, INVALID_INPUT};

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// JSON body that has been deserialized and passed its `Validate` rules.
/// Malformed bodies are rejected with the same opaque message as rule
/// violations.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(error = %rejection.body_text(), "Malformed JSON body");
                Error::BadRequest(INVALID_INPUT.to_string())
            })?;
        validate(&value)?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(error = %rejection.body_text(), "Invalid query parameters");
                Error::BadRequest("Invalid query parameters".to_string())
            })?;
        Ok(Self(value))
    }
}

/// Path parameters that fail to parse (e.g. a malformed UUID) cannot name
/// an existing record, so they are reported as not found.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(error = %rejection.body_text(), "Invalid path parameter");
                Error::NotFound("Resource not found".to_string())
            })?;
        Ok(Self(value))
    }
}

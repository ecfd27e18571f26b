use axum::{
    async_trait,
    extract::{
        rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    response::Json,
};
use log::warn;
use serde::de::DeserializeOwned;

use crate::api::error::{ApiError, ErrorResponse};

/// JSON request body. Rejections use the same `ErrorResponse` body as every
/// other failure, and type or range errors in the payload are a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

/// Typed path parameters with `ErrorResponse` rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParams<T>(pub T);

/// Typed query string with `ErrorResponse` rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

fn rejected(status: StatusCode, message: String) -> ApiError {
    warn!("Request rejected ({}): {}", status.as_u16(), message);
    (status, Json(ErrorResponse { error: message }))
}

fn json_rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        other => other.status(),
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected(
                json_rejection_status(&rejection),
                rejection.body_text(),
            )),
        }
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected(rejection.status(), rejection.body_text())),
        }
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected(StatusCode::BAD_REQUEST, rejection.body_text())),
        }
    }
}

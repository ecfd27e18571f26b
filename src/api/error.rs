use axum::{http::StatusCode, response::Json};
use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::logic::ServiceError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a service failure into the JSON error body, logging it once.
pub fn api_error(err: ServiceError) -> ApiError {
    let status = status_for(&err);
    match &err {
        ServiceError::Storage(_) => error!("Request failed: {}", err),
        _ => warn!("Request rejected ({}): {}", status.as_u16(), err),
    }
    (status, Json(ErrorResponse::new(&err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ServiceError::validation("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ServiceError::not_found("gone")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ServiceError::conflict("taken")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&ServiceError::Storage(anyhow::anyhow!("down"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_carries_message() {
        let (status, Json(body)) = api_error(ServiceError::validation("ID mismatch."));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "ID mismatch.");
    }
}

//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use osmlinks_domain::error::OsmLinksError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`OsmLinksError`] to an HTTP response with appropriate status code.
pub struct ApiError(OsmLinksError);

impl From<OsmLinksError> for ApiError {
    fn from(err: OsmLinksError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            OsmLinksError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            OsmLinksError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            OsmLinksError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Failure while producing an HTML page.
#[derive(Debug)]
pub struct PageError(askama::Error);

impl From<askama::Error> for PageError {
    fn from(err: askama::Error) -> Self {
        Self(err)
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to render page: {}", self.0)
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "template rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osmlinks_domain::error::{NotFoundError, ValidationError};

    #[test]
    fn should_map_not_found_to_404() {
        let err = ApiError::from(OsmLinksError::from(NotFoundError {
            kind: "Definition",
            id: "x".to_string(),
        }));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_map_validation_to_400() {
        let err = ApiError::from(OsmLinksError::from(ValidationError::InvalidId(
            String::new(),
        )));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_hide_storage_details_behind_500() {
        let err = ApiError::from(OsmLinksError::Storage("disk on fire".into()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

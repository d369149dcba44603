use crate::models::responses::ErrorResponse;
use crate::services::metrics::MetricsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::error::Error;
use tracing::{error, info};

impl MetricsError {
    /// Upstream failures are a bad gateway, absent data is not found, and
    /// anything else is an internal error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MetricsError::NoBooksFound | MetricsError::AuthorNotFound(_) => StatusCode::NOT_FOUND,
            MetricsError::Fetch(_) => StatusCode::BAD_GATEWAY,
            MetricsError::UnitsSoldOverflow => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", error_chain(&self));
        } else {
            info!(status = status.as_u16(), "{}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(" <- ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

use crate::mail::MailError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Quotation error: {0}")]
    Quotation(#[from] tally::QuoteError),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Attaches the summary reported to the client if this error fails the
    /// request.
    pub fn context(self, summary: &'static str) -> ApiError {
        ApiError {
            summary,
            source: self,
        }
    }
}

/// A failed request: the endpoint's summary plus the underlying cause.
#[derive(Debug, thiserror::Error)]
#[error("{summary}: {source}")]
pub struct ApiError {
    pub summary: &'static str,
    #[source]
    pub source: ServiceError,
}

impl From<ServiceError> for ApiError {
    fn from(source: ServiceError) -> Self {
        source.context("Request failed")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.source {
            ServiceError::MissingFields(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": message }),
            ),
            ref source => {
                tracing::error!("{}: {}", self.summary, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "error": self.summary,
                        "details": source.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_a_client_error() {
        let response = ServiceError::MissingFields("Missing required fields").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_errors_are_server_errors() {
        let error = ServiceError::Internal("boom".into()).context("Failed to send email");
        assert_eq!(error.to_string(), "Failed to send email: Internal error: boom");
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

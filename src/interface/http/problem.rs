use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub type ApiResult<T> = Result<T, ApiProblem>;

#[derive(Debug)]
pub struct ApiProblem {
    status: StatusCode,
    title: &'static str,
    detail: String,
    kind: &'static str,
    correlation_id: String,
    cause: Option<String>,
}

impl ApiProblem {
    pub fn from_domain(error: DomainError) -> Self {
        match error {
            DomainError::Validation(detail) => Self::new(
                StatusCode::BAD_REQUEST,
                "Validation failed",
                "https://commands-api.dev/problems/validation",
                detail,
            ),
            DomainError::NotFound(detail) => Self::new(
                StatusCode::NOT_FOUND,
                "Not found",
                "https://commands-api.dev/problems/not-found",
                detail,
            ),
            DomainError::Persistence(cause) => Self::server_error(
                "Persistence error",
                "https://commands-api.dev/problems/persistence",
                cause,
            ),
            DomainError::Internal(cause) => Self::server_error(
                "Internal server error",
                "https://commands-api.dev/problems/internal",
                cause,
            ),
        }
    }

    /// Store and driver messages stay in the log; the client only sees the
    /// correlation id.
    fn server_error(title: &'static str, kind: &'static str, cause: String) -> Self {
        Self {
            cause: Some(cause),
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                title,
                kind,
                "the request could not be completed",
            )
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn new(
        status: StatusCode,
        title: &'static str,
        kind: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status,
            title,
            detail: detail.into(),
            kind,
            correlation_id: Uuid::new_v4().to_string(),
            cause: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProblemDetails {
    #[serde(rename = "type")]
    kind: String,
    title: String,
    status: u16,
    detail: String,
    correlation_id: String,
}

impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        // Clients expect a bare 404 for unknown ids.
        if self.status == StatusCode::NOT_FOUND {
            return self.status.into_response();
        }

        if self.status.is_server_error() {
            error!(
                correlation_id = %self.correlation_id,
                cause = self.cause.as_deref().unwrap_or(&self.detail),
                "request failed"
            );
        }

        let payload = ProblemDetails {
            kind: self.kind.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
            correlation_id: self.correlation_id,
        };

        let mut response = (self.status, Json(payload)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );

        response
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{AnalysisError, ErrorKind};

/// Error payload returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorKind,
    pub detail: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: ErrorKind::InvalidInput,
                detail: detail.into(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidJson | ErrorKind::InvalidShape | ErrorKind::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(kind = ?kind, error = %err, "analysis failed");
        }

        Self {
            status,
            body: ErrorBody {
                error: kind,
                detail: err.user_message(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let input: ApiError = AnalysisError::InvalidInput("short".into()).into();
        assert_eq!(input.status(), StatusCode::BAD_REQUEST);

        let json: ApiError = AnalysisError::InvalidJson("eof".into()).into();
        assert_eq!(json.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let gateway: ApiError = AnalysisError::LlmEmptyResponse.into();
        assert_eq!(gateway.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(gateway.body.error, ErrorKind::InternalError);
        assert_eq!(
            gateway.body.detail,
            "Analysis failed: LLM returned empty response"
        );
    }
}

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;
use crate::errors::{ErrorKind, HoundError};

impl HoundError {
    pub fn status_code(&self) -> StatusCode {
        match self.classify().kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Inconsistency | ErrorKind::Fatal | ErrorKind::Infrastructure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HoundError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            let class = self.classify();
            error!(error_type = class.error_type, error = %self, "Request failed");
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

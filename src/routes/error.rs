// Maps handler failures onto HTTP status codes; GcError variants pick the status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::GcError;

pub(crate) struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(e: E) -> Self {
        ApiError(e.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<GcError>() {
            Some(GcError::InvalidView(_)) => StatusCode::BAD_REQUEST,
            Some(GcError::UnknownLog(_)) => StatusCode::NOT_FOUND,
            Some(GcError::EmptyRecords) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(GcError::UnsupportedKind(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        let body = axum::Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

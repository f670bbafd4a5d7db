use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// A pipeline failure surfaced to the client. Rejected input is a 400,
/// everything else a 500.
#[derive(Debug)]
pub struct ApiError(pub nt_core::Error);

impl From<nt_core::Error> for ApiError {
    fn from(err: nt_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            nt_core::Error::InvalidInput(_) => {
                warn!("Rejected request: {}", self.0);
                StatusCode::BAD_REQUEST
            }
            _ => {
                error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

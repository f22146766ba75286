use axum::http::StatusCode;

pub const MISSING_CLIENT_MESSAGE: &str =
    "Client ID Missing. Please contact your coach to get the correct link.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn missing_client() -> Self {
        Self::bad_request(MISSING_CLIENT_MESSAGE)
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Why a commit could not be forwarded to the webhook. Only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum TransmitError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook responded with status {0}")]
    Status(reqwest::StatusCode),
}

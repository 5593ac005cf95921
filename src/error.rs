use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Failure of the site's checkout hand-off.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The billing backend answered but refused to open a session.
    #[error("Checkout was rejected: {0}")]
    Rejected(String),

    /// The billing backend could not be reached or sent garbage back.
    #[error("Checkout is unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the payment provider's REST API.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider returned an error object.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected provider response: {0}")]
    Decode(String),
}

/// Reasons an incoming webhook is refused.
#[derive(Debug, Error, PartialEq)]
pub enum WebhookError {
    #[error("Missing signature header")]
    MissingSignature,

    #[error("Malformed signature header")]
    MalformedHeader,

    #[error("No signature matches the payload")]
    SignatureMismatch,

    #[error("Timestamp outside the tolerance window")]
    TimestampOutOfTolerance,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// An HTTP error from the billing API, rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
#[error("{detail}")]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        ApiError {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        ApiError::bad_request(e.to_string())
    }
}

/// Malformed or incomplete request bodies keep axum's status (400, 415 or
/// 422) but use the `detail` shape like every other error.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<WebhookError> for ApiError {
    fn from(e: WebhookError) -> Self {
        match e {
            WebhookError::InvalidPayload(_) => ApiError::bad_request("Invalid payload"),
            _ => ApiError::bad_request("Invalid signature"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

/// Failures while writing the static export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

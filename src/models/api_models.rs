use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;

///
/// The JSON envelope every endpoint responds with:
/// `{ success, data?, error?, message?, details? }`
///
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status: StatusCode::OK, success: true, data: Some(data), error: None, message: None, details: None }
    }

    pub fn created(data: T) -> Self {
        Self { status: StatusCode::CREATED, ..Self::ok(data) }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    ///
    /// Builds a failed envelope with the given `status` and `error` text
    ///
    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, success: false, data: None, error: Some(error.into()), message: None, details: None }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self { status: StatusCode::OK, success: true, data: None, error: None, message: Some(message.into()), details: None }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

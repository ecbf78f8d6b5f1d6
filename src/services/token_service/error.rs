use axum::{response::{IntoResponse, Response}, http::StatusCode};
use log::error;
use thiserror::Error;

use crate::models::api_models::ApiResponse;

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Access token expired - please login again")]
    TokenStale,
    #[error("Access token is missing required claims")]
    InvalidClaims,
    #[error("Token secret could not be used as a signing key")]
    InvalidKey,
    #[error("Access token could not be verified")]
    JwtError(jwt::Error)
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        error!("{:?}", self);
        ApiResponse::failure(StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}

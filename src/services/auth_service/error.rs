use axum::{response::{IntoResponse, Response}, http::StatusCode};
use log::error;
use thiserror::Error;

use crate::{data_layer_error::DataLayerError, models::api_models::ApiResponse, services::token_service::error::TokenError};

pub type Result<T> = std::result::Result<T, AuthServiceError>;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("An internal server error has occurred")]
    DataLayerError(DataLayerError),
    #[error("An internal server error has occurred")]
    TokenError(TokenError),
    #[error("Invalid OTP code")]
    InvalidOtp,
    #[error("User not found")]
    UserNotFound(i64),
}

impl From<DataLayerError> for AuthServiceError {
    fn from(e: DataLayerError) -> Self {
        AuthServiceError::DataLayerError(e)
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(e: TokenError) -> Self {
        AuthServiceError::TokenError(e)
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthServiceError::DataLayerError(e) => {
                error!("{:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            },
            AuthServiceError::TokenError(e) => {
                error!("{:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            },
            AuthServiceError::InvalidOtp => StatusCode::UNAUTHORIZED,
            AuthServiceError::UserNotFound(_) => StatusCode::NOT_FOUND,
        };
        ApiResponse::failure(status, self.to_string()).into_response()
    }
}

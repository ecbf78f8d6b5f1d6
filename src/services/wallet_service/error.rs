use axum::{response::{IntoResponse, Response}, http::StatusCode};
use log::error;
use thiserror::Error;

use crate::{data_layer_error::DataLayerError, models::api_models::ApiResponse};

pub type Result<T> = std::result::Result<T, WalletServiceError>;

#[derive(Debug, Error)]
pub enum WalletServiceError {
    #[error("Internal server error")]
    DataLayerError(DataLayerError),
    #[error("Rewards for quest `{0}` were already credited")]
    AlreadyCredited(String),
}

impl From<DataLayerError> for WalletServiceError {
    fn from(e: DataLayerError) -> Self {
        WalletServiceError::DataLayerError(e)
    }
}

impl IntoResponse for WalletServiceError {
    fn into_response(self) -> Response {
        match self {
            WalletServiceError::DataLayerError(e) => {
                error!("{:?}", e);
                ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            },
            _ => ApiResponse::failure(StatusCode::CONFLICT, self.to_string()).into_response()
        }
    }
}

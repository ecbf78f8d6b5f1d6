use axum::{response::{IntoResponse, Response}, http::StatusCode};
use log::error;
use thiserror::Error;

use crate::{data_layer_error::DataLayerError, models::api_models::ApiResponse};

pub type Result<T> = std::result::Result<T, QuestServiceError>;

#[derive(Debug, Error)]
pub enum QuestServiceError {
    #[error("Internal server error")]
    DataLayerError(DataLayerError),
    #[error("Quest not found")]
    QuestNotFound,
    #[error("Quest progress not found")]
    ProgressNotFound,
    #[error("Quest already started or completed")]
    AlreadyStarted,
    #[error("Quest is not available")]
    QuestUnavailable,
    #[error("Quest is not active")]
    NotActive,
    #[error("Quest not completed")]
    NotCompleted,
    #[error("Rewards already claimed")]
    AlreadyClaimed,
    #[error("Quest verification is not enabled")]
    VerificationDisabled,
}

impl From<DataLayerError> for QuestServiceError {
    fn from(e: DataLayerError) -> Self {
        QuestServiceError::DataLayerError(e)
    }
}

impl QuestServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuestServiceError::DataLayerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            QuestServiceError::QuestNotFound | QuestServiceError::ProgressNotFound => StatusCode::NOT_FOUND,
            QuestServiceError::AlreadyStarted | QuestServiceError::AlreadyClaimed => StatusCode::CONFLICT,
            QuestServiceError::VerificationDisabled => StatusCode::FORBIDDEN,
            QuestServiceError::QuestUnavailable
            | QuestServiceError::NotActive
            | QuestServiceError::NotCompleted => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for QuestServiceError {
    fn into_response(self) -> Response {
        if let QuestServiceError::DataLayerError(e) = &self {
            error!("{:?}", e);
        }
        ApiResponse::failure(self.status_code(), self.to_string()).into_response()
    }
}

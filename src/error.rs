use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Every failure the core can report. The API layer maps each variant to an
/// HTTP status; nothing is retried.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("users are already friends")]
    AlreadyFriends,
    #[error("{0}")]
    InvalidArgument(String),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists(_) | ApiError::AlreadyFriends | ApiError::InvalidArgument(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(err) = self {
            log::error!("internal error: {:?}", err);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

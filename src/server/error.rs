use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::trivia::TriviaError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Trivia(#[from] TriviaError),

    #[error("invalid path parameter: {0}")]
    Path(#[from] PathRejection),

    #[error("invalid query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("no such route")]
    RouteNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Trivia(TriviaError::BadRequest | TriviaError::DeleteFailed { .. })
            | Self::Query(_) => StatusCode::BAD_REQUEST,
            Self::Trivia(TriviaError::Unprocessable(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Trivia(TriviaError::NotFound(_)) | Self::Path(_) | Self::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Trivia(TriviaError::CreateFailed(_) | TriviaError::Store(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

fn message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::NOT_FOUND => "Resource not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
        _ => "Internal Server error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: message(status),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::feed::FeedError;
use crate::application::follow::FollowError;
use crate::application::repos::RepoError;
use crate::application::timeline::TimelineError;
use crate::domain::error::DomainError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const NOT_FOUND: &str = "not_found";
    pub const VALIDATION: &str = "validation_failed";
    pub const DB_TIMEOUT: &str = "db_timeout";
    pub const REPO: &str = "repo_error";
    pub const INTERNAL: &str = "internal_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    hint: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            hint,
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            codes::UNAUTHORIZED,
            "Authentication required",
            None,
        )
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            codes::VALIDATION,
            "Request could not be processed",
            Some(detail.into()),
        )
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL,
            "Internal server error",
            Some(detail.into()),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(
            code = self.code,
            status = %self.status,
            hint = self.hint.as_deref().unwrap_or(""),
            "request failed"
        );
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message,
                hint: self.hint,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::NotFound => ApiError::not_found("Resource not found"),
            RepoError::Timeout => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                codes::DB_TIMEOUT,
                "Service temporarily unavailable",
                None,
            ),
            other => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::REPO,
                "Internal server error",
                Some(other.to_string()),
            ),
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(error: FeedError) -> Self {
        match error {
            FeedError::UnknownGroup => ApiError::not_found("Unknown group"),
            FeedError::UnknownUser => ApiError::not_found("Unknown user"),
            FeedError::Repo(repo) => ApiError::from(repo),
        }
    }
}

impl From<FollowError> for ApiError {
    fn from(error: FollowError) -> Self {
        match error {
            FollowError::Unauthorized => ApiError::unauthorized(),
            FollowError::UnknownUser => ApiError::not_found("Unknown user"),
            FollowError::Repo(repo) => ApiError::from(repo),
        }
    }
}

impl From<TimelineError> for ApiError {
    fn from(error: TimelineError) -> Self {
        match error {
            TimelineError::Unauthorized => ApiError::unauthorized(),
            TimelineError::UnknownPost => ApiError::not_found("Unknown post"),
            TimelineError::UnknownGroup => ApiError::not_found("Unknown group"),
            TimelineError::Domain(DomainError::Validation { message }) => {
                ApiError::validation(message)
            }
            TimelineError::Domain(DomainError::NotFound { .. }) => {
                ApiError::not_found("Resource not found")
            }
            TimelineError::Repo(repo) => ApiError::from(repo),
        }
    }
}

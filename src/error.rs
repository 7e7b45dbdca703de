/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - calc / auth / repo / extractor rejection のエラーを統一的に変換
 */
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::RepoError;
use crate::services::auth::{InactiveUser, Unauthorized, revocation::RevocationError};
use crate::services::calc::CalcError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("Could not validate credentials")]
    Unauthorized,
    #[error("validation failed: {message}")]
    Validation { message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let unauthorized = matches!(self, AppError::Unauthorized);

        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                Unauthorized.to_string(),
            ),
            AppError::Validation { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
            }
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{resource} not found."),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        let mut response = (status, Json(body)).into_response();
        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<Unauthorized> for AppError {
    fn from(_: Unauthorized) -> Self {
        AppError::Unauthorized
    }
}

impl From<InactiveUser> for AppError {
    fn from(e: InactiveUser) -> Self {
        AppError::bad_request("INACTIVE_USER", e.to_string())
    }
}

impl From<CalcError> for AppError {
    fn from(e: CalcError) -> Self {
        let code = match &e {
            CalcError::InvalidInput(_) => "INVALID_INPUT",
            CalcError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
            CalcError::DivisionByZero => "DIVISION_BY_ZERO",
            CalcError::DegreeZero => "DEGREE_ZERO",
        };
        AppError::bad_request(code, e.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "repository failure");
        AppError::Internal
    }
}

impl From<RevocationError> for AppError {
    fn from(e: RevocationError) -> Self {
        tracing::error!(error = ?e, "revocation store failure");
        AppError::Internal
    }
}

// Body that is not JSON, or whose shape does not match the DTO
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::validation(e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::validation(e.body_text())
    }
}

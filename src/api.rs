//! Backend Envelope & Errors
//!
//! Every catalog endpoint answers with `{ success, message?, data? }`.
//! Transport failures and logical failures both end up as an [`ApiError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MSG_UNREACHABLE: &str = "Unable to connect to the server. Please check your connection.";
pub const MSG_AUTH_REQUIRED: &str = "Authentication required. Please log in.";
pub const MSG_FORBIDDEN: &str = "You do not have permission to perform this action.";
pub const MSG_NOT_FOUND: &str = "The requested resource was not found.";
pub const MSG_SERVER_ERROR: &str = "Server error. Please try again later.";
pub const MSG_UNKNOWN: &str = "An unexpected error occurred.";

/// Response envelope used by every backend endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, message: None, data: Some(data) }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), data: None }
    }

    /// Unwrap the payload. `success: false` is a logical failure even on HTTP 200.
    pub fn into_data(self, fallback: &str) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::LogicalFailure(self.message.unwrap_or_else(|| fallback.to_string()))),
            (false, _) => Err(ApiError::LogicalFailure(non_empty(self.message).unwrap_or_else(|| fallback.to_string()))),
        }
    }

    /// For endpoints whose payload is empty (`DELETE`).
    pub fn into_unit(self, fallback: &str) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::LogicalFailure(non_empty(self.message).unwrap_or_else(|| fallback.to_string())))
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.is_empty())
}

/// Error class, independent of the message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkUnreachable,
    AuthRequired,
    Forbidden,
    NotFound,
    ServerError,
    LogicalFailure,
    Unknown,
}

/// Classified backend error. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    NetworkUnreachable(String),
    #[error("{0}")]
    AuthRequired(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ServerError(String),
    #[error("{0}")]
    LogicalFailure(String),
    #[error("{0}")]
    Unknown(String),
}

impl ApiError {
    /// Classify a transport status. `message` comes from the error body when the
    /// backend sent an envelope; otherwise the class fallback is used.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let pick = |fallback: &str| non_empty(message.clone()).unwrap_or_else(|| fallback.to_string());
        match status {
            0 => Self::NetworkUnreachable(pick(MSG_UNREACHABLE)),
            401 => Self::AuthRequired(pick(MSG_AUTH_REQUIRED)),
            403 => Self::Forbidden(pick(MSG_FORBIDDEN)),
            404 => Self::NotFound(pick(MSG_NOT_FOUND)),
            500..=599 => Self::ServerError(pick(MSG_SERVER_ERROR)),
            _ => Self::Unknown(pick(MSG_UNKNOWN)),
        }
    }

    pub fn unreachable() -> Self {
        Self::NetworkUnreachable(MSG_UNREACHABLE.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NetworkUnreachable(_) => ErrorKind::NetworkUnreachable,
            Self::AuthRequired(_) => ErrorKind::AuthRequired,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ServerError(_) => ErrorKind::ServerError,
            Self::LogicalFailure(_) => ErrorKind::LogicalFailure,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NetworkUnreachable(m)
            | Self::AuthRequired(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::ServerError(m)
            | Self::LogicalFailure(m)
            | Self::Unknown(m) => m,
        }
    }
}

/// Common result type for backend-facing operations
pub type ApiResult<T> = Result<T, ApiError>;

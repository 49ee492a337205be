use reqwest::StatusCode;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Errors surfaced by the PhotoVault client.
///
/// The transport performs exactly one category of local recovery (clearing
/// the session on a 401 before returning [`AppError::Unauthorized`]); every
/// other failure is passed through to the caller unmodified.
#[derive(Debug)]
pub enum AppError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    Unauthorized,
    NotFound(Option<String>),
    Conflict(Option<String>),
    Unexpected {
        status: StatusCode,
        detail: Option<String>,
    },
    InvalidInput(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Unauthorized => write!(f, "unauthorized"),
            AppError::NotFound(detail) => match detail {
                Some(msg) => write!(f, "not found: {msg}"),
                None => write!(f, "not found"),
            },
            AppError::Conflict(detail) => match detail {
                Some(msg) => write!(f, "conflict: {msg}"),
                None => write!(f, "conflict"),
            },
            AppError::Unexpected { status, detail } => match detail {
                Some(msg) => write!(f, "unexpected http status {status}: {msg}"),
                None => write!(f, "unexpected http status: {status}"),
            },
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl AppError {
    /// Server-supplied detail message, when the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::NotFound(detail)
            | AppError::Conflict(detail)
            | AppError::Unexpected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

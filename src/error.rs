use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::repository::Family;

pub type Result<T> = std::result::Result<T, ContentError>;

/// Everything a content operation can fail with.
///
/// Client-side variants map onto 400/403/404; the rest are server failures and
/// answer with 500. Every variant renders as a plain-text body.
#[derive(Debug)]
pub enum ContentError {
    /// Missing or malformed form field.
    Validation(String),
    /// No credential was submitted at all.
    CredentialMissing,
    /// A credential was submitted but does not match the stored hash.
    CredentialWrong,
    /// Delete confirmation did not repeat the slug.
    ConfirmationMismatch,
    NotFound(String),
    /// The family has no items to show.
    Empty(Family),
    Io(std::io::Error),
    Render(String),
    Internal(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Validation(msg) => write!(f, "{msg}"),
            ContentError::CredentialMissing => write!(f, "key is missing"),
            ContentError::CredentialWrong => write!(f, "key is wrong"),
            ContentError::ConfirmationMismatch => write!(f, "slug does not match"),
            ContentError::NotFound(what) => write!(f, "{what} not found"),
            ContentError::Empty(family) => write!(f, "No {family} here"),
            ContentError::Io(e) => write!(f, "i/o error: {e}"),
            ContentError::Render(msg) => write!(f, "render error: {msg}"),
            ContentError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ContentError {
    fn from(e: std::io::Error) -> Self {
        ContentError::Io(e)
    }
}

impl From<handlebars::RenderError> for ContentError {
    fn from(e: handlebars::RenderError) -> Self {
        ContentError::Render(e.to_string())
    }
}

impl ContentError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ContentError::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        ContentError::NotFound(what.into())
    }
}

impl ResponseError for ContentError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContentError::Validation(_) | ContentError::CredentialMissing => StatusCode::BAD_REQUEST,
            ContentError::CredentialWrong | ContentError::ConfirmationMismatch => {
                StatusCode::FORBIDDEN
            }
            ContentError::NotFound(_) | ContentError::Empty(_) => StatusCode::NOT_FOUND,
            ContentError::Io(_) | ContentError::Render(_) | ContentError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("rejected request: {self}");
        }
        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

use rocket::http::Status;
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;

use std::sync::PoisonError;

#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] rocket::figment::Error),

    #[error("lock poisoned: {0}")]
    Poisoned(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Generic internal error: {0}")]
    Generic(String),
}

impl InternalError {
    pub fn status(&self) -> Status {
        match self {
            InternalError::NotFound(_) => Status::NotFound,
            InternalError::Invalid(_) => Status::UnprocessableEntity,
            InternalError::Unauthorized(_) => Status::Unauthorized,
            _ => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl From<&str> for InternalError {
    fn from(s: &str) -> InternalError {
        InternalError::Generic(s.to_string())
    }
}

impl From<String> for InternalError {
    fn from(s: String) -> InternalError {
        InternalError::Generic(s)
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();

        if status.code >= 500 {
            tracing::error!("{} {} failed: {}", request.method(), request.uri(), self);
        } else {
            tracing::debug!("{} {} rejected: {}", request.method(), request.uri(), self);
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        Response::build_from(body.respond_to(request)?)
            .status(status)
            .ok()
    }
}

pub type InternalResult<T> = Result<T, InternalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_variant() {
        assert_eq!(
            InternalError::NotFound("task".into()).status(),
            Status::NotFound
        );
        assert_eq!(
            InternalError::Unauthorized("Invalid email or password".into()).status(),
            Status::Unauthorized
        );
        assert_eq!(
            InternalError::from("boom").status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn unauthorized_message_is_passed_through() {
        let e = InternalError::Unauthorized("Passwords do not match.".into());
        assert_eq!(e.to_string(), "Passwords do not match.");
    }
}

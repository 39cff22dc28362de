use crate::repository;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reservation_engine::EventId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("event {0} not exist")]
    EventNotExist(EventId),

    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("validation error: event name too long {len}/{max_len}")]
    ValidationNameTooLong { len: usize, max_len: usize },

    #[error("not enough tickets available (available: {available}, requested: {requested})")]
    InsufficientCapacity { requested: u32, available: u32 },

    #[error("reservation error: {0}")]
    Reservation(reservation_engine::Error),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),
}

impl From<reservation_engine::Error> for Error {
    fn from(value: reservation_engine::Error) -> Self {
        match value {
            reservation_engine::Error::InvalidInput(reason) => Error::Validation(reason),
            reservation_engine::Error::EventNotFound(id) => Error::EventNotExist(id),
            reservation_engine::Error::InsufficientCapacity {
                requested,
                available,
                ..
            } => Error::InsufficientCapacity {
                requested,
                available,
            },
            err => Error::Reservation(err),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let status = match self {
            Error::EventNotExist(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::ValidationNameTooLong { len: _, max_len: _ } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InsufficientCapacity {
                requested: _,
                available: _,
            } => StatusCode::CONFLICT,
            Error::Reservation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // internal details stay in the log
        let body = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}

use thiserror::Error;
use crate::actor_framework::FrameworkError;
use crate::domain::ReservationError;

/// Errors that can occur during room and reservation operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HotelError {
    #[error("Room not found: {0}")]
    UnknownRoom(u32),
    #[error("Already registered: {0}")]
    AlreadyExists(String),
    #[error("Not available: {0}")]
    Unavailable(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Invalid reservation: {0}")]
    Validation(#[from] ReservationError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for HotelError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => HotelError::NotFound(id),
            FrameworkError::AlreadyExists(id) => HotelError::AlreadyExists(id),
            FrameworkError::Conflict(reason) => HotelError::Unavailable(reason),
            FrameworkError::Rejected(reason) => HotelError::Rejected(reason),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                HotelError::ActorCommunicationError(e.to_string())
            }
        }
    }
}

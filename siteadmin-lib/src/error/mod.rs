//! Error types

mod api;
mod auth;
mod field;
mod validation;

pub use api::*;
pub use auth::*;
pub use field::*;
pub use validation::*;

/// Top-level error returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Authentication failed or no token is available.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A form did not pass its schema.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A file attached to a multipart payload could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation is not supported for the given resource.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl Error {
    /// Returns the HTTP status code if the backend answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status_code(),
            _ => None,
        }
    }
}

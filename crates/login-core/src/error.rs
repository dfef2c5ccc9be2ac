//! Unified error handling for login-core

use thiserror::Error;

/// Core error type for login-core.
///
/// The first six variants are the closed set of domain failures that
/// `register` and `login` can surface; the remaining variants wrap
/// unexpected internal faults (database, crypto, io) and are never part
/// of the operation contracts.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid email format")]
    InvalidEmailFormat,

    #[error("invalid password format")]
    InvalidPasswordFormat,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error("malformed token")]
    MalformedToken,

    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("token signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for login-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for the domain failures a transport adapter should report as a
    /// caller mistake; false for internal faults.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidEmailFormat
                | Error::InvalidPasswordFormat
                | Error::UserAlreadyExists
                | Error::UserNotFound
                | Error::MalformedToken
                | Error::InvalidOrExpiredToken
        )
    }
}

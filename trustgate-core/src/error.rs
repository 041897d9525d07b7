use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Unknown account: {0}")]
    UnknownAccount(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("History store timed out")]
    Timeout,
}

impl Error {
    /// True for dependency failures the caller may treat as "history unavailable"
    /// and resolve with its own fail-open or fail-closed policy.
    pub fn is_history_unavailable(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    pub fn is_unknown_account(&self) -> bool {
        matches!(self, Error::Account(AccountError::UnknownAccount(_)))
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(ValidationError::MissingField(_))
                | Error::Validation(ValidationError::InvalidField(_))
                | Error::Validation(ValidationError::InvalidConfig(_))
        )
    }
}

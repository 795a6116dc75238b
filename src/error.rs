//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Account or password left blank
    #[error("Account and password cannot be empty")]
    EmptyCredentials,

    /// Password and confirmation differ
    #[error("The two passwords do not match")]
    PasswordMismatch,

    /// Registration with an account that is already taken
    #[error("Account '{0}' already exists")]
    AccountExists(String),

    /// Login or reset for an unknown account
    #[error("Account '{0}' does not exist, please register first")]
    AccountNotFound(String),

    /// Password check failed
    #[error("Wrong password")]
    WrongPassword,
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether this error comes from the login/registration checks rather than I/O.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::EmptyCredentials
                | Self::PasswordMismatch
                | Self::AccountExists(_)
                | Self::AccountNotFound(_)
                | Self::WrongPassword
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_errors() {
        assert!(AppError::WrongPassword.is_user_input());
        assert!(AppError::AccountExists("bob".to_string()).is_user_input());
        assert!(!AppError::config("bad").is_user_input());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::AccountExists("bob".to_string()).to_string(),
            "Account 'bob' already exists"
        );
        assert_eq!(AppError::validation("x").to_string(), "Validation error: x");
    }
}

//! Account DTOs for registration and password reset.

use serde::{Deserialize, Serialize};

/// DTO for registering an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub account: String,
    pub password: String,
    pub confirm: String,
}

/// DTO for resetting a password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetForm {
    pub account: String,
    pub password: String,
    pub confirm: String,
}

use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    BadRequest(String),
    NotFound(String),
    CurrentUserNotFound(String),
    InvalidSeed(String),
    InternalError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            StoreError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            StoreError::CurrentUserNotFound(id) => {
                write!(f, "Current user {} is not among the users", id)
            }
            StoreError::InvalidSeed(msg) => write!(f, "Invalid Seed: {}", msg),
            StoreError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl StoreError {
    /// JSON body printed by the shell for a failed command.
    pub fn to_json(&self) -> serde_json::Value {
        let kind = match self {
            StoreError::BadRequest(_) => "bad_request",
            StoreError::NotFound(_) => "not_found",
            StoreError::CurrentUserNotFound(_) => "current_user_not_found",
            StoreError::InvalidSeed(_) => "invalid_seed",
            StoreError::InternalError(_) => "internal",
        };
        serde_json::json!({"error": kind, "message": self.to_string()})
    }
}

impl std::error::Error for StoreError {}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidSeed(err.to_string())
    }
}

use thiserror::Error;

/// Failures raised by a `UserStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Username '{username}' already exists")]
    Conflict { username: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User store is closed")]
    Unavailable,
}

impl StoreError {
    pub fn conflict(username: impl Into<String>) -> Self {
        Self::Conflict {
            username: username.into(),
        }
    }

    /// Stable tag used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "conflict",
            Self::Database(_) => "database",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Everything that can stop a registration from producing an `Ack`.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Username and password are required")]
    Validation,

    #[error("Malformed registration payload: {0}")]
    Decode(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to hash password: {0}")]
    Credential(String),
}

impl RegistrationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Decode(_) => "decode",
            Self::Store(err) => err.kind(),
            Self::Credential(_) => "credential",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_matches_wire_text() {
        assert_eq!(
            RegistrationError::Validation.to_string(),
            "Username and password are required"
        );
    }

    #[test]
    fn test_store_error_kind_passes_through() {
        let err = RegistrationError::from(StoreError::conflict("alice"));
        assert_eq!(err.kind(), "conflict");
        assert_eq!(err.to_string(), "Username 'alice' already exists");
    }
}

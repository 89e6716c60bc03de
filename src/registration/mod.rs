//! Registration shared by the HTTP and socket front ends.
//!
//! `Registrar::register` validates, optionally hashes and issues a single
//! `UserStore::create`. A front end implements `Transport` to turn the outcome
//! into its own reply type.

pub mod password;

use serde::Deserialize;
use std::sync::Arc;

use crate::db::UserStore;
use crate::error::RegistrationError;

pub use password::{Argon2Hasher, PasswordHasher};

/// Credentials as submitted. Fields are optional so that absence can be
/// reported as a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl RegistrationRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields present and non-empty. Whitespace is kept as submitted.
    fn credentials(&self) -> Result<(&str, &str), RegistrationError> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok((username, password))
            }
            _ => Err(RegistrationError::Validation),
        }
    }
}

/// Success acknowledgment. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub id: String,
    pub username: String,
}

/// Renders a registration outcome for one front end.
pub trait Transport {
    type Reply;

    fn acknowledge(&self, ack: Ack) -> Self::Reply;

    fn reject(&self, error: RegistrationError) -> Self::Reply;
}

#[derive(Clone)]
pub struct Registrar {
    store: Arc<dyn UserStore>,
    hasher: Option<Arc<dyn PasswordHasher>>,
}

impl Registrar {
    /// Passwords are stored as submitted.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            hasher: None,
        }
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub async fn register(&self, request: &RegistrationRequest) -> Result<Ack, RegistrationError> {
        let (username, password) = request.credentials()?;

        let stored_password = match &self.hasher {
            // Hashing is CPU-bound and runs on the blocking pool
            Some(hasher) => {
                let hasher = Arc::clone(hasher);
                let password = password.to_string();
                tokio::task::spawn_blocking(move || hasher.hash(&password))
                    .await
                    .map_err(|e| RegistrationError::Credential(e.to_string()))??
            }
            None => password.to_string(),
        };

        let user = self.store.create(username, &stored_password).await?;

        Ok(Ack {
            id: user.id,
            username: user.username,
        })
    }

    pub async fn respond<T: Transport>(
        &self,
        transport: &T,
        request: &RegistrationRequest,
    ) -> T::Reply {
        match self.register(request).await {
            Ok(ack) => transport.acknowledge(ack),
            Err(err) => transport.reject(err),
        }
    }
}

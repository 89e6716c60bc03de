use serde::Serialize;
use std::fmt;

use crate::db::User;
use crate::error::{RegistrationError, StoreError};

/// Fixed reply for any failed socket message. Decode and store failures are
/// deliberately indistinguishable to the client.
pub const SOCKET_ERROR_REPLY: &str = "Error: Invalid message or DB issue";

/// Outbound text frame on the socket port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketReply {
    Connected { username: String },
    Error,
}

impl fmt::Display for SocketReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected { username } => write!(f, "{username} connected"),
            Self::Error => f.write_str(SOCKET_ERROR_REPLY),
        }
    }
}

/// `POST /user` success body.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub id: String,
}

impl SignupResponse {
    pub fn new(id: String) -> Self {
        Self {
            message: "user succesfully signed up",
            id,
        }
    }
}

/// `GET /` success body.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub response: Vec<User>,
    pub whoops: &'static str,
}

impl UserListResponse {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            response: users,
            whoops: "hello",
        }
    }
}

/// `{ "error": "..." }` body for rejected input.
#[derive(Debug, Serialize)]
pub struct ValidationErrorBody {
    pub error: String,
}

/// Failure detail passed through from the store (or hasher) as-is.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub kind: &'static str,
    pub message: String,
}

impl From<&StoreError> for FailureBody {
    fn from(err: &StoreError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<&RegistrationError> for FailureBody {
    fn from(err: &RegistrationError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    // Whatever the registrar handed to the store: plaintext unless hashing is enabled
    pub password: String,
}

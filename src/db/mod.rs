pub mod memory;
pub mod models;
pub mod repo;

use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::StoreError;

pub use memory::InMemoryUserStore;
pub use models::User;
pub use repo::{SqliteUserStore, UserStore};

/// Open the store named by the configuration.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn UserStore>, StoreError> {
    if config.url == "memory" {
        return Ok(Arc::new(InMemoryUserStore::new()));
    }

    let store = SqliteUserStore::connect(&config.url, config.max_connections).await?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_url_opens_in_process_store() {
        let config = DatabaseConfig {
            url: "memory".to_string(),
            max_connections: 5,
        };
        let store = open_store(&config).await.unwrap();

        store.create("alice", "pw1").await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        // Only the in-process store reports a closed store this way
        store.close().await;
        let err = store.create("bob", "pw2").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable));
    }

    #[tokio::test]
    async fn test_sqlite_url_opens_migrated_database() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
        };
        let store = open_store(&config).await.unwrap();

        let user = store.create("alice", "pw1").await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![user]);

        store.close().await;
        let err = store.create("bob", "pw2").await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }
}

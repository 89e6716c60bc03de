use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use uuid::Uuid;

use crate::db::models::User;
use crate::error::StoreError;

/// Persistence boundary shared by both front ends.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user with a freshly assigned id.
    async fn create(&self, username: &str, password: &str) -> Result<User, StoreError>;

    /// Every stored user in creation order.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Release the underlying resources. Calls made afterwards fail.
    async fn close(&self) {}
}

pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub async fn connect(db_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));

        // Each connection to an in-memory database sees its own empty database,
        // so keep exactly one alive for the lifetime of the pool
        if db_url.contains(":memory:") || db_url.contains("mode=memory") {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        create_user_table(&pool).await?;

        Ok(Self { pool })
    }
}

pub async fn create_user_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create(&self, username: &str, password: &str) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, password)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::conflict(username))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteUserStore {
        SqliteUserStore::connect("sqlite::memory:", 5).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_keeps_fields_verbatim() {
        let store = memory_store().await;

        let user = store.create("  Alice ", "pw1").await.unwrap();
        assert!(!user.id.is_empty());
        assert_eq!(user.username, "  Alice ");
        assert_eq!(user.password, "pw1");

        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![user]);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let store = memory_store().await;

        store.create("alice", "pw1").await.unwrap();
        let err = store.create("alice", "pw2").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { ref username } if username == "alice"));

        // Case is not folded, so this is a different user
        store.create("Alice", "pw3").await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_all_in_creation_order() {
        let store = memory_store().await;

        for name in ["carol", "alice", "bob"] {
            store.create(name, "pw").await.unwrap();
        }

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }

    #[tokio::test]
    async fn test_migration_is_idempotent() {
        let store = memory_store().await;
        create_user_table(&store.pool).await.unwrap();
        store.create("alice", "pw").await.unwrap();
    }

    #[tokio::test]
    async fn test_calls_after_close_fail() {
        let store = memory_store().await;
        store.close().await;

        let err = store.create("alice", "pw").await.unwrap_err();
        assert_eq!(err.kind(), "database");
    }
}

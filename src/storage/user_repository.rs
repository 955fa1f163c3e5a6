use sqlx::SqlitePool;

use super::page::{Page, PageRequest, Source};
use crate::{error::Result, model::User, validation};

const COLUMNS: &str = "id, username";

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    fn source(&self) -> Source<'a> {
        Source {
            table: "users",
            columns: COLUMNS,
            scope: None,
            pool: self.pool,
        }
    }

    /// Insert a user. A taken username surfaces as the database's unique
    /// constraint error.
    pub async fn create(&self, username: &str) -> Result<User> {
        tracing::info!(username = %username, "Creating user");
        validation::validate_username(username)?;

        let user: User = sqlx::query_as(
            "INSERT INTO users (username) VALUES (?) RETURNING id, username",
        )
        .bind(username)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Exact, case-sensitive match on username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE username = ? LIMIT 1")
                .bind(username)
                .fetch_optional(self.pool)
                .await?;
        Ok(user)
    }

    /// All users in primary-key order.
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, username FROM users ORDER BY id ASC")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    pub async fn page(&self, req: &PageRequest) -> Result<Page<User>> {
        self.source().page(req).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.source().count().await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::BlogError;
    use crate::storage::Database;
    use tempfile::TempDir;

    async fn open_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("data.sqlite"), 1)
            .await
            .unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (_dir, db) = open_db().await;
        let user = db.users().create("john2").await.unwrap();
        assert_eq!(user.username, "john2");

        let found = db.users().find_by_username("john2").await.unwrap();
        assert_eq!(found, Some(user.clone()));
        assert_eq!(db.users().get(user.id).await.unwrap(), Some(user));
        assert!(db.users().find_by_username("John2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_database_error() {
        let (_dir, db) = open_db().await;
        db.users().create("john2").await.unwrap();
        let err = db.users().create("john2").await.unwrap_err();
        assert!(matches!(err, BlogError::Database(_)));
        assert_eq!(db.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_username_rejected() {
        let (_dir, db) = open_db().await;
        let err = db.users().create("").await.unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let (_dir, db) = open_db().await;
        for name in ["carol", "alice", "bob"] {
            db.users().create(name).await.unwrap();
        }
        let names: Vec<String> = db
            .users()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }
}

use sqlx::SqlitePool;

use super::page::{Page, PageRequest, Source};
use crate::{
    error::Result,
    model::{NewPost, Post},
    validation,
};

const COLUMNS: &str = "id, title, body, author_id";

pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    fn source(&self, author_id: Option<i64>) -> Source<'a> {
        Source {
            table: "posts",
            columns: COLUMNS,
            scope: author_id.map(|id| ("author_id", id)),
            pool: self.pool,
        }
    }

    /// Insert a post. Every call inserts a new row, identical posts
    /// included.
    pub async fn create(&self, post: &NewPost) -> Result<Post> {
        tracing::info!(title = %post.title, author_id = ?post.author_id, "Creating post");
        validation::validate_title(&post.title)?;

        let created: Post = sqlx::query_as(
            r#"
            INSERT INTO posts (title, body, author_id)
            VALUES (?, ?, ?)
            RETURNING id, title, body, author_id
            "#,
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.author_id)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, title, body, author_id FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    pub async fn page(&self, req: &PageRequest) -> Result<Page<Post>> {
        self.source(None).page(req).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.source(None).count().await
    }

    pub async fn page_by_author(&self, author_id: i64, req: &PageRequest) -> Result<Page<Post>> {
        self.source(Some(author_id)).page(req).await
    }

    pub async fn count_by_author(&self, author_id: i64) -> Result<i64> {
        self.source(Some(author_id)).count().await
    }
}

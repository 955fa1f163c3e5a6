use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
}

/// A post that has not been written to the database yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author_id: Option<i64>,
}

impl NewPost {
    pub fn new(title: String, body: String) -> Self {
        Self {
            title,
            body,
            author_id: None,
        }
    }

    pub fn with_author(mut self, author_id: Option<i64>) -> Self {
        self.author_id = author_id;
        self
    }
}

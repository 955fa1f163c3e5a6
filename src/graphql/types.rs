use async_graphql::connection;
use async_graphql::{Context, ID, Interface, Object, SimpleObject};

use super::relay::{GlobalId, NodeType, RowConnection, RowCursor};
use super::relay::{into_connection, page_request};
use crate::error::BlogError;
use crate::model;
use crate::storage::Database;

pub(crate) fn database<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Database> {
    ctx.data::<Database>()
}

/// Any object addressable by a global id.
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID"))]
pub enum Node {
    User(User),
    Post(Post),
}

pub struct User(pub model::User);

impl From<model::User> for User {
    fn from(user: model::User) -> Self {
        Self(user)
    }
}

#[Object]
impl User {
    /// Global object id
    async fn id(&self) -> ID {
        GlobalId::new(NodeType::User, self.0.id).into()
    }

    /// Primary key in the users table
    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    /// Posts written by this user, oldest first
    async fn posts(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<RowConnection<Post>> {
        let db = database(ctx)?;
        let author_id = self.0.id;
        connection::query(
            after,
            before,
            first,
            last,
            |after: Option<RowCursor>,
             before: Option<RowCursor>,
             first: Option<usize>,
             last: Option<usize>| async move {
                let req = page_request(after, before, first, last);
                let page = db.posts().page_by_author(author_id, &req).await?;
                let total = db.posts().count_by_author(author_id).await?;
                Ok::<_, BlogError>(into_connection(page, total, |p: &model::Post| p.id))
            },
        )
        .await
    }
}

pub struct Post(pub model::Post);

impl From<model::Post> for Post {
    fn from(post: model::Post) -> Self {
        Self(post)
    }
}

#[Object]
impl Post {
    /// Global object id
    async fn id(&self) -> ID {
        GlobalId::new(NodeType::Post, self.0.id).into()
    }

    /// Primary key in the posts table
    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn body(&self) -> &str {
        &self.0.body
    }

    /// Null when the post was created for an unknown username
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<User>> {
        let Some(author_id) = self.0.author_id else {
            return Ok(None);
        };
        let db = database(ctx)?;
        Ok(db.users().get(author_id).await?.map(User::from))
    }
}

#[derive(SimpleObject)]
pub struct CreatePostPayload {
    pub post: Post,
}

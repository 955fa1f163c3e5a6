use async_graphql::{Context, EmptySubscription, ID, Object, Schema};

use super::relay::{GlobalId, NodeType, RowConnection, RowCursor, into_connection, page_request};
use super::types::*;
use crate::error::BlogError;
use crate::model::{self, NewPost};
use crate::storage::Database;

pub type BlogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema once; the database handle travels as schema data.
pub fn build_schema(db: Database) -> BlogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .finish()
}

/// Schema definition language for the blog schema.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch any object by its global id
    async fn node(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Node>> {
        let global = match GlobalId::decode(&id.0) {
            Ok(global) => global,
            Err(e) => {
                tracing::debug!(error = %e, "Unresolvable node id");
                return Ok(None);
            }
        };

        let db = database(ctx)?;
        let node = match global.node_type {
            NodeType::User => db.users().get(global.id).await?.map(|u| Node::User(u.into())),
            NodeType::Post => db.posts().get(global.id).await?.map(|p| Node::Post(p.into())),
        };
        Ok(node)
    }

    /// All users in creation order
    async fn all_users(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<RowConnection<User>> {
        let db = database(ctx)?;
        async_graphql::connection::query(
            after,
            before,
            first,
            last,
            |after: Option<RowCursor>,
             before: Option<RowCursor>,
             first: Option<usize>,
             last: Option<usize>| async move {
                let req = page_request(after, before, first, last);
                let page = db.users().page(&req).await?;
                let total = db.users().count().await?;
                Ok::<_, BlogError>(into_connection(page, total, |u: &model::User| u.id))
            },
        )
        .await
    }

    /// All posts in creation order
    async fn all_posts(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<RowConnection<Post>> {
        let db = database(ctx)?;
        async_graphql::connection::query(
            after,
            before,
            first,
            last,
            |after: Option<RowCursor>,
             before: Option<RowCursor>,
             first: Option<usize>,
             last: Option<usize>| async move {
                let req = page_request(after, before, first, last);
                let page = db.posts().page(&req).await?;
                let total = db.posts().count().await?;
                Ok::<_, BlogError>(into_connection(page, total, |p: &model::Post| p.id))
            },
        )
        .await
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a post. The author is the user with exactly this username;
    /// when there is none the post is stored without an author.
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1))] title: String,
        body: String,
        username: String,
    ) -> async_graphql::Result<CreatePostPayload> {
        let db = database(ctx)?;
        let author = db.users().find_by_username(&username).await?;
        if author.is_none() {
            tracing::debug!(username = %username, "No such user, post will have no author");
        }

        let new_post = NewPost::new(title, body).with_author(author.map(|u| u.id));
        let post = db.posts().create(&new_post).await?;

        Ok(CreatePostPayload { post: post.into() })
    }
}

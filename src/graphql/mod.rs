//! GraphQL schema and resolvers for the blog.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server (GraphiQL on GET /graphql)
//! blogql serve --port 5000
//!
//! # Execute a query from CLI
//! blogql query '{ allPosts(first: 10) { edges { node { title author { username } } } } }'
//!
//! # Execute a mutation from CLI
//! blogql mutate 'createPost(title: "Hello", body: "...", username: "john2") { post { id } }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `node`, `allUsers`, `allPosts`
//! - **Mutations**: `createPost`

mod relay;
mod schema;
mod types;

pub use relay::{GlobalId, NodeType, RowCursor};
pub use schema::{BlogSchema, MutationRoot, QueryRoot, build_schema, schema_sdl};
pub use types::*;

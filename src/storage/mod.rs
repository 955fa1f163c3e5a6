//! SQLite storage layer for users and posts.
//!
//! The schema lives in `schema.sql` and is applied on every open; all
//! statements are `IF NOT EXISTS`, so opening an existing file is a no-op.
//!
//! ## Components
//!
//! - [`Database`]: connection pool and schema setup
//! - [`UserRepository`]: user lookups and out-of-band seeding
//! - [`PostRepository`]: post inserts and lookups
//! - [`PageRequest`] / [`Page`]: keyset pagination over primary keys

mod database;
mod page;
mod post_repository;
mod user_repository;

pub use database::Database;
pub use page::{Page, PageRequest};
pub use post_repository::PostRepository;
pub use user_repository::UserRepository;

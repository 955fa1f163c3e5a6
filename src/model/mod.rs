//! Data models for the blog.
//!
//! - [`User`]: an author, unique by username
//! - [`Post`]: a blog post, optionally written by a [`User`]

mod post;
mod user;

pub use post::{NewPost, Post};
pub use user::User;

//! # blogql - a minimal blog backend over GraphQL
//!
//! Users and posts live in a SQLite file and are served through a single
//! GraphQL endpoint with Relay-style node lookup and connections.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create blogql.yml and data.sqlite
//! blogql init
//!
//! # Seed an author
//! blogql user add john2
//!
//! # Serve /graphql (GraphiQL included) and / (liveness)
//! blogql serve
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema and resolvers
//! - [`model`]: Data models (User, Post)
//! - [`server`]: HTTP routes
//! - [`storage`]: SQLite storage
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading.
///
/// Handles the optional `blogql.yml` file.
pub mod config;

/// Error types and result aliases.
///
/// Defines `BlogError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
pub mod graphql;

/// Data models for the blog.
pub mod model;

pub mod logging;
pub mod server;

/// SQLite storage layer.
///
/// Connection pool, schema setup, and repositories for users and posts.
pub mod storage;

/// Input validation utilities.
pub mod validation;

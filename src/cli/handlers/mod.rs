mod init;
mod mutate;
mod query;
mod schema;
mod serve;
mod user;

pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;
pub use user::handle_user;

use crate::config::BlogConfig;
use crate::graphql::BlogSchema;
use crate::storage::Database;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: BlogConfig,
    pub root: PathBuf,
    pub db_path: PathBuf,
}

impl CommandContext {
    /// Load config from `config_path` (or the working directory) and apply
    /// the database override.
    pub fn load(config_path: Option<&Path>, db_override: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let (config, root) =
            BlogConfig::load(config_path, &cwd).context("Failed to load config")?;
        let db_path = db_override.unwrap_or_else(|| config.database_path(&root));
        Ok(Self {
            config,
            root,
            db_path,
        })
    }

    pub async fn open_database(&self) -> Result<Database> {
        Database::open(&self.db_path, self.config.database.max_connections)
            .await
            .with_context(|| format!("Failed to open database {}", self.db_path.display()))
    }
}

/// Execute a GraphQL document and print the JSON response. Fails when the
/// response carries errors.
fn execute_and_print(
    runtime: &tokio::runtime::Runtime,
    schema: &BlogSchema,
    query: &str,
    variables: Option<String>,
) -> Result<()> {
    let vars: async_graphql::Variables = match variables {
        Some(v) => serde_json::from_str(&v).context("Variables must be a JSON object")?,
        None => async_graphql::Variables::default(),
    };

    let request = async_graphql::Request::new(query).variables(vars);
    let response = runtime.block_on(schema.execute(request));

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.errors.is_empty() {
        anyhow::bail!("GraphQL request returned {} error(s)", response.errors.len());
    }
    Ok(())
}

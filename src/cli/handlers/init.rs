use crate::config::{BlogConfig, CONFIG_FILE_NAME};
use crate::storage::Database;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub fn handle_init(config_path: Option<PathBuf>, db_path: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = config_path.unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));

    if config_path.exists() {
        anyhow::bail!("Project already initialized at {}", config_path.display());
    }

    let mut config = BlogConfig::default();
    if let Some(path) = db_path {
        config.database.path = path.to_string_lossy().into_owned();
    }

    config.save(&config_path)?;

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or(cwd);
    let data_path = config.database_path(&root);

    tokio::runtime::Runtime::new()?.block_on(async {
        let db = Database::open(&data_path, 1).await?;
        db.close().await;
        Ok::<_, crate::error::BlogError>(())
    })?;

    println!("{} blog in {}", "Initialized".green(), root.display());
    println!("  Config:   {}", config_path.display());
    println!("  Database: {}", data_path.display());

    Ok(())
}

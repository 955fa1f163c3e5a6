use crate::error::{BlogError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "blogql.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve the GraphiQL console on `GET /graphql`.
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_graphiql() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            graphiql: default_graphiql(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, relative paths resolve against the config's directory.
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data.sqlite".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl BlogConfig {
    /// Load the config from an explicit path, or from `blogql.yml` in
    /// `base_dir` when present. Falls back to defaults rooted at `base_dir`.
    ///
    /// Returns the config together with the directory relative paths are
    /// resolved against.
    pub fn load(explicit: Option<&Path>, base_dir: &Path) -> Result<(Self, PathBuf)> {
        let config_path = match explicit {
            Some(path) if !path.exists() => {
                return Err(BlogError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = base_dir.join(CONFIG_FILE_NAME);
                if !candidate.exists() {
                    return Ok((Self::default(), base_dir.to_path_buf()));
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&config_path)?;
        let config: BlogConfig = if content.trim().is_empty() {
            BlogConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        let root = config_path
            .parent()
            .map(|p| {
                if p.as_os_str().is_empty() {
                    base_dir.to_path_buf()
                } else {
                    p.to_path_buf()
                }
            })
            .ok_or_else(|| BlogError::Config("Config file has no parent directory".to_string()))?;
        Ok((config, root))
    }

    pub fn database_path(&self, root: &Path) -> PathBuf {
        root.join(&self.database.path)
    }

    /// Write the config atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(path).map_err(|e| BlogError::Io(e.error))?;
        Ok(())
    }
}

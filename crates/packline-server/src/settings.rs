//! Runtime server configuration.
//!
//! Layered, lowest precedence first: built-in defaults, the optional TOML
//! file, then `PACKLINE_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Runtime server configuration, deserialised from `packline.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// Path to the SQLite database file. A leading `~/` is expanded.
  pub database_path: PathBuf,
  /// Prefix the API is mounted under; empty or `/` mounts it at the root.
  pub base_path:     String,
}

impl ServerConfig {
  /// Load configuration from `file` (if it exists) and the environment.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("database_path", "packline.db")?
      .set_default("base_path", "/api")?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("PACKLINE"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The mount prefix, or `None` when the API sits at the root.
  pub fn mount_prefix(&self) -> Option<String> {
    let trimmed = self.base_path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
      None
    } else if trimmed.starts_with('/') {
      Some(trimmed.to_owned())
    } else {
      Some(format!("/{trimmed}"))
    }
  }

  /// `database_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

//! Persisted database configuration and the "allow signed keys" property

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::database::constants::DEFAULT_TABLE_PREFIX;
use crate::error::ConfigError;

/// Read/write access to the deployment-wide configuration properties
pub trait ConfigStore {
    fn allow_signed_keys(&self) -> Result<bool, ConfigError>;

    fn set_allow_signed_keys(&mut self, allow: bool) -> Result<(), ConfigError>;
}

/// Contents of the database configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    /// Schemas created before the unsigned conversion still carry signed keys
    #[serde(default = "default_allow_signed_keys")]
    pub allow_signed_keys: bool,
    /// Properties owned by other tools, kept verbatim on rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_table_prefix() -> String {
    DEFAULT_TABLE_PREFIX.to_string()
}

fn default_allow_signed_keys() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            database_url: None,
            table_prefix: default_table_prefix(),
            allow_signed_keys: default_allow_signed_keys(),
            extra: Map::new(),
        }
    }
}

/// JSON file backed configuration store
#[derive(Debug)]
pub struct FileConfigStore {
    path: PathBuf,
    config: DatabaseConfig,
}

impl FileConfigStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath {
                path,
                reason: "empty path".to_string(),
            });
        }
        if path.is_dir() {
            return Err(ConfigError::InvalidPath {
                path,
                reason: "is a directory".to_string(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        debug!("Loaded database configuration from {:?}", path);
        Ok(FileConfigStore { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Written to a temporary file next to the resolved target, then renamed
    /// over it. The target keeps its permission bits and any symlink pointing
    /// at it stays in place.
    fn write(&self, config: &DatabaseConfig) -> Result<(), ConfigError> {
        let mut body = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        body.push('\n');

        let target = fs::canonicalize(&self.path).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        let permissions = fs::metadata(&target)
            .map_err(|source| ConfigError::Write {
                path: target.clone(),
                source,
            })?
            .permissions();

        let tmp_path = temporary_path(&target);
        let staged = File::create(&tmp_path).and_then(|mut file| {
            // Restricted before the credentials are written
            file.set_permissions(permissions)?;
            file.write_all(body.as_bytes())?;
            file.sync_all()
        });
        if let Err(source) = staged {
            let _ = fs::remove_file(&tmp_path);
            return Err(ConfigError::Write {
                path: tmp_path,
                source,
            });
        }

        fs::rename(&tmp_path, &target).map_err(|source: io::Error| {
            let _ = fs::remove_file(&tmp_path);
            ConfigError::Write {
                path: target.clone(),
                source,
            }
        })
    }
}

impl ConfigStore for FileConfigStore {
    fn allow_signed_keys(&self) -> Result<bool, ConfigError> {
        Ok(self.config.allow_signed_keys)
    }

    fn set_allow_signed_keys(&mut self, allow: bool) -> Result<(), ConfigError> {
        let mut updated = self.config.clone();
        updated.allow_signed_keys = allow;
        self.write(&updated)?;
        self.config = updated;

        info!("Set allow_signed_keys={} in {:?}", allow, self.path);
        Ok(())
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

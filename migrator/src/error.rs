use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration path {path:?}: {reason}")]
    InvalidPath { path: PathBuf, reason: String },
    #[error("unable to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("unable to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("schema introspection failed: {0:#}")]
    Introspection(anyhow::Error),
    #[error("Aborted.")]
    Aborted,
    #[error("Unable to update DB configuration: {0}")]
    ConfigPersistence(#[source] ConfigError),
}

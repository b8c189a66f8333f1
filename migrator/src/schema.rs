//! Collaborator interfaces for reading and altering the live schema

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{ColumnDescriptor, ForeignKeyConstraint};

/// Rejection of an `ALTER` statement by the database
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("({}) {}", .code.as_deref().unwrap_or("unknown"), .message)]
pub struct AlterError {
    pub code: Option<String>,
    pub message: String,
}

#[async_trait]
pub trait SchemaInspector: Send + Sync {
    /// Integer key columns still declared signed, ordered by table
    async fn signed_key_columns(&self) -> Result<Vec<ColumnDescriptor>>;

    async fn foreign_key_constraints(&self) -> Result<Vec<ForeignKeyConstraint>>;

    /// Smallest value stored in the column, `None` for an empty table
    async fn min_value(&self, table_name: &str, column_name: &str) -> Result<Option<i64>>;
}

#[async_trait]
pub trait SchemaMutator: Send + Sync {
    async fn alter_to_unsigned(&self, column: &ColumnDescriptor) -> Result<(), AlterError>;
}

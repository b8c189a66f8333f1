//! Conversion of signed integer primary/foreign key columns to unsigned.
//!
//! The [`migrator::migrate_unsigned_keys`] runner works against the
//! [`schema::SchemaInspector`], [`schema::SchemaMutator`],
//! [`config::ConfigStore`] and [`confirm::Confirmation`] seams; the
//! [`database::Database`] MySQL adapter and [`config::FileConfigStore`] are
//! the production implementations.

pub mod config;
pub mod confirm;
pub mod database;
pub mod error;
pub mod migrator;
pub mod schema;

pub use config::{ConfigStore, DatabaseConfig, FileConfigStore};
pub use confirm::{AssumeYes, Confirmation};
pub use database::models::{ColumnDescriptor, ForeignKeyConstraint};
pub use database::Database;
pub use error::{ConfigError, MigrationError};
pub use migrator::{migrate_unsigned_keys, ColumnOutcome, ColumnReport, MigrationReport};
pub use schema::{AlterError, SchemaInspector, SchemaMutator};

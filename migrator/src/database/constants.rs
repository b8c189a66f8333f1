//! Schema and configuration defaults

/// Prefix shared by every application table
pub const DEFAULT_TABLE_PREFIX: &str = "glpi_";

/// Default location of the database configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/db.json";

/// Literal MariaDB reports in `COLUMN_DEFAULT` when a column has no default
pub const MARIADB_NULL_DEFAULT: &str = "NULL";

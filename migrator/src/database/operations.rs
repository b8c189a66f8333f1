use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    mysql::{MySqlDatabaseError, MySqlRow},
    Row,
};
use tracing::debug;

use super::constants::MARIADB_NULL_DEFAULT;
use super::models::{ColumnDescriptor, ForeignKeyConstraint};
use super::sql::{
    alter_to_unsigned, min_value_sql, prefix_like_pattern, SELECT_FOREIGN_KEYS_SQL,
    SELECT_SIGNED_KEY_COLUMNS_SQL,
};
use super::Database;
use crate::schema::{AlterError, SchemaInspector, SchemaMutator};

#[async_trait]
impl SchemaInspector for Database {
    async fn signed_key_columns(&self) -> Result<Vec<ColumnDescriptor>> {
        let rows = sqlx::query(SELECT_SIGNED_KEY_COLUMNS_SQL)
            .bind(prefix_like_pattern(self.table_prefix()))
            .fetch_all(self.pool())
            .await
            .context("failed to list signed key columns")?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            columns.push(column_from_row(row).context("malformed column descriptor")?);
        }

        debug!("Found {} signed key columns", columns.len());
        Ok(columns)
    }

    async fn foreign_key_constraints(&self) -> Result<Vec<ForeignKeyConstraint>> {
        let rows = sqlx::query(SELECT_FOREIGN_KEYS_SQL)
            .bind(prefix_like_pattern(self.table_prefix()))
            .fetch_all(self.pool())
            .await
            .context("failed to list foreign key constraints")?;

        let mut constraints = Vec::with_capacity(rows.len());
        for row in &rows {
            constraints.push(constraint_from_row(row).context("malformed constraint descriptor")?);
        }

        debug!("Found {} foreign key constraints", constraints.len());
        Ok(constraints)
    }

    async fn min_value(&self, table_name: &str, column_name: &str) -> Result<Option<i64>> {
        let sql = min_value_sql(table_name, column_name);
        let min: Option<i64> = sqlx::query_scalar(&sql)
            .fetch_one(self.pool())
            .await
            .with_context(|| format!("failed to read minimum of {}.{}", table_name, column_name))?;

        Ok(min)
    }
}

#[async_trait]
impl SchemaMutator for Database {
    async fn alter_to_unsigned(&self, column: &ColumnDescriptor) -> Result<(), AlterError> {
        let sql = alter_to_unsigned(column);
        debug!("Executing: {}", sql);

        sqlx::query(&sql)
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(alter_error_from)
    }
}

fn column_from_row(row: &MySqlRow) -> sqlx::Result<ColumnDescriptor> {
    Ok(normalise_column(
        row.try_get("table_name")?,
        row.try_get("column_name")?,
        row.try_get("data_type")?,
        row.try_get::<String, _>("is_nullable")?.as_str(),
        row.try_get("column_default")?,
        row.try_get("extra")?,
    ))
}

/// Builds a descriptor from raw `information_schema.columns` values.
///
/// MariaDB reports a column without default as the literal `NULL`, MySQL as
/// SQL `NULL`; both become `None`. MariaDB also quotes literal defaults
/// (`'0'`), which are unquoted here.
fn normalise_column(
    table_name: String,
    column_name: String,
    data_type: String,
    is_nullable: &str,
    column_default: Option<String>,
    extra: Option<String>,
) -> ColumnDescriptor {
    ColumnDescriptor {
        table_name,
        column_name,
        data_type,
        nullable: is_nullable.eq_ignore_ascii_case("YES"),
        default: column_default
            .filter(|value| value != MARIADB_NULL_DEFAULT)
            .map(unquote_default),
        extra: extra.unwrap_or_default(),
    }
}

fn unquote_default(value: String) -> String {
    if let Some(inner) = value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return inner.replace("''", "'");
    }
    value
}

fn constraint_from_row(row: &MySqlRow) -> sqlx::Result<ForeignKeyConstraint> {
    Ok(ForeignKeyConstraint {
        constraint_name: row.try_get("constraint_name")?,
        table_name: row.try_get("table_name")?,
        column_name: row.try_get("column_name")?,
        referenced_table_name: row.try_get("referenced_table_name")?,
        referenced_column_name: row.try_get("referenced_column_name")?,
    })
}

fn alter_error_from(err: sqlx::Error) -> AlterError {
    match err {
        sqlx::Error::Database(db_err) => {
            // Server error number (e.g. 1265); the SQLSTATE is mostly HY000
            let code = db_err
                .try_downcast_ref::<MySqlDatabaseError>()
                .map(|mysql_err| mysql_err.number().to_string())
                .or_else(|| db_err.code().map(|code| code.into_owned()));
            AlterError {
                code,
                message: db_err.message().to_string(),
            }
        }
        other => AlterError {
            code: None,
            message: other.to_string(),
        },
    }
}

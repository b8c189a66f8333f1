//! SQL statements for schema introspection and key conversion

use super::models::ColumnDescriptor;

/// Signed `int` key columns of base tables matching a prefix pattern.
/// Binds: table name `LIKE` pattern.
pub const SELECT_SIGNED_KEY_COLUMNS_SQL: &str = r#"
SELECT
    CAST(c.TABLE_NAME AS CHAR) AS table_name,
    CAST(c.COLUMN_NAME AS CHAR) AS column_name,
    CAST(c.DATA_TYPE AS CHAR) AS data_type,
    CAST(c.IS_NULLABLE AS CHAR) AS is_nullable,
    CAST(c.COLUMN_DEFAULT AS CHAR) AS column_default,
    CAST(c.EXTRA AS CHAR) AS extra
FROM information_schema.columns AS c
INNER JOIN information_schema.tables AS t
    ON t.TABLE_SCHEMA = c.TABLE_SCHEMA AND t.TABLE_NAME = c.TABLE_NAME
WHERE t.TABLE_SCHEMA = DATABASE()
  AND t.TABLE_NAME LIKE ?
  AND t.TABLE_TYPE = 'BASE TABLE'
  AND (
    c.COLUMN_NAME = 'id'
    OR c.COLUMN_NAME LIKE '%\_id'
    OR c.COLUMN_NAME LIKE '%\_id\_%'
  )
  AND c.DATA_TYPE = 'int'
  AND c.COLUMN_TYPE NOT LIKE '%unsigned%'
ORDER BY c.TABLE_NAME, c.ORDINAL_POSITION
"#;

/// Foreign keys pointing at tables matching a prefix pattern.
/// Binds: referenced table name `LIKE` pattern.
pub const SELECT_FOREIGN_KEYS_SQL: &str = r#"
SELECT
    CAST(CONSTRAINT_NAME AS CHAR) AS constraint_name,
    CAST(TABLE_NAME AS CHAR) AS table_name,
    CAST(COLUMN_NAME AS CHAR) AS column_name,
    CAST(REFERENCED_TABLE_NAME AS CHAR) AS referenced_table_name,
    CAST(REFERENCED_COLUMN_NAME AS CHAR) AS referenced_column_name
FROM information_schema.key_column_usage
WHERE REFERENCED_TABLE_SCHEMA = DATABASE()
  AND REFERENCED_TABLE_NAME LIKE ?
ORDER BY TABLE_NAME, ORDINAL_POSITION
"#;

/// Quote an identifier with backticks
pub fn quote_name(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a literal value with single quotes
pub fn quote_value(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// `LIKE` pattern matching every name starting with `prefix`
pub fn prefix_like_pattern(prefix: &str) -> String {
    let escaped = prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("{}%", escaped)
}

pub fn min_value_sql(table_name: &str, column_name: &str) -> String {
    format!(
        "SELECT CAST(MIN({}) AS SIGNED) FROM {}",
        quote_name(column_name),
        quote_name(table_name)
    )
}

/// Redeclare a column as unsigned, keeping nullability, default and extra attributes
pub fn alter_to_unsigned(column: &ColumnDescriptor) -> String {
    let mut parts = vec![
        "ALTER TABLE".to_string(),
        quote_name(&column.table_name),
        "MODIFY COLUMN".to_string(),
        quote_name(&column.column_name),
        format!("{} unsigned", column.data_type),
        if column.nullable { "NULL" } else { "NOT NULL" }.to_string(),
    ];

    match &column.default {
        Some(default) => parts.push(format!("DEFAULT {}", quote_value(default))),
        None if column.nullable => parts.push("DEFAULT NULL".to_string()),
        None => {}
    }

    let extra = column.extra.trim();
    if !extra.is_empty() {
        parts.push(extra.to_string());
    }

    parts.join(" ")
}

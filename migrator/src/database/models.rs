use serde::{Deserialize, Serialize};

/// Integer key column as reported by `information_schema.columns`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub extra: String,
}

impl ColumnDescriptor {
    /// Declared default parsed as an integer, if it is one
    pub fn default_as_integer(&self) -> Option<i64> {
        self.default
            .as_deref()
            .map(|value| value.trim().trim_matches('\''))
            .and_then(|value| value.parse::<i64>().ok())
    }

    pub fn has_negative_default(&self) -> bool {
        matches!(self.default_as_integer(), Some(value) if value < 0)
    }

    /// `table.column`, used in operator-facing messages
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name, self.column_name)
    }
}

/// Foreign key relationship from `information_schema.key_column_usage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyConstraint {
    pub constraint_name: String,
    pub table_name: String,
    pub column_name: String,
    pub referenced_table_name: String,
    pub referenced_column_name: String,
}

impl ForeignKeyConstraint {
    /// True when the column is either end of this constraint
    pub fn involves(&self, table_name: &str, column_name: &str) -> bool {
        (self.table_name == table_name && self.column_name == column_name)
            || (self.referenced_table_name == table_name
                && self.referenced_column_name == column_name)
    }
}

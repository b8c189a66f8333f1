#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use unsigned_keys_migrator::{
    AlterError, ColumnDescriptor, ConfigError, ConfigStore, Confirmation, ForeignKeyConstraint,
    SchemaInspector, SchemaMutator,
};

type ColumnKey = (String, String);

fn key(table_name: &str, column_name: &str) -> ColumnKey {
    (table_name.to_string(), column_name.to_string())
}

/// In-memory schema: signed columns disappear from the candidate list once altered
#[derive(Default)]
pub struct FakeSchema {
    columns: Mutex<Vec<ColumnDescriptor>>,
    constraints: Vec<ForeignKeyConstraint>,
    min_values: HashMap<ColumnKey, Option<i64>>,
    failing_alters: HashMap<ColumnKey, AlterError>,
    failing_min_values: HashSet<ColumnKey>,
    fail_introspection: bool,
    altered: Mutex<Vec<ColumnDescriptor>>,
    events: Mutex<Vec<String>>,
}

impl FakeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, column: ColumnDescriptor, min_value: Option<i64>) -> Self {
        self.min_values
            .insert(key(&column.table_name, &column.column_name), min_value);
        self.columns.get_mut().unwrap().push(column);
        self
    }

    pub fn with_constraint(mut self, constraint: ForeignKeyConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_failing_alter(
        mut self,
        table_name: &str,
        column_name: &str,
        code: &str,
        message: &str,
    ) -> Self {
        self.failing_alters.insert(
            key(table_name, column_name),
            AlterError {
                code: Some(code.to_string()),
                message: message.to_string(),
            },
        );
        self
    }

    pub fn with_failing_min_value(mut self, table_name: &str, column_name: &str) -> Self {
        self.failing_min_values.insert(key(table_name, column_name));
        self
    }

    pub fn with_failing_introspection(mut self) -> Self {
        self.fail_introspection = true;
        self
    }

    pub fn altered(&self) -> Vec<ColumnDescriptor> {
        self.altered.lock().unwrap().clone()
    }

    pub fn altered_names(&self) -> Vec<String> {
        self.altered().iter().map(|c| c.qualified_name()).collect()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl SchemaInspector for FakeSchema {
    async fn signed_key_columns(&self) -> Result<Vec<ColumnDescriptor>> {
        self.record("signed_key_columns".to_string());
        if self.fail_introspection {
            return Err(anyhow!("information_schema unavailable"));
        }
        Ok(self.columns.lock().unwrap().clone())
    }

    async fn foreign_key_constraints(&self) -> Result<Vec<ForeignKeyConstraint>> {
        self.record("foreign_key_constraints".to_string());
        Ok(self.constraints.clone())
    }

    async fn min_value(&self, table_name: &str, column_name: &str) -> Result<Option<i64>> {
        self.record(format!("min_value:{}.{}", table_name, column_name));
        let column = key(table_name, column_name);
        if self.failing_min_values.contains(&column) {
            return Err(anyhow!("table {} is marked as crashed", table_name));
        }
        Ok(self.min_values.get(&column).copied().flatten())
    }
}

#[async_trait]
impl SchemaMutator for FakeSchema {
    async fn alter_to_unsigned(&self, column: &ColumnDescriptor) -> Result<(), AlterError> {
        self.record(format!("alter:{}", column.qualified_name()));
        if let Some(err) = self
            .failing_alters
            .get(&key(&column.table_name, &column.column_name))
        {
            return Err(err.clone());
        }

        self.altered.lock().unwrap().push(column.clone());
        self.columns.lock().unwrap().retain(|candidate| {
            !(candidate.table_name == column.table_name
                && candidate.column_name == column.column_name)
        });
        Ok(())
    }
}

/// Configuration store that counts writes and can refuse them
pub struct FakeConfig {
    pub allow_signed_keys: bool,
    pub writes: usize,
    pub read_only: bool,
}

impl FakeConfig {
    pub fn new() -> Self {
        FakeConfig {
            allow_signed_keys: true,
            writes: 0,
            read_only: false,
        }
    }

    pub fn read_only() -> Self {
        FakeConfig {
            read_only: true,
            ..Self::new()
        }
    }
}

impl ConfigStore for FakeConfig {
    fn allow_signed_keys(&self) -> Result<bool, ConfigError> {
        Ok(self.allow_signed_keys)
    }

    fn set_allow_signed_keys(&mut self, allow: bool) -> Result<(), ConfigError> {
        if self.read_only {
            return Err(ConfigError::Write {
                path: "config/db.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.allow_signed_keys = allow;
        self.writes += 1;
        Ok(())
    }
}

/// Fixed answer, remembering how often the operator was asked
pub struct ScriptedConfirmation {
    answer: bool,
    asked: Cell<usize>,
}

impl ScriptedConfirmation {
    pub fn answering(answer: bool) -> Self {
        ScriptedConfirmation {
            answer,
            asked: Cell::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }
}

impl Confirmation for ScriptedConfirmation {
    fn confirm(&self, _question: &str) -> bool {
        self.asked.set(self.asked.get() + 1);
        self.answer
    }
}

pub fn key_column(table_name: &str, column_name: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        table_name: table_name.to_string(),
        column_name: column_name.to_string(),
        data_type: "int".to_string(),
        nullable: false,
        default: Some("0".to_string()),
        extra: String::new(),
    }
}

pub fn primary_key(table_name: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        default: None,
        extra: "auto_increment".to_string(),
        ..key_column(table_name, "id")
    }
}

pub fn foreign_key(
    constraint_name: &str,
    table_name: &str,
    column_name: &str,
    referenced_table_name: &str,
    referenced_column_name: &str,
) -> ForeignKeyConstraint {
    ForeignKeyConstraint {
        constraint_name: constraint_name.to_string(),
        table_name: table_name.to_string(),
        column_name: column_name.to_string(),
        referenced_table_name: referenced_table_name.to_string(),
        referenced_column_name: referenced_column_name.to_string(),
    }
}

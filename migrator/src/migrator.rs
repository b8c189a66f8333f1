//! Conversion of signed integer key columns to unsigned

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::ConfigStore;
use crate::confirm::Confirmation;
use crate::database::models::{ColumnDescriptor, ForeignKeyConstraint};
use crate::error::MigrationError;
use crate::schema::{SchemaInspector, SchemaMutator};

pub const CONFIRMATION_QUESTION: &str = "Do you want to continue?";

/// What happened to a single candidate column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ColumnOutcome {
    Migrated,
    SkippedNegativeValues {
        min_value: Option<i64>,
        default: Option<String>,
    },
    SkippedReferenced {
        constraint: ForeignKeyConstraint,
    },
    Failed {
        code: Option<String>,
        message: String,
    },
}

impl ColumnOutcome {
    pub fn is_error(&self) -> bool {
        !matches!(self, ColumnOutcome::Migrated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub column: ColumnDescriptor,
    pub outcome: ColumnOutcome,
}

/// Per-column outcomes of one run, in enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub candidates: usize,
    pub columns: Vec<ColumnReport>,
}

impl MigrationReport {
    pub fn nothing_to_migrate(&self) -> bool {
        self.candidates == 0
    }

    pub fn has_errors(&self) -> bool {
        self.columns.iter().any(|entry| entry.outcome.is_error())
    }

    pub fn migrated_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, ColumnOutcome::Migrated))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|outcome| {
            matches!(
                outcome,
                ColumnOutcome::SkippedNegativeValues { .. } | ColumnOutcome::SkippedReferenced { .. }
            )
        })
    }

    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, ColumnOutcome::Failed { .. }))
    }

    pub fn outcome_of(&self, table_name: &str, column_name: &str) -> Option<&ColumnOutcome> {
        self.columns
            .iter()
            .find(|entry| {
                entry.column.table_name == table_name && entry.column.column_name == column_name
            })
            .map(|entry| &entry.outcome)
    }

    fn count(&self, predicate: impl Fn(&ColumnOutcome) -> bool) -> usize {
        self.columns
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}

/// Convert every signed key column that can safely become unsigned, then
/// record that the schema no longer allows signed keys.
///
/// Per-column problems are collected in the report and never stop the run.
/// Only introspection failures, a declined confirmation and a failed
/// configuration write are returned as errors.
pub async fn migrate_unsigned_keys<S, C, P>(
    schema: &S,
    config: &mut C,
    confirmation: &P,
) -> Result<MigrationReport, MigrationError>
where
    S: SchemaInspector + SchemaMutator,
    C: ConfigStore,
    P: Confirmation,
{
    let columns = schema
        .signed_key_columns()
        .await
        .map_err(MigrationError::Introspection)?;
    info!(
        "Found {} primary/foreign key column(s) using signed integers.",
        columns.len()
    );

    let mut report = MigrationReport {
        candidates: columns.len(),
        columns: Vec::with_capacity(columns.len()),
    };

    if columns.is_empty() {
        info!("No migration needed.");
    } else {
        if !confirmation.confirm(CONFIRMATION_QUESTION) {
            return Err(MigrationError::Aborted);
        }

        // Taken once, before any ALTER
        let constraints = schema
            .foreign_key_constraints()
            .await
            .map_err(MigrationError::Introspection)?;

        let total = columns.len();
        for (index, column) in columns.into_iter().enumerate() {
            debug!(
                "[{}/{}] Processing {}",
                index + 1,
                total,
                column.qualified_name()
            );
            let outcome = migrate_column(schema, &column, &constraints).await;
            log_outcome(&column, &outcome);
            report.columns.push(ColumnReport { column, outcome });
        }

        match serde_json::to_string(&report) {
            Ok(json) => debug!("Migration report: {}", json),
            Err(err) => debug!("Unable to serialize migration report: {}", err),
        }
    }

    config
        .set_allow_signed_keys(false)
        .map_err(MigrationError::ConfigPersistence)?;

    Ok(report)
}

async fn migrate_column<S>(
    schema: &S,
    column: &ColumnDescriptor,
    constraints: &[ForeignKeyConstraint],
) -> ColumnOutcome
where
    S: SchemaInspector + SchemaMutator,
{
    let min_value = match schema
        .min_value(&column.table_name, &column.column_name)
        .await
    {
        Ok(min_value) => min_value,
        Err(err) => {
            return ColumnOutcome::Failed {
                code: None,
                message: format!("{:#}", err),
            }
        }
    };

    if let Some(skip) = skip_reason(column, min_value, constraints) {
        return skip;
    }

    match schema.alter_to_unsigned(column).await {
        Ok(()) => ColumnOutcome::Migrated,
        Err(err) => ColumnOutcome::Failed {
            code: err.code,
            message: err.message,
        },
    }
}

/// Reason a column must stay signed, if any
pub fn skip_reason(
    column: &ColumnDescriptor,
    min_value: Option<i64>,
    constraints: &[ForeignKeyConstraint],
) -> Option<ColumnOutcome> {
    if matches!(min_value, Some(min) if min < 0) || column.has_negative_default() {
        return Some(ColumnOutcome::SkippedNegativeValues {
            min_value,
            default: column.default.clone(),
        });
    }

    constraints
        .iter()
        .find(|constraint| constraint.involves(&column.table_name, &column.column_name))
        .map(|constraint| ColumnOutcome::SkippedReferenced {
            constraint: constraint.clone(),
        })
}

fn log_outcome(column: &ColumnDescriptor, outcome: &ColumnOutcome) {
    match outcome {
        ColumnOutcome::Migrated => {
            info!("Column \"{}\" migrated to unsigned.", column.qualified_name())
        }
        ColumnOutcome::SkippedNegativeValues { .. } => warn!(
            "Migration of column \"{}\" cannot be done as it contains negative values.",
            column.qualified_name()
        ),
        ColumnOutcome::SkippedReferenced { constraint } => warn!(
            "Migration of column \"{}\" cannot be done as it is referenced in CONSTRAINT \"{}\" of table \"{}.{}\".",
            column.qualified_name(),
            constraint.constraint_name,
            constraint.table_name,
            constraint.column_name
        ),
        ColumnOutcome::Failed { code, message } => error!(
            "Update of \"{}\" failed with message \"({}) {}\".",
            column.qualified_name(),
            code.as_deref().unwrap_or("unknown"),
            message
        ),
    }
}

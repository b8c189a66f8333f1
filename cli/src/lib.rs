pub mod cli_types;
pub mod consts;
pub mod utils;

use log::{error, info};
use unsigned_keys_migrator::{MigrationError, MigrationReport};

use crate::consts::{EXIT_CONFIG_UPDATE_FAILED, EXIT_FATAL, EXIT_MIGRATION_FAILED, EXIT_SUCCESS};

/// Reports the end of a run to the operator and picks the process exit status.
pub fn finish_unsigned_keys_run(result: Result<MigrationReport, MigrationError>) -> u8 {
    match result {
        Ok(report) => {
            if !report.nothing_to_migrate() {
                info!(
                    "{} migrated, {} skipped, {} failed out of {} column(s).",
                    report.migrated_count(),
                    report.skipped_count(),
                    report.failed_count(),
                    report.candidates
                );
            }
            if report.has_errors() {
                error!("Errors occurred during migration.");
                EXIT_MIGRATION_FAILED
            } else {
                if !report.nothing_to_migrate() {
                    info!("Migration done.");
                }
                EXIT_SUCCESS
            }
        }
        Err(MigrationError::Aborted) => {
            info!("Aborted.");
            EXIT_SUCCESS
        }
        Err(err @ MigrationError::ConfigPersistence(_)) => {
            error!("{}", err);
            EXIT_CONFIG_UPDATE_FAILED
        }
        Err(err) => {
            error!("{}", err);
            EXIT_FATAL
        }
    }
}

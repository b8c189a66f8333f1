/// Process exit statuses of `migration:unsigned_keys`
pub const EXIT_SUCCESS: u8 = 0;

/// At least one column was skipped or its ALTER failed
pub const EXIT_MIGRATION_FAILED: u8 = 1;

/// Invalid command line, the status clap uses for usage errors
pub const EXIT_USAGE: u8 = 2;

/// Configuration unreadable, database unreachable or introspection failed
pub const EXIT_FATAL: u8 = 3;

/// The "allow signed keys" property could not be written
pub const EXIT_CONFIG_UPDATE_FAILED: u8 = 4;

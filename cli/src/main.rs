use clap::{ArgAction, Parser};
use keys_cli::{
    cli_types::log_filter,
    consts::{EXIT_FATAL, EXIT_SUCCESS, EXIT_USAGE},
    finish_unsigned_keys_run,
    utils::StdinConfirmation,
};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Builder;
use unsigned_keys_migrator::{
    database::constants::DEFAULT_CONFIG_PATH, migrate_unsigned_keys, AssumeYes, Database,
    FileConfigStore,
};

#[derive(Clone, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Database configuration file holding the connection and `allow_signed_keys`
    #[arg(long, env = "KEYS_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Overrides `database_url` from the configuration file
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Do not ask for confirmation before altering the schema
    #[arg(short = 'n', long, global = true)]
    pub no_interaction: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Clone)]
pub enum Commands {
    /// Migrate primary/foreign keys to unsigned integers
    #[command(name = "migration:unsigned_keys")]
    MigrationUnsignedKeys {},
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version come through here too
            return ExitCode::from(if err.use_stderr() {
                EXIT_USAGE
            } else {
                EXIT_SUCCESS
            });
        }
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.verbose, cli.quiet)),
    )
    .format_target(false)
    .format_timestamp(None)
    .is_test(false)
    .try_init();

    let runtime = match Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Unable to start async runtime: {}", err);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let code = match cli.command {
        Commands::MigrationUnsignedKeys {} => runtime.block_on(migrate_unsigned_keys_command(&cli)),
    };
    ExitCode::from(code)
}

async fn migrate_unsigned_keys_command(cli: &Cli) -> u8 {
    let mut store = match FileConfigStore::open(&cli.config) {
        Ok(store) => store,
        Err(err) => {
            error!("{}", err);
            return EXIT_FATAL;
        }
    };

    let Some(database_url) = cli
        .database_url
        .clone()
        .or_else(|| store.config().database_url.clone())
    else {
        error!(
            "No database URL configured; pass --database-url or set database_url in {:?}",
            store.path()
        );
        return EXIT_FATAL;
    };

    let table_prefix = store.config().table_prefix.clone();
    let database = match Database::connect(&database_url, &table_prefix).await {
        Ok(database) => database,
        Err(err) => {
            error!("{:#}", err);
            return EXIT_FATAL;
        }
    };
    info!("Migrating tables prefixed with \"{}\"", database.table_prefix());

    let result = if cli.no_interaction {
        migrate_unsigned_keys(&database, &mut store, &AssumeYes).await
    } else {
        migrate_unsigned_keys(&database, &mut store, &StdinConfirmation).await
    };
    database.close().await;

    finish_unsigned_keys_run(result)
}

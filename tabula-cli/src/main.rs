use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use log::LevelFilter;
use log::debug;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use tabula_lib::mock::Collection;
use tabula_lib::mock::fixtures;
use tabula_lib::query::QueryConfig;

#[derive(Parser, Debug)]
#[command(name = "tabula", version, about = "Query seeded mock tables")]
struct Cli {
    /// Log level written to stderr
    #[arg(long = "log-level", env = "TABULA_LOG", global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Table {
    Products,
    Users,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a list request and print the JSON body
    List {
        table: Table,
        /// Number of records to generate
        #[arg(long, default_value_t = 50)]
        count: usize,
        /// Seed for the generated records
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Query string, e.g. "page=2&limit=5&sort=name:asc&filter[role][eq]=admin"
        #[arg(long, default_value = "")]
        query: String,
        /// Upper bound for the page size
        #[arg(long = "max-limit", default_value_t = 100)]
        max_limit: i64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = TermLogger::init(
        cli.log_level.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match run(cli.command) {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> tabula_lib::Result<String> {
    match command {
        Commands::List {
            table,
            count,
            seed,
            query,
            max_limit,
        } => {
            debug!("Listing {:?} ({} records, seed {})", table, count, seed);
            let config = QueryConfig::new().with_max_limit(max_limit);
            let body = match table {
                Table::Products => Collection::new(fixtures::products(count, seed), fixtures::product_columns())
                    .with_config(config)
                    .list(&query)?,
                Table::Users => Collection::new(fixtures::users(count, seed), fixtures::user_columns())
                    .with_config(config)
                    .list(&query)?,
            };
            Ok(serde_json::to_string_pretty(&body)?)
        }
    }
}

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colmodel::{ColumnResolver, ConfigError, Diagnostics, Direction, TableConfig};
use log::{LevelFilter, debug, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

mod render;

use render::{TextTable, column_summary};

#[derive(Parser)]
#[command(name = "colmodel")]
#[command(about = "Resolve the column layout of a table config and print it", long_about = None)]
#[command(version)]
struct Cli {
    /// Table config (JSON)
    #[arg(value_name = "path")]
    config: PathBuf,

    /// Lay the table out right-to-left, overriding the config
    #[arg(long)]
    rtl: bool,

    /// Only print the flat column list
    #[arg(long)]
    columns_only: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "path")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create log file '{path}': {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::LogFile {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?,
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    init_logging(cli)?;

    let config = TableConfig::load(&cli.config)?;
    let mut input = config.to_input()?;
    if cli.rtl {
        input.direction = Direction::Rtl;
    }
    debug!(
        "Resolving {} rows, direction {:?}",
        config.rows.len(),
        input.direction
    );

    // Always surface configuration mistakes from the command line.
    let mut resolver = ColumnResolver::new().with_diagnostics(Diagnostics::default().enabled(true));
    let resolved = resolver.resolve(&input);
    info!(
        "Resolved {} header rows, {} flat columns",
        resolved.head_cells().len(),
        resolved.flat_columns.len()
    );

    if resolved.has_gap_fixed {
        warn!("Fixed columns do not form contiguous bands at the table edges");
    }

    for line in column_summary(&resolved) {
        println!("{line}");
    }
    if let Some(width) = resolved.scroll_width {
        println!("scroll width: {width}px");
    }
    if cli.columns_only {
        return Ok(());
    }

    println!();
    for line in TextTable::new(&resolved, &config.rows).lines() {
        println!("{line}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

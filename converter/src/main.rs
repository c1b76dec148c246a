//! ClearWay CLI - Convert telemetry CSV exports to SQL bulk inserts
//!
//! # Main Command
//!
//! ```bash
//! clearway convert                                   # defaults / .env / environment
//! clearway convert -i drive.csv -o drive.sql \
//!     --session-id 3f1c...-... --date 2025-11-18
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! clearway parse drive.csv          # Loaded rows as JSON, with column kinds
//! clearway preview drive.csv -n 5   # First INSERT statements, nothing written
//! ```
//!
//! Every option also reads the environment variable of the same name
//! (`INPUT_FILE`, `OUTPUT_FILE`, `SESSION_ID`, `DATE_OF_MEASUREMENT`), and a
//! `.env` file in the working directory is loaded first.

use clap::{Args, Parser, Subcommand};
use clearway::config::{
    DEFAULT_DATE_OF_MEASUREMENT, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_SESSION_ID,
};
use clearway::logs::log_error;
use clearway::{
    convert, load_csv_file, parse_delimiter, parse_measurement_date, preview, ConfigError,
    ConvertConfig, PipelineError,
};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clearway")]
#[command(about = "Convert ClearWay telemetry CSV exports into SQL bulk-insert files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full conversion: CSV → SQL file
    Convert {
        #[command(flatten)]
        run: RunArgs,

        /// SQL file to create or overwrite
        #[arg(short, long, env = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        summary_json: bool,
    },

    /// Load a CSV file and print its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Print the first INSERT statements without writing a file
    Preview {
        /// Input CSV file (overrides --input)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,

        /// Number of statements to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}

/// Options shared by every command that transforms rows
#[derive(Args)]
struct RunArgs {
    /// Telemetry CSV export
    #[arg(short, long, env = "INPUT_FILE", default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Session identifier stamped on every row
    #[arg(short, long, env = "SESSION_ID", default_value = DEFAULT_SESSION_ID)]
    session_id: String,

    /// Date of the drive (YYYY-MM-DD)
    #[arg(long = "date", env = "DATE_OF_MEASUREMENT", default_value = DEFAULT_DATE_OF_MEASUREMENT)]
    date_of_measurement: String,

    /// CSV delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Reject a SESSION_ID that is not a UUID
    #[arg(long)]
    strict_session_id: bool,
}

impl RunArgs {
    fn into_config(self, output_file: PathBuf) -> Result<ConvertConfig, ConfigError> {
        Ok(ConvertConfig {
            input_file: self.input,
            output_file,
            session_id: self.session_id,
            date_of_measurement: parse_measurement_date(&self.date_of_measurement)?,
            delimiter: parse_delimiter(self.delimiter)?,
            strict_session_id: self.strict_session_id,
        })
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Convert {
            run,
            output,
            summary_json,
        } => cmd_convert(run, output, summary_json),

        Commands::Parse { input, delimiter } => cmd_parse(input, delimiter),

        Commands::Preview { file, mut run, limit } => {
            if let Some(file) = file {
                run.input = file;
            }
            cmd_preview(run, limit)
        }
    };

    if let Err(e) = result {
        log_error(e.to_string());
        std::process::exit(e.exit_code());
    }
}

fn cmd_convert(run: RunArgs, output: PathBuf, summary_json: bool) -> Result<(), PipelineError> {
    let config = run.into_config(output)?;
    let summary = convert(&config)?;

    if summary_json {
        println!("{}", json!(summary));
    } else {
        eprintln!(
            "✨ Done! {} INSERT statements → {}",
            summary.statements_written,
            summary.output_file.display()
        );
    }
    Ok(())
}

fn cmd_parse(input: PathBuf, delimiter: char) -> Result<(), PipelineError> {
    let delimiter = parse_delimiter(delimiter)?;
    let table = load_csv_file(&input, delimiter)?;

    let columns: Vec<_> = table
        .column_kinds()
        .into_iter()
        .map(|(name, kind)| json!({ "name": name, "kind": kind }))
        .collect();

    let out = json!({
        "columns": columns,
        "rows": table.to_json(),
    });
    println!("{:#}", out);
    Ok(())
}

fn cmd_preview(run: RunArgs, limit: usize) -> Result<(), PipelineError> {
    // output path is unused by preview
    let config = run.into_config(PathBuf::new())?;
    for statement in preview(&config, limit)? {
        println!("{}", statement);
    }
    Ok(())
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` wins over the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

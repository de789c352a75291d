//! Rowsift CLI - validate and normalize delimited records into JSON
//!
//! # Main Command
//!
//! ```bash
//! rowsift run input.csv -o processed.json --log run.log
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! rowsift parse input.csv          # Just parse CSV to raw JSON records
//! rowsift rules                    # Show the standard validation ruleset
//! ```

use clap::{Parser, Subcommand};
use rowsift::{
    CsvFileSource, JsonFileSink, Logger, Pipeline, RecordSource, RuleSet, RunConfig, SourceResult,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rowsift")]
#[command(about = "Validate and normalize delimited records into JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: read, validate, normalize, write JSON
    Run {
        /// Input delimited file
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = "processed_data.json")]
        output: PathBuf,

        /// Diagnostics log file (default: stderr)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Field delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Text encoding (auto-detect if not specified)
        #[arg(short, long)]
        encoding: Option<String>,

        /// Accumulation size for the informational batch diagnostic
        #[arg(long, default_value_t = rowsift::config::DEFAULT_BATCH_THRESHOLD)]
        batch_size: usize,
    },

    /// Parse a delimited file and output raw JSON records
    Parse {
        /// Input delimited file
        input: PathBuf,

        /// Field delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the standard validation ruleset as JSON
    Rules,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            log,
            delimiter,
            encoding,
            batch_size,
        } => cmd_run(RunConfig {
            input,
            output,
            log_path: log,
            delimiter,
            encoding,
            batch_threshold: batch_size,
        }),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Rules => cmd_rules(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_run(config: RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log = match &config.log_path {
        Some(path) => Logger::file(path)?,
        None => Logger::stderr(),
    };

    let mut source = CsvFileSource::new(&config.input);
    if let Some(delimiter) = config.delimiter {
        source = source.with_delimiter(delimiter);
    }
    if let Some(ref encoding) = config.encoding {
        source = source.with_encoding(encoding.clone());
    }
    let mut sink = JsonFileSink::new(&config.output);

    let pipeline = Pipeline::new(RuleSet::standard(), config.batch_threshold);
    let stats = pipeline.run(&mut source, &mut sink, &log)?;

    eprintln!(
        "Processed {}: {} records read, {} kept, {} skipped",
        config.input.display(),
        stats.total,
        stats.valid,
        stats.skipped()
    );
    eprintln!("Output written to: {}", config.output.display());
    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Parsing: {}", input.display());

    let mut source = CsvFileSource::new(input);
    if let Some(delimiter) = delimiter {
        source = source.with_delimiter(delimiter);
    }

    let records = source.records()?.collect::<SourceResult<Vec<_>>>()?;
    eprintln!("Parsed {} records", records.len());

    let json = serde_json::to_string_pretty(&records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_rules() -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&RuleSet::standard())?;
    println!("{}", json);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use chrono::Local;
use clap::{Parser, Subcommand};
use sheetpipe::outputs::{self, DEFAULT_RETENTION};
use sheetpipe::{Result, ToolError, convert};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "sheetpipe=info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert(args) => execute_convert(args),
        Command::Cleanup(args) => execute_cleanup(args),
    }
}

fn execute_convert(args: ConvertArgs) -> Result<()> {
    let output = match (args.output, args.output_dir) {
        (Some(path), _) => path,
        (None, dir) => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            fs::create_dir_all(&dir)?;
            outputs::timestamped_output_path(&args.input, &dir, Local::now().naive_local())
        }
    };

    let outcome = convert(&args.input, &output);

    if args.remove_input {
        match fs::remove_file(&outcome.input) {
            Ok(()) => info!(input = %outcome.input.display(), "removed input file"),
            Err(error) => warn!(input = %outcome.input.display(), %error, "could not remove input file"),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.success {
        println!("{}", outcome.message);
    }

    if outcome.success {
        Ok(())
    } else {
        Err(ToolError::ConversionFailed(outcome.message))
    }
}

fn execute_cleanup(args: CleanupArgs) -> Result<()> {
    let max_age = args
        .max_age_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETENTION);
    let deleted = outputs::purge_stale_outputs(&args.dir, max_age, SystemTime::now())?;

    if args.json {
        let report = serde_json::json!({
            "success": true,
            "deleted_files": deleted,
            "message": format!("Cleanup completed. {} files deleted.", deleted.len()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for path in &deleted {
            println!("{}", path.display());
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Flatten spreadsheet workbooks into normalised pipe-delimited text."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a workbook into a pipe-delimited text file.
    Convert(ConvertArgs),
    /// Delete converted files older than the retention window.
    Cleanup(CleanupArgs),
}

#[derive(clap::Args)]
#[command(group(
    clap::ArgGroup::new("destination")
        .required(true)
        .args(["output", "output_dir"])
))]
struct ConvertArgs {
    /// Workbook to convert.
    #[arg(long)]
    input: PathBuf,

    /// Output file path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory receiving a timestamped output file.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Delete the input workbook once the conversion has been attempted.
    #[arg(long)]
    remove_input: bool,

    /// Print the conversion outcome as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct CleanupArgs {
    /// Directory holding converted files.
    #[arg(long)]
    dir: PathBuf,

    /// Maximum age in seconds before a file is deleted (default 1800).
    #[arg(long)]
    max_age_secs: Option<u64>,

    /// Print the cleanup report as JSON.
    #[arg(long)]
    json: bool,
}

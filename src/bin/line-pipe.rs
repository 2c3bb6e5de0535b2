//! CLI tool to run line stages over a file or stdin.
//!
//! Usage:
//!   line-pipe 'LOCATE /ERROR/' 'CHANGE /ERROR/WARN/' < app.log
//!   line-pipe --script filter.pipe -i app.log -o out/filtered.log
//!   line-pipe --bytes -i blob.bin
//!
//! With no stages every line is copied through unchanged.

use clap::{Parser, ValueEnum};
use line_pipe::{LineCounts, StageChain, identity_bytes, pipe_bytes, pipe_lines};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Run line stages over input, one line at a time.
#[derive(Parser)]
#[command(name = "line-pipe", version)]
struct Cli {
    /// Stages applied to each line in order, e.g. 'LOCATE /ERROR/' 'UPPER'
    stages: Vec<String>,

    /// Read stages from a script file (applied after positional stages)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Copy lines as raw bytes without UTF-8 decoding
    #[arg(long, conflicts_with_all = ["stages", "script"])]
    bytes: bool,

    /// Log run details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_logging(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

/// Build the stage chain from positional stages and the script file.
fn load_stages(cli: &Cli) -> Result<StageChain, String> {
    let mut script = cli.stages.join("\n");

    if let Some(path) = &cli.script {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Error reading script file '{}': {e}", path.display()))?;
        script.push('\n');
        script.push_str(&text);
    }

    StageChain::parse(&script).map_err(|e| format!("Stage error: {e}"))
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>, String> {
    match path {
        Some(path) => File::open(path)
            .map(|f| Box::new(f) as Box<dyn Read>)
            .map_err(|e| format!("Error reading input file '{}': {e}", path.display())),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, String> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdout().lock()));
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && fs::create_dir_all(parent).is_err()
    {
        return Err(format!(
            "Error creating output directory for '{}'",
            path.display()
        ));
    }

    File::create(path)
        .map(|f| Box::new(f) as Box<dyn Write>)
        .map_err(|e| format!("Error writing output file '{}': {e}", path.display()))
}

/// Run the pipe, rendering any failure as the message to print.
fn run(cli: &Cli) -> Result<LineCounts, String> {
    let reader = open_input(cli.input.as_deref())?;

    let result = if cli.bytes {
        let writer = open_output(cli.output.as_deref())?;
        debug!("mode: bytes");
        pipe_bytes(reader, writer, identity_bytes)
    } else {
        let chain = load_stages(cli)?;
        debug!(stages = ?chain.names(), "mode: lines");
        let writer = open_output(cli.output.as_deref())?;
        pipe_lines(reader, writer, chain)
    };

    result.map_err(|e| format!("Pipe error: {e}"))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    debug!(
        input = %cli.input.as_deref().map_or("(stdin)".into(), |p| p.display().to_string()),
        output = %cli.output.as_deref().map_or("(stdout)".into(), |p| p.display().to_string()),
        "starting"
    );

    match run(&cli) {
        Ok(counts) => {
            info!(read = counts.read, written = counts.written, "done");
        }
        Err(msg) => {
            eprintln!("{msg}");
            process::exit(1);
        }
    }
}

//! orfscan - open reading frame finder
//!
//! Scans a FASTA-like file whose records all share the header length of the
//! first one, normalizes the bases and lists every ORF of every record.
//!
//! ## Usage
//!
//! ```bash
//! orfscan sequences.txt                  # browse the results
//! orfscan -m 2004 -o orfs.txt seqs.txt   # save the results
//! orfscan -o - seqs.txt                  # print the results
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use orfscan::controller::run_app;
use orfscan::model::{AppState, ResultLines};
use orfscan::scan::{prepare, walk, HeaderLayout, SeqBuffer};
use orfscan::sink::{emit, LineSink, MemorySink, WalkSummary, WriterSink};

/// orfscan - find open reading frames in concatenated sequence records
///
/// When run without -o/--output, opens an interactive viewer on the results.
/// With -o/--output, writes the results to a file (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequence file to scan
    file: PathBuf,

    /// Last characters of the first header, used to measure header length
    #[arg(short = 'm', long = "marker", default_value = "2004")]
    marker: String,

    /// Output file (enables CLI mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Also print the results to stdout when writing to a file
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// Verbose logging (stderr in CLI mode, a temporary log file in the viewer)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Sets up logging. `RUST_LOG` overrides the default levels.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default = if verbose { "orfscan=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Writes the walk to the sink and reports the outcome on stderr.
fn emit_to<S: LineSink + ?Sized>(
    buffer: &SeqBuffer,
    layout: &HeaderLayout,
    sink: &mut S,
    name: &str,
) -> Result<WalkSummary> {
    let summary = emit(walk(buffer, layout), sink)
        .with_context(|| format!("Scan aborted while writing {}", name))?;
    info!(
        "{}: {} records, {} ORFs, {} lines",
        name, summary.records, summary.orfs, summary.lines
    );
    Ok(summary)
}

/// Runs CLI mode: walk once per requested sink.
fn run_cli_mode(buffer: &SeqBuffer, layout: &HeaderLayout, output: &str, print: bool) -> Result<()> {
    if output == "-" {
        let mut sink = WriterSink::stdout();
        emit_to(buffer, layout, &mut sink, "stdout")?;
        return Ok(());
    }

    if print {
        let mut console = WriterSink::stdout();
        emit_to(buffer, layout, &mut console, "stdout")?;
    }

    let mut file = WriterSink::create(output)
        .with_context(|| format!("Cannot create output file {}", output))?;
    let summary = emit_to(buffer, layout, &mut file, output)?;
    eprintln!(
        "Wrote {} ORFs from {} records to {}",
        summary.orfs, summary.records, output
    );
    Ok(())
}

/// Runs viewer mode: collect the lines in memory, then browse them.
fn run_viewer_mode(buffer: &SeqBuffer, layout: &HeaderLayout, source_name: String) -> Result<()> {
    let mut sink = MemorySink::new();
    let summary = emit_to(buffer, layout, &mut sink, "viewer")?;

    let mut state = AppState::new(ResultLines::new(sink.into_lines()), source_name);
    state.status_message = match summary.diagnostics.as_slice() {
        [] => None,
        [only] => Some(only.clone()),
        [first, rest @ ..] => Some(format!("{} (+{} more)", first, rest.len())),
    };
    run_app(state)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.marker.is_empty() {
        anyhow::bail!("Header marker must not be empty");
    }

    // The viewer owns the terminal, so its logs go to a file
    let log_file = if args.output.is_none() && args.verbose {
        let name = format!("orfscan-{:08x}.log", rand::random::<u32>());
        Some(std::env::temp_dir().join(name))
    } else {
        None
    };
    init_logging(args.verbose, log_file.as_deref())?;

    let mut buffer = SeqBuffer::open(&args.file)
        .with_context(|| format!("Cannot proceed with {}", args.file.display()))?;
    debug!("Loaded {} characters from {}", buffer.len(), args.file.display());

    let layout = prepare(&mut buffer, &args.marker)?;

    match args.output {
        Some(output) => run_cli_mode(&buffer, &layout, &output, args.print)?,
        None => {
            let source_name = args
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| args.file.display().to_string());
            run_viewer_mode(&buffer, &layout, source_name)?;
        }
    }

    if let Some(path) = log_file {
        eprintln!("Log written to {}", path.display());
    }

    Ok(())
}

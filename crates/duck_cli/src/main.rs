//! Interactive entry point for the Duck task tracker.
//!
//! # Responsibility
//! - Resolve storage/logging options and hydrate the core session.
//! - Run the prompt loop: read a line, print the core reply, stop on `bye`.
//! - Flush the task list on every exit path, including input failures.

use anyhow::{Context, Result};
use clap::Parser;
use duck_core::{
    default_log_level, init_logging, Session, TaskStorage, TaskStore, DEFAULT_DATA_FILE,
};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const GREETING: &str = "Hello there! My name's Duck...\nPlease type in a command...";

#[derive(Parser)]
#[command(name = "duck")]
#[command(version, about = "Line-oriented personal task tracker", long_about = None)]
struct Cli {
    /// Task file location
    #[arg(long, env = "DUCK_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Log level: trace, debug, info, warn, or error (requires --log-dir)
    #[arg(long, value_name = "LEVEL", requires = "log_dir")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let store = TaskStore::new(&cli.data_file);
    let session = Session::open(store)
        .with_context(|| format!("failed to load tasks from `{}`", cli.data_file.display()))?;

    println!("{GREETING}");

    let stdin = io::stdin();
    run_and_flush(session, stdin.lock(), io::stdout())
        .with_context(|| format!("session on `{}` ended abnormally", cli.data_file.display()))
}

/// Runs the prompt loop, then flushes even when the loop failed.
///
/// A loop failure is returned after a successful flush; a flush failure
/// takes precedence since it means tasks were lost.
fn run_and_flush<S: TaskStorage>(
    mut session: Session<S>,
    input: impl BufRead,
    output: impl Write,
) -> Result<()> {
    let loop_result = run_loop(&mut session, input, output);
    if let Err(err) = &loop_result {
        error!("event=session_input module=cli status=error error={err:#}");
    }

    session.flush().context("failed to save tasks")?;
    info!("event=session_close module=cli status=ok");
    loop_result
}

/// Feeds lines to the session until `bye` or end of input.
///
/// Lines are decoded lossily, so bytes that are not UTF-8 reach the parser
/// as replacement characters and get an ordinary "unrecognized" reply.
fn run_loop<S: TaskStorage>(
    session: &mut Session<S>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let read = input
            .read_until(b'\n', &mut buffer)
            .context("failed to read input line")?;
        if read == 0 {
            return Ok(());
        }

        let decoded = String::from_utf8_lossy(&buffer);
        let line = decoded.trim_end_matches(['\n', '\r']);
        let reply = session.handle_line(line);
        writeln!(output, "{}", reply.message).context("failed to write reply")?;
        output.flush().context("failed to flush output")?;
        if reply.is_exit() {
            return Ok(());
        }
    }
}

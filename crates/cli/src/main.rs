// Tripwire - Fault Injection Target
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tripwire_core::FaultTriggered;
use tripwire_loader::Buffer;

const EXIT_CLEAN: u8 = 0;
const EXIT_LOAD_ERROR: u8 = 2;
/// 128 + SIGSEGV, what a shell reports for a segfaulting process.
const EXIT_FAULT: u8 = 139;
/// `-1` truncated to eight bits.
const EXIT_USAGE: u8 = 255;

/// How a triggered fault ends the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FaultAction {
    /// Abort the process (SIGABRT), visible to fuzzers and debuggers as a crash.
    Abort,
    /// Exit with status 139.
    Exit,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Tripwire fault injection target",
    long_about = None
)]
struct Cli {
    /// Input file to scan
    filename: PathBuf,

    /// Extra arguments are accepted and ignored
    #[arg(hide = true)]
    _rest: Vec<OsString>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    trace: bool,

    /// What to do when the input fires the trigger
    #[arg(long, value_enum, default_value_t = FaultAction::Abort)]
    on_fault: FaultAction,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage goes to stdout; no file is touched.
            print!("{}", e.render());
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // stdout is reserved for usage text
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.trace {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> ExitCode {
    let buffer = match load_input(&cli.filename) {
        Ok(buffer) => buffer,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_LOAD_ERROR);
        }
    };

    match tripwire_core::scan(&buffer).into_result() {
        Ok(depth) => {
            debug!("No trigger (matched {} bytes)", depth);
            ExitCode::from(EXIT_CLEAN)
        }
        Err(fault) => on_fault(fault, cli.on_fault),
    }
}

fn load_input(path: &Path) -> Result<Buffer> {
    let buffer = tripwire_loader::load_file(path)
        .with_context(|| format!("Failed to load input {:?}", path))?;
    debug!("Loaded {} bytes from {:?}", buffer.len(), path);
    Ok(buffer)
}

fn on_fault(fault: FaultTriggered, action: FaultAction) -> ExitCode {
    error!("{}", fault);
    match action {
        FaultAction::Abort => std::process::abort(),
        FaultAction::Exit => ExitCode::from(EXIT_FAULT),
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapty console
//!
//! Runs a workout session against console collaborators: commands are read
//! from stdin, map/list/notice updates are printed to stdout, logs go to stderr.

use std::io::{self, BufRead, Write};

use mapty_tracker::{
    config::Config,
    db::FileSlotStorage,
    ui::console::{parse_command, Command, ConsoleSession, HELP},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Starting Mapty"
    );

    let storage = FileSlotStorage::new(&config.data_dir);
    let mut session = ConsoleSession::new(storage, &config);
    session.start();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", HELP)?;
    flush(&mut out, &mut session)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(e) = session.execute(command) {
                    tracing::debug!(error = %e, "Command failed");
                    writeln!(out, "error: {}", e)?;
                }
            }
            Err(e) => writeln!(out, "error: {}", e)?,
        }
        flush(&mut out, &mut session)?;
    }

    tracing::info!("Session ended");
    Ok(())
}

fn flush<W: Write, S: mapty_tracker::db::SlotStorage>(
    out: &mut W,
    session: &mut ConsoleSession<S>,
) -> io::Result<()> {
    for line in session.take_output() {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mapty_tracker=debug,info")),
        )
        .with(format)
        .init();
}

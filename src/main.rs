//! babel-tts entry point.

use std::sync::Arc;
use std::sync::mpsc;

use anyhow::{Context, Result};
use babel_tts_rs::backend::create_services;
use babel_tts_rs::catalog::LanguageCatalog;
use babel_tts_rs::cli::Args;
use babel_tts_rs::playback::default_output;
use babel_tts_rs::session::{EventSink, Session};
use babel_tts_rs::shell::{Shell, ShellEvent, TerminalDialogs, spawn_input_reader};
use babel_tts_rs::voice::default_engine;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let language = LanguageCatalog::new()
        .find(&args.language)
        .with_context(|| format!("Unknown language: {}", args.language))?;

    let (translator, synthesizer) =
        create_services(&args.service_config()).context("Failed to create HTTP client")?;

    // Worker events and input lines share one queue, drained by the UI thread.
    let (tx, rx) = mpsc::channel();
    let worker_tx = tx.clone();
    let sink: EventSink = Arc::new(move |event| {
        let _ = worker_tx.send(ShellEvent::Worker(event));
    });

    let session = Session::new(
        translator,
        synthesizer,
        default_engine(),
        default_output(),
        sink,
        args.session_config(),
    )
    .context("Failed to initialize speech engine")?;

    let mut shell = Shell::new(session, TerminalDialogs::new(), rx)
        .context("Failed to read speech engine defaults")?;
    shell.form_mut().language = language;

    spawn_input_reader(tx).context("Failed to start input reader")?;
    info!(language = language.name, "shell ready");
    shell.run();

    Ok(())
}

fn init_tracing(args: &Args) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

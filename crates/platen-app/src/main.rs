// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platen — scan paper recipes into categorized, reviewable PDFs.
//
// Entry point. Initialises logging, loads the remembered recipe folder,
// selects a scanner source once per run, and drives scan sessions until the
// operator is done.

mod prompt;

use std::path::PathBuf;

use platen_core::config::AppConfig;
use platen_core::error::{PlatenError, Result};
use platen_core::human_errors::humanize_error;
use platen_scanner::traits::SourceManager;
use platen_scanner::SyntheticScanner;
use platen_session::{ScanSession, SessionOutcome};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Platen starting");

    if let Err(err) = run() {
        report(&err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut config = AppConfig::load();
    let base_dir = base_dir_from_args(&config);
    std::fs::create_dir_all(&base_dir)?;
    println!("Recipe folder: {}", base_dir.display());

    config.last_path = Some(base_dir.clone());
    config.save();

    // The synthetic backend is the only one compiled in; hardware backends
    // (TWAIN, SANE, WIA) plug in behind the platen-scanner traits.
    let scanner = SyntheticScanner::letter();
    let source_name = select_source(&scanner)?;
    tracing::info!(source = %source_name, "scanner source selected");

    loop {
        let Some(form) = prompt::read_recipe_form() else {
            println!("No recipe entered.");
            break;
        };
        let session = ScanSession::new(form, &scanner, source_name.clone(), &base_dir)?;

        // A failed session ends that session, never the app.
        match session.run(&mut prompt::TerminalPrompter) {
            Ok(SessionOutcome::Completed { pdf_path, pages }) => {
                println!("Saved {pages}-page recipe to {}", pdf_path.display());
            }
            Ok(SessionOutcome::Aborted) => {
                println!("Scan cancelled; nothing was saved.");
            }
            Err(err) => report(&err),
        }

        if !prompt::ask_yes_no("Scan another recipe?") {
            break;
        }
    }

    Ok(())
}

/// `--base <dir>` overrides the remembered folder for this run.
fn base_dir_from_args(config: &AppConfig) -> PathBuf {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--base" {
            if let Some(dir) = args.next() {
                return PathBuf::from(dir);
            }
        }
    }
    config.base_dir()
}

/// Pick a scanner source: the only one if there is one, otherwise by number.
/// Declining the selection (or a closed stdin) counts as no device.
fn select_source(manager: &dyn SourceManager) -> Result<String> {
    let sources = manager.sources()?;
    if sources.is_empty() {
        return Err(PlatenError::DeviceUnavailable(
            "no scanner sources found".into(),
        ));
    }
    prompt::choose_source(&sources)
        .ok_or_else(|| PlatenError::DeviceUnavailable("no scanner selected".into()))
}

fn report(err: &PlatenError) {
    let human = humanize_error(err);
    tracing::error!(%err, "operation failed");
    eprintln!("{}", human.message);
    eprintln!("{}", human.suggestion);
}

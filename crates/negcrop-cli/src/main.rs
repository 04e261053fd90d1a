// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// negcrop — film negative frame finder.
//
// Entry point. Initialises logging, builds the detector from the config file
// and flags, and runs every scan named on the command line.

mod cli;

use clap::Parser;
use negcrop_core::NegcropError;
use negcrop_core::human_errors::{Scope, humanize_error};
use negcrop_detect::{FileOptions, FrameDetector, run_batch};
use tracing_subscriber::EnvFilter;

use cli::{Cli, ExitCode};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!(files = cli.files.len(), "negcrop starting");
    run(&cli).into()
}

fn run(cli: &Cli) -> ExitCode {
    let detector = match cli.detector_config().and_then(FrameDetector::new) {
        Ok(detector) => detector,
        Err(err) => {
            report(None, &err);
            return ExitCode::ConfigError;
        }
    };

    let options = FileOptions {
        write_analysis: !cli.no_analysis,
    };
    let summary = run_batch(&detector, &cli.files, &options);

    if cli.json {
        for (path, detection) in &summary.processed {
            let record = serde_json::json!({
                "file": path.display().to_string(),
                "detection": detection,
            });
            println!("{record}");
        }
    }

    for (path, err) in &summary.failed {
        report(Some(path), err);
    }

    if summary.is_success() {
        ExitCode::Success
    } else {
        eprintln!(
            "{} of {} scan(s) failed.",
            summary.failed.len(),
            cli.files.len()
        );
        ExitCode::FilesFailed
    }
}

fn report(path: Option<&std::path::Path>, err: &NegcropError) {
    let human = humanize_error(err);
    match path {
        Some(path) => eprintln!("{}: {}", path.display(), human.message),
        None => eprintln!("{}", human.message),
    }
    eprintln!("  {}", human.suggestion);
    if human.scope == Scope::Run {
        eprintln!("  Nothing was processed.");
    }
}

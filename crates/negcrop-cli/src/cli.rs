// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and exit codes.

use std::path::PathBuf;

use clap::Parser;
use negcrop_core::DetectorConfig;
use negcrop_core::error::Result;

/// Process exit codes.
///
/// Code 2 is left to clap, which exits with it on argument errors before
/// any of these apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    /// At least one scan could not be processed.
    FilesFailed = 1,
    /// The configuration file could not be loaded or is invalid.
    ConfigError = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Find the exposed frame in film negative scans and write crop sidecars.
///
/// For every SCAN a `<SCAN>.txt` file is written next to it holding left,
/// right, top and bottom crop fractions and a rotation in degrees, one per
/// line. Unless disabled, `<SCAN>-analysis.jpg` shows what was detected.
#[derive(Parser, Debug)]
#[command(name = "negcrop")]
#[command(version)]
pub struct Cli {
    /// Scan files to process
    #[arg(required = true, value_name = "SCAN")]
    pub files: Vec<PathBuf>,

    /// JSON file with detector settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target long/short side ratio of the frame (overrides the config file)
    #[arg(long, value_name = "RATIO")]
    pub target_ratio: Option<f64>,

    /// Largest ratio deviation still corrected (overrides the config file)
    #[arg(long, value_name = "DIFF")]
    pub max_difference: Option<f64>,

    /// Do not write the analysis image
    #[arg(long)]
    pub no_analysis: bool,

    /// Print one JSON detection record per processed scan to stdout
    #[arg(long)]
    pub json: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the detector configuration: file (or defaults), then flag
    /// overrides. Validation happens when the detector is created.
    pub fn detector_config(&self) -> Result<DetectorConfig> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::load(path)?,
            None => DetectorConfig::default(),
        };
        if let Some(ratio) = self.target_ratio {
            config.target_ratio = ratio;
        }
        if let Some(diff) = self.max_difference {
            config.max_difference = diff;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_files_and_flags() {
        let cli = Cli::try_parse_from([
            "negcrop",
            "a.tif",
            "b.tif",
            "--target-ratio",
            "1.333",
            "--no-analysis",
        ])
        .expect("parse");
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.target_ratio, Some(1.333));
        assert!(cli.no_analysis);
        assert!(!cli.json);
    }

    #[test]
    fn exit_codes_leave_two_to_clap() {
        let codes = [ExitCode::Success, ExitCode::FilesFailed, ExitCode::ConfigError];
        assert_eq!(codes.map(|c| c as u8), [0, 1, 3]);
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["negcrop"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"target_ratio": 1.25, "max_difference": 0.1}}"#).expect("write");

        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["negcrop", "x.jpg", "--config", &path, "--max-difference", "0.2"])
            .expect("parse");
        let config = cli.detector_config().expect("config");
        assert_eq!(config.target_ratio, 1.25);
        assert_eq!(config.max_difference, 0.2);
        assert_eq!(config.upper_threshold, DetectorConfig::default().upper_threshold);
    }

    #[test]
    fn defaults_without_config_file() {
        let cli = Cli::try_parse_from(["negcrop", "x.jpg"]).expect("parse");
        let config = cli.detector_config().expect("config");
        assert_eq!(config.target_ratio, 1.5);
        assert_eq!(config.max_difference, 0.3);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch driver — detect, write the sidecar and optionally the analysis image
// for each scan in turn. A failing scan never stops the rest of the batch.

use std::path::{Path, PathBuf};

use negcrop_core::error::{NegcropError, Result};
use tracing::{error, info, instrument, warn};

use crate::detector::{Detection, FrameDetector};
use crate::output::{save_analysis, write_sidecar};

/// Per-file output switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOptions {
    /// Write `<name>-analysis.jpg` next to each scan.
    pub write_analysis: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            write_analysis: true,
        }
    }
}

/// What happened across a batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Scans that produced a sidecar.
    pub processed: Vec<(PathBuf, Detection)>,
    /// Scans that failed, with the reason.
    pub failed: Vec<(PathBuf, NegcropError)>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of processed scans where nothing was detected.
    pub fn undetected(&self) -> usize {
        self.processed
            .iter()
            .filter(|(_, detection)| !detection.is_detected())
            .count()
    }
}

/// Process one scan: decode, detect, write the sidecar, then the analysis
/// image if enabled.
///
/// Both files are written for any decodable scan. Without a detection the
/// sidecar holds the full-frame record and the analysis image is a plain copy.
/// The sidecar is the scan's result: once it is on disk, a failure to write
/// the analysis image is only logged.
#[instrument(skip(detector, options), fields(path = %path.display()))]
pub fn process_file(
    detector: &FrameDetector,
    path: &Path,
    options: &FileOptions,
) -> Result<Detection> {
    let image = FrameDetector::open_scan(path)?;
    let detection = detector.detect(&image)?;

    let sidecar = write_sidecar(path, &detection.crop)?;
    info!(sidecar = %sidecar.display(), "Crop record written");

    if !detection.is_detected() {
        warn!("No frame detected; full-frame crop written");
    }
    if options.write_analysis {
        if let Err(err) = save_analysis(path, &image, &detection) {
            warn!(error = %err, "Analysis image not written");
        }
    }

    Ok(detection)
}

/// Run [`process_file`] over every path. Errors are logged and collected.
pub fn run_batch<P: AsRef<Path>>(
    detector: &FrameDetector,
    paths: &[P],
    options: &FileOptions,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for path in paths {
        let path = path.as_ref();
        match process_file(detector, path, options) {
            Ok(detection) => summary.processed.push((path.to_path_buf(), detection)),
            Err(err) => {
                error!(path = %path.display(), error = %err, "Scan failed");
                summary.failed.push((path.to_path_buf(), err));
            }
        }
    }

    info!(
        processed = summary.processed.len(),
        failed = summary.failed.len(),
        undetected = summary.undetected(),
        "Batch complete"
    );
    summary
}

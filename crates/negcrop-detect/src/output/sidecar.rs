// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sidecar text record: five CRLF-separated numbers (left, right, top, bottom,
// rotation) written next to the scan for the editing tool's plugin.

use std::path::{Path, PathBuf};

use negcrop_core::CropResult;
use negcrop_core::error::Result;
use tracing::debug;

/// Field separator expected by the plugin.
const SEPARATOR: &str = "\r\n";

/// `<scan file name>.txt`, next to the scan.
pub fn sidecar_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".txt");
    PathBuf::from(name)
}

/// Render the record. Each value uses Rust's shortest round-trip decimal form
/// with at least one fractional digit.
pub fn format_sidecar(crop: &CropResult) -> String {
    crop.fields()
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Write the record for `input` and return the path written.
pub fn write_sidecar(input: &Path, crop: &CropResult) -> Result<PathBuf> {
    let path = sidecar_path(input);
    std::fs::write(&path, format_sidecar(crop))?;
    debug!(path = %path.display(), "Sidecar written");
    Ok(path)
}

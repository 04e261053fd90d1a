// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every technical error is mapped to a plain summary with a suggestion and a
// flag saying whether the rest of a batch is affected.

use crate::error::NegcropError;

/// How far an error reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the current file is lost; the batch carries on.
    File,
    /// Nothing can be processed until the user fixes something.
    Run,
}

/// A plain message with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
    /// Whether the error ends the whole run.
    pub scope: Scope,
}

/// Convert a `NegcropError` into something a person at a scanning desk can act on.
pub fn humanize_error(err: &NegcropError) -> HumanError {
    match err {
        NegcropError::ImageDecode(detail) => HumanError {
            message: "This file could not be read as an image.".into(),
            suggestion: format!("Export the scan as JPEG, PNG or TIFF and try again. ({detail})"),
            scope: Scope::File,
        },

        NegcropError::InvalidImage(detail) => HumanError {
            message: "This image has no usable pixels.".into(),
            suggestion: format!("Check the scan was saved completely. ({detail})"),
            scope: Scope::File,
        },

        NegcropError::UnsupportedChannels { found } => HumanError {
            message: "Only colour scans are supported.".into(),
            suggestion: format!(
                "Save the scan as 3-channel RGB without alpha (this file has {found} channel(s))."
            ),
            scope: Scope::File,
        },

        NegcropError::ImageEncode(detail) => HumanError {
            message: "The analysis image could not be written.".into(),
            suggestion: format!("Check the folder is writable, or pass --no-analysis. ({detail})"),
            scope: Scope::File,
        },

        NegcropError::Config(detail) => HumanError {
            message: "The detector settings are not valid.".into(),
            suggestion: format!("Fix the configuration value and run again. ({detail})"),
            scope: Scope::Run,
        },

        NegcropError::Io(io) => match io.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file was not found.".into(),
                suggestion: "Check the path and spelling of the file name.".into(),
                scope: Scope::File,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied.".into(),
                suggestion: "Make sure you can read the scan and write next to it.".into(),
                scope: Scope::File,
            },
            _ => HumanError {
                message: "A file could not be read or written.".into(),
                suggestion: format!("Check the disk and try again. ({io})"),
                scope: Scope::File,
            },
        },

        NegcropError::Serialization(detail) => HumanError {
            message: "The configuration file is not valid JSON.".into(),
            suggestion: format!("Correct the JSON syntax and run again. ({detail})"),
            scope: Scope::Run,
        },
    }
}

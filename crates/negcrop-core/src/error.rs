// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for negcrop.

use thiserror::Error;

/// Top-level error type for all negcrop operations.
///
/// Every variant is scoped to a single image: a failure never leaves state
/// behind that could influence the next file in a batch.
#[derive(Debug, Error)]
pub enum NegcropError {
    // -- Input errors --
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("unsupported channel count: expected 3 colour channels, found {found}")]
    UnsupportedChannels { found: u8 },

    // -- Output errors --
    #[error("failed to write image: {0}")]
    ImageEncode(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NegcropError>;

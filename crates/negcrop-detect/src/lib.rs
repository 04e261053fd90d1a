// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// negcrop-detect — Exposure-boundary detection for film negative scans.
//
// Provides the scan preprocessing (luma, edge-preserving smoothing, histogram
// equalization, light-source mask), the per-threshold candidate extractor, the
// adaptive threshold sweep with median aggregation, aspect-ratio correction,
// crop derivation, and the per-file outputs (sidecar text and analysis image).

pub mod batch;
pub mod crop;
pub mod detector;
pub mod geometry;
pub mod output;
pub mod scan;
pub mod sweep;

// Re-export the primary entry points so callers can use `negcrop_detect::FrameDetector` etc.
pub use batch::{BatchSummary, FileOptions, process_file, run_batch};
pub use detector::{Detection, FrameDetector};
pub use scan::candidate::{Candidate, CandidateSource, ImageCandidates};
pub use scan::preprocess::{IgnoreMask, Preprocessed, preprocess};
pub use sweep::search::{SweepOutcome, SweepReport, adaptive_search};

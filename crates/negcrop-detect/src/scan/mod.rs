// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan stage — preprocessing of the raw scan into an equalised luma channel
// plus light-source mask, and per-threshold candidate extraction.

pub mod candidate;
pub mod preprocess;

pub use candidate::{Candidate, CandidateSource, ImageCandidates};
pub use preprocess::{IgnoreMask, Preprocessed, preprocess};

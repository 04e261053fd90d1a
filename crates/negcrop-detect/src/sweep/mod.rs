// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Threshold sweep — adaptive lower-threshold search and per-field median
// aggregation of the collected candidates.

pub mod median;
pub mod search;

pub use median::median_rect;
pub use search::{SweepOutcome, SweepReport, adaptive_search};

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-file outputs — the sidecar text record read by the editing tool and the
// annotated analysis image.

pub mod annotate;
pub mod sidecar;

pub use annotate::{analysis_path, annotate, save_analysis};
pub use sidecar::{format_sidecar, sidecar_path, write_sidecar};

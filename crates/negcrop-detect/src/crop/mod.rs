// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop stage — inset, aspect-ratio correction, rotation folding, and
// conversion of the final rectangle into edge-fraction crop values.

pub mod aspect;
pub mod derive;

pub use aspect::{AspectCorrection, correct_aspect_ratio};
pub use derive::{CropPlan, crop_fractions, fold_rotation, inset_rect, plan_crop, rotation_for_angle};

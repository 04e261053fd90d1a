// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry helpers — contour area, convex hull, and minimum-area rotated
// rectangle fitting over contour points.

pub mod rect_fit;

pub use rect_fit::{contour_area, convex_hull, min_area_rect};

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NegcropError, Result};

/// Tuning constants for the exposure-boundary detector.
///
/// Passed explicitly into the detector; nothing here is global. Any field
/// missing from a JSON config file falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Fraction of each image dimension a full-frame detection may cover.
    /// A candidate whose area reaches `(h * c) * (w * c)` ends the sweep.
    pub max_coverage: f64,
    /// Fraction of the maximal area a candidate must reach to be collected.
    pub plausible_fraction: f64,
    /// Uniform inset, as a fraction of the mean side length.
    pub inset_percent: f64,
    /// Larger side divided by smaller side of the film frame (1.5 for 35mm).
    pub target_ratio: f64,
    /// Largest ratio error the aspect corrector will still correct.
    pub max_difference: f64,
    /// Fixed upper bound of the threshold sweep (exclusive).
    pub upper_threshold: u32,
    /// Threshold increment after a plausible candidate.
    pub fine_step: u32,
    /// Threshold increment after an implausibly small candidate.
    pub coarse_step: u32,
    /// Equalised intensities strictly above this are treated as bare light source.
    pub ignore_cutoff: u8,
    /// Chebyshev radius by which the excluded (near-white) area is grown.
    pub ignore_grow_radius: u8,
    /// Chebyshev radius of the noise-removing erosion applied to each binary mask.
    pub noise_erode_radius: u8,
    /// Window diameter of the edge-preserving smoothing filter.
    pub smoothing_diameter: u32,
    /// Intensity sigma of the smoothing filter.
    pub smoothing_sigma_color: f32,
    /// Spatial sigma of the smoothing filter.
    pub smoothing_sigma_space: f32,
    /// Also feed the candidate that ended the sweep early into the median.
    pub keep_terminal_candidate: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_coverage: 0.95,
            plausible_fraction: 0.55,
            inset_percent: 0.005,
            target_ratio: 1.5,
            max_difference: 0.3,
            upper_threshold: 220,
            fine_step: 1,
            coarse_step: 5,
            ignore_cutoff: 240,
            // 3x3 kernel, 3 iterations.
            ignore_grow_radius: 3,
            // 5x5 kernel, 3 iterations.
            noise_erode_radius: 6,
            smoothing_diameter: 11,
            smoothing_sigma_color: 17.0,
            smoothing_sigma_space: 17.0,
            keep_terminal_candidate: false,
        }
    }
}

impl DetectorConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the sweep or the corrections meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_coverage > 0.0 && self.max_coverage <= 1.0) {
            return Err(NegcropError::Config(format!(
                "max_coverage must be in (0, 1], got {}",
                self.max_coverage
            )));
        }
        if !(self.plausible_fraction > 0.0 && self.plausible_fraction <= 1.0) {
            return Err(NegcropError::Config(format!(
                "plausible_fraction must be in (0, 1], got {}",
                self.plausible_fraction
            )));
        }
        if !(0.0..0.5).contains(&self.inset_percent) {
            return Err(NegcropError::Config(format!(
                "inset_percent must be in [0, 0.5), got {}",
                self.inset_percent
            )));
        }
        if !(self.target_ratio >= 1.0 && self.target_ratio.is_finite()) {
            return Err(NegcropError::Config(format!(
                "target_ratio must be a finite value >= 1, got {}",
                self.target_ratio
            )));
        }
        if !(self.max_difference >= 0.0 && self.max_difference.is_finite()) {
            return Err(NegcropError::Config(format!(
                "max_difference must be a finite value >= 0, got {}",
                self.max_difference
            )));
        }
        if self.upper_threshold == 0 || self.upper_threshold > 255 {
            return Err(NegcropError::Config(format!(
                "upper_threshold must be in 1..=255, got {}",
                self.upper_threshold
            )));
        }
        if self.fine_step == 0 || self.coarse_step == 0 {
            return Err(NegcropError::Config(
                "threshold steps must be at least 1".into(),
            ));
        }
        if self.smoothing_diameter == 0 {
            return Err(NegcropError::Config(
                "smoothing_diameter must be at least 1".into(),
            ));
        }
        if !(self.smoothing_sigma_color > 0.0 && self.smoothing_sigma_space > 0.0) {
            return Err(NegcropError::Config(
                "smoothing sigmas must be positive".into(),
            ));
        }
        Ok(())
    }
}

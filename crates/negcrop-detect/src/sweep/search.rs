// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptive threshold search — sweep the lower binarization threshold upwards,
// collecting every plausibly sized candidate, and reduce them to one
// rectangle.

use negcrop_core::{DetectorConfig, RotatedRect, ThresholdState};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::scan::candidate::CandidateSource;
use crate::sweep::median::median_rect;

/// Summary of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Number of candidate extractions performed.
    pub iterations: u32,
    /// Number of rectangles fed to the median.
    pub collected: usize,
    /// Whether a maximal-coverage candidate ended the sweep.
    pub stopped_early: bool,
    /// Threshold bounds when the sweep ended.
    pub final_thresholds: ThresholdState,
}

/// Result of the adaptive search.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// Per-field median of the collected candidates; `None` when nothing was collected.
    pub rect: Option<RotatedRect>,
    /// Collected candidates, in sweep order.
    pub candidates: Vec<RotatedRect>,
    pub report: SweepReport,
}

/// Run the threshold sweep over `source` for an image of `width` x `height`.
///
/// ## Stepping
///
/// Starting at `lower = 0` with the fixed upper bound, each iteration
/// extracts one candidate and compares its area with the maximal coverage
/// area `(height * c) * (width * c)`:
///
/// 1. at or above it: stop; the candidate is kept only when
///    `keep_terminal_candidate` is set
/// 2. at or above `plausible_fraction` of it: collect it, step by `fine_step`
/// 3. otherwise: step by `coarse_step`
///
/// `lower` strictly increases, so the sweep ends after at most
/// `upper_threshold` iterations.
#[instrument(skip(source, config))]
pub fn adaptive_search<S: CandidateSource + ?Sized>(
    source: &S,
    width: u32,
    height: u32,
    config: &DetectorConfig,
) -> SweepOutcome {
    let max_area = (height as f64 * config.max_coverage) * (width as f64 * config.max_coverage);
    let plausible_area = max_area * config.plausible_fraction;

    let mut thresholds = ThresholdState::new(0, config.upper_threshold);
    let mut candidates: Vec<RotatedRect> = Vec::new();
    let mut iterations = 0u32;
    let mut stopped_early = false;

    while thresholds.is_open() {
        iterations += 1;
        let candidate = source.extract(thresholds);

        if candidate.area >= max_area {
            debug!(
                lower = thresholds.lower,
                area = candidate.area,
                "Maximal-coverage candidate; ending sweep"
            );
            if config.keep_terminal_candidate {
                candidates.extend(candidate.rect);
            }
            stopped_early = true;
            break;
        }

        if candidate.area >= plausible_area {
            debug!(
                lower = thresholds.lower,
                area = candidate.area,
                "Plausible candidate collected"
            );
            candidates.extend(candidate.rect);
            thresholds = thresholds.advance(config.fine_step);
        } else {
            debug!(
                lower = thresholds.lower,
                area = candidate.area,
                "Candidate too small"
            );
            thresholds = thresholds.advance(config.coarse_step);
        }
    }

    let rect = median_rect(&candidates);
    let report = SweepReport {
        iterations,
        collected: candidates.len(),
        stopped_early,
        final_thresholds: thresholds,
    };

    info!(
        iterations,
        collected = report.collected,
        stopped_early,
        detected = rect.is_some(),
        "Threshold sweep complete"
    );

    SweepOutcome {
        rect,
        candidates,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::candidate::Candidate;
    use negcrop_core::{Point2, Size2};
    use std::cell::RefCell;

    /// Candidate source driven by a closure over the lower threshold,
    /// recording every threshold it was asked about.
    struct Scripted<F: Fn(u32) -> Candidate> {
        script: F,
        calls: RefCell<Vec<u32>>,
    }

    impl<F: Fn(u32) -> Candidate> Scripted<F> {
        fn new(script: F) -> Self {
            Self {
                script,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl<F: Fn(u32) -> Candidate> CandidateSource for Scripted<F> {
        fn extract(&self, thresholds: ThresholdState) -> Candidate {
            self.calls.borrow_mut().push(thresholds.lower);
            (self.script)(thresholds.lower)
        }
    }

    fn rect_with_width(width: f64) -> RotatedRect {
        RotatedRect::new(Point2::new(50.0, 50.0), Size2::new(width, 60.0), -90.0)
    }

    // 100 x 100 image: max area = 95 * 95 = 9025, plausible >= 4963.75.
    const MAX_AREA: f64 = 9025.0;

    #[test]
    fn nothing_found_sweeps_coarsely_and_reports_no_rect() {
        let source = Scripted::new(|_| Candidate::NONE);
        let outcome = adaptive_search(&source, 100, 100, &DetectorConfig::default());

        assert!(outcome.rect.is_none());
        assert_eq!(outcome.report.iterations, 44);
        assert_eq!(outcome.report.collected, 0);
        assert!(!outcome.report.stopped_early);
        let calls = source.calls.borrow();
        assert_eq!(calls.first(), Some(&0));
        assert_eq!(calls.last(), Some(&215));
        assert!(calls.windows(2).all(|w| w[1] - w[0] == 5));
    }

    #[test]
    fn plausible_candidates_step_finely() {
        let source = Scripted::new(|lower| {
            if (100..110).contains(&lower) {
                Candidate {
                    rect: Some(rect_with_width(lower as f64)),
                    area: 6000.0,
                }
            } else {
                Candidate::NONE
            }
        });
        let outcome = adaptive_search(&source, 100, 100, &DetectorConfig::default());

        assert_eq!(outcome.report.collected, 10);
        let widths: Vec<f64> = outcome.candidates.iter().map(|r| r.size.width).collect();
        assert_eq!(widths, (100..110).map(|v| v as f64).collect::<Vec<_>>());
        // Median of 100..=109.
        assert_eq!(outcome.rect.map(|r| r.size.width), Some(104.5));
        // 20 coarse steps to reach 100, 10 fine steps, then coarse to 220.
        assert_eq!(outcome.report.iterations, 20 + 10 + 22);
        assert_eq!(outcome.report.final_thresholds.lower, 220);
    }

    #[test]
    fn plausible_boundary_is_inclusive() {
        let plausible = MAX_AREA * 0.55;
        let source = Scripted::new(move |lower| Candidate {
            rect: Some(rect_with_width(1.0)),
            area: if lower == 0 { plausible } else { plausible - 1.0 },
        });
        let outcome = adaptive_search(&source, 100, 100, &DetectorConfig::default());
        assert_eq!(outcome.report.collected, 1);
        assert_eq!(source.calls.borrow()[1], 1);
    }

    #[test]
    fn maximal_candidate_stops_and_is_discarded_by_default() {
        let source = Scripted::new(|lower| match lower {
            0..=2 => Candidate {
                rect: Some(rect_with_width(10.0)),
                area: 6000.0,
            },
            _ => Candidate {
                rect: Some(rect_with_width(1000.0)),
                area: MAX_AREA,
            },
        });
        let outcome = adaptive_search(&source, 100, 100, &DetectorConfig::default());

        assert!(outcome.report.stopped_early);
        assert_eq!(outcome.report.iterations, 4);
        assert_eq!(outcome.report.collected, 3);
        assert_eq!(outcome.rect.map(|r| r.size.width), Some(10.0));
    }

    #[test]
    fn keeping_terminal_candidate_changes_the_median() {
        let script = |lower: u32| match lower {
            0 => Candidate {
                rect: Some(rect_with_width(10.0)),
                area: 6000.0,
            },
            _ => Candidate {
                rect: Some(rect_with_width(1000.0)),
                area: MAX_AREA + 1.0,
            },
        };
        let literal = adaptive_search(&Scripted::new(script), 100, 100, &DetectorConfig::default());
        let keeping = adaptive_search(
            &Scripted::new(script),
            100,
            100,
            &DetectorConfig {
                keep_terminal_candidate: true,
                ..DetectorConfig::default()
            },
        );

        assert_eq!(literal.report.collected, 1);
        assert_eq!(keeping.report.collected, 2);
        assert_eq!(literal.rect.map(|r| r.size.width), Some(10.0));
        assert_eq!(keeping.rect.map(|r| r.size.width), Some(505.0));
    }

    #[test]
    fn immediate_maximal_candidate_means_no_detection() {
        let source = Scripted::new(|_| Candidate {
            rect: Some(rect_with_width(95.0)),
            area: MAX_AREA,
        });
        let outcome = adaptive_search(&source, 100, 100, &DetectorConfig::default());
        assert!(outcome.rect.is_none());
        assert_eq!(outcome.report.iterations, 1);

        let keeping = adaptive_search(
            &source,
            100,
            100,
            &DetectorConfig {
                keep_terminal_candidate: true,
                ..DetectorConfig::default()
            },
        );
        assert_eq!(keeping.rect.map(|r| r.size.width), Some(95.0));
    }

    #[test]
    fn sweep_is_bounded_for_any_input() {
        // Always plausible: the slowest possible sweep, one step at a time.
        let source = Scripted::new(|_| Candidate {
            rect: Some(rect_with_width(5.0)),
            area: 8000.0,
        });
        let outcome = adaptive_search(&source, 100, 100, &DetectorConfig::default());
        assert_eq!(outcome.report.iterations, 220);
        assert!(outcome.report.iterations <= 221);

        // Alternating sizes.
        let source = Scripted::new(|lower| Candidate {
            rect: Some(rect_with_width(5.0)),
            area: if lower % 2 == 0 { 8000.0 } else { 10.0 },
        });
        let outcome = adaptive_search(&source, 100, 100, &DetectorConfig::default());
        assert!(outcome.report.iterations <= 221);
        assert!(!outcome.report.final_thresholds.is_open());
    }
}

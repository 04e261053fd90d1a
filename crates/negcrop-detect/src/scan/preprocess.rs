// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan preprocessing — luma conversion, edge-preserving smoothing, histogram
// equalization, and the mask that hides the bare light source.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::bilateral_filter;
use imageproc::morphology::dilate;
use imageproc::stats::cumulative_histogram;
use negcrop_core::DetectorConfig;
use negcrop_core::error::{NegcropError, Result};
use tracing::{debug, instrument};

/// Pixel value marking an eligible pixel in the mask image.
const ELIGIBLE: u8 = 255;

/// Per-pixel eligibility raster, same dimensions as the scan.
///
/// Built once per image and read-only afterwards. Stored as a `GrayImage`
/// with 255 for eligible pixels and 0 for excluded ones so it can be
/// combined with binary masks directly.
#[derive(Debug, Clone)]
pub struct IgnoreMask {
    mask: GrayImage,
}

impl IgnoreMask {
    /// Exclude everything brighter than `cutoff`, then grow the excluded
    /// area by `grow_radius` pixels (Chebyshev distance) so halo and bleed
    /// around blown-out regions is excluded too.
    pub fn from_equalized(gray: &GrayImage, cutoff: u8, grow_radius: u8) -> Self {
        let (width, height) = gray.dimensions();
        let bright = GrayImage::from_fn(width, height, |x, y| {
            if gray.get_pixel(x, y).0[0] > cutoff {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });

        let excluded = if grow_radius > 0 {
            dilate(&bright, Norm::LInf, grow_radius)
        } else {
            bright
        };

        let mask = GrayImage::from_fn(width, height, |x, y| {
            Luma([ELIGIBLE - excluded.get_pixel(x, y).0[0]])
        });
        Self { mask }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.mask.dimensions()
    }

    /// Whether the pixel at `(x, y)` may become foreground.
    pub fn is_eligible(&self, x: u32, y: u32) -> bool {
        self.mask.get_pixel(x, y).0[0] == ELIGIBLE
    }

    /// Number of eligible pixels.
    pub fn eligible_count(&self) -> usize {
        self.mask.pixels().filter(|p| p.0[0] == ELIGIBLE).count()
    }

    /// Borrow the mask as an image (255 = eligible).
    pub fn as_image(&self) -> &GrayImage {
        &self.mask
    }
}

/// Output of the preprocessing stage.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Smoothed, equalised luma channel.
    pub gray: GrayImage,
    /// Light-source exclusion mask.
    pub mask: IgnoreMask,
}

impl Preprocessed {
    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    pub fn height(&self) -> u32 {
        self.gray.height()
    }
}

/// Reject scans the detector cannot work with: empty rasters and anything
/// that is not 3-channel colour.
pub fn validate_scan(image: &DynamicImage) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(NegcropError::InvalidImage(format!(
            "zero-sized image ({}x{})",
            image.width(),
            image.height()
        )));
    }
    let channels = image.color().channel_count();
    if channels != 3 {
        return Err(NegcropError::UnsupportedChannels { found: channels });
    }
    Ok(())
}

/// Run the preprocessing pipeline:
///
/// 1. Convert to luma
/// 2. Bilateral smoothing to suppress sensor noise while keeping the frame edge sharp
/// 3. Histogram equalization over the full 0..=255 range so the threshold sweep
///    is insensitive to scan exposure
/// 4. Build the light-source mask from the equalised channel
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn preprocess(image: &DynamicImage, config: &DetectorConfig) -> Result<Preprocessed> {
    validate_scan(image)?;

    let luma = image.to_luma8();
    let smoothed = bilateral_filter(
        &luma,
        config.smoothing_diameter,
        config.smoothing_sigma_color,
        config.smoothing_sigma_space,
    );
    let gray = equalize(&smoothed);
    let mask = IgnoreMask::from_equalized(&gray, config.ignore_cutoff, config.ignore_grow_radius);

    debug!(
        eligible = mask.eligible_count(),
        total = gray.width() as u64 * gray.height() as u64,
        "Preprocessing complete"
    );
    Ok(Preprocessed { gray, mask })
}

/// Histogram equalization that stretches the darkest occupied level to 0
/// and the brightest to 255.
///
/// Each level maps to `round((cdf(v) - cdf_min) * 255 / (total - cdf_min))`,
/// where `cdf_min` is the count of the darkest level present. A single-level
/// image is returned unchanged.
pub fn equalize(gray: &GrayImage) -> GrayImage {
    let cdf = cumulative_histogram(gray).channels[0];
    let total = cdf[255];
    let cdf_min = cdf.iter().copied().find(|&count| count > 0).unwrap_or(0);

    if total == cdf_min {
        return gray.clone();
    }

    let scale = 255.0 / (total - cdf_min) as f64;
    let mut lut = [0u8; 256];
    for (level, out) in lut.iter_mut().enumerate() {
        let above_min = cdf[level].saturating_sub(cdf_min) as f64;
        *out = (above_min * scale).round().min(255.0) as u8;
    }

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([lut[gray.get_pixel(x, y).0[0] as usize]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, RgbaImage};

    #[test]
    fn bilateral_preserves_uniform_image() {
        let img = GrayImage::from_pixel(20, 20, Luma([123u8]));
        let out = bilateral_filter(&img, 11, 17.0, 17.0);
        assert!(out.pixels().all(|p| p.0[0] == 123));
    }

    #[test]
    fn bilateral_preserves_hard_edges() {
        let img = GrayImage::from_fn(30, 10, |x, _| if x < 15 { Luma([20u8]) } else { Luma([220u8]) });
        let out = bilateral_filter(&img, 11, 17.0, 17.0);
        assert_eq!(out.get_pixel(14, 5).0[0], 20);
        assert_eq!(out.get_pixel(15, 5).0[0], 220);
    }

    #[test]
    fn bilateral_smooths_small_noise() {
        let mut img = GrayImage::from_pixel(21, 21, Luma([100u8]));
        img.put_pixel(10, 10, Luma([110u8]));
        let out = bilateral_filter(&img, 11, 17.0, 17.0);
        let center = out.get_pixel(10, 10).0[0];
        assert!(center < 110 && center >= 100, "got {}", center);
    }

    #[test]
    fn equalize_stretches_to_full_range() {
        // Two levels, the dark one covering 90% of the pixels.
        let img = GrayImage::from_fn(10, 10, |x, _| if x < 9 { Luma([30u8]) } else { Luma([250u8]) });
        let out = equalize(&img);
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(9, 0).0[0], 255);
    }

    #[test]
    fn equalize_spreads_intermediate_levels_by_rank() {
        // Columns at levels 10, 20, 30, 40 with 25 pixels each.
        let img = GrayImage::from_fn(4, 25, |x, _| Luma([10 + 10 * x as u8]));
        let out = equalize(&img);
        // cdf 25/50/75/100 with cdf_min 25: 0, 85, 170, 255.
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(1, 0).0[0], 85);
        assert_eq!(out.get_pixel(2, 0).0[0], 170);
        assert_eq!(out.get_pixel(3, 0).0[0], 255);
    }

    #[test]
    fn equalize_single_level_is_identity() {
        let img = GrayImage::from_pixel(6, 6, Luma([77u8]));
        assert_eq!(equalize(&img), img);
    }

    #[test]
    fn mask_excludes_bright_pixels_and_grows() {
        let mut gray = GrayImage::from_pixel(20, 20, Luma([100u8]));
        gray.put_pixel(10, 10, Luma([250u8]));

        let mask = IgnoreMask::from_equalized(&gray, 240, 3);
        assert!(!mask.is_eligible(10, 10));
        assert!(!mask.is_eligible(13, 13));
        assert!(mask.is_eligible(14, 10));
        assert_eq!(mask.eligible_count(), 400 - 49);
    }

    #[test]
    fn mask_cutoff_is_exclusive() {
        let gray = GrayImage::from_pixel(4, 4, Luma([240u8]));
        let mask = IgnoreMask::from_equalized(&gray, 240, 0);
        assert_eq!(mask.eligible_count(), 16);
    }

    #[test]
    fn preprocess_rejects_zero_sized_image() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        let err = preprocess(&img, &DetectorConfig::default()).unwrap_err();
        assert!(matches!(err, NegcropError::InvalidImage(_)));
    }

    #[test]
    fn preprocess_rejects_wrong_channel_count() {
        let gray = DynamicImage::ImageLuma8(GrayImage::new(8, 8));
        assert!(matches!(
            preprocess(&gray, &DetectorConfig::default()),
            Err(NegcropError::UnsupportedChannels { found: 1 })
        ));

        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        assert!(matches!(
            preprocess(&rgba, &DetectorConfig::default()),
            Err(NegcropError::UnsupportedChannels { found: 4 })
        ));
    }

    #[test]
    fn preprocess_masks_bright_background() {
        let img = RgbImage::from_fn(60, 40, |x, y| {
            if (10..50).contains(&x) && (10..30).contains(&y) {
                Rgb([30u8, 30, 30])
            } else {
                Rgb([250u8, 250, 250])
            }
        });
        let pre = preprocess(&DynamicImage::ImageRgb8(img), &DetectorConfig::default())
            .expect("preprocess");

        assert_eq!((pre.width(), pre.height()), (60, 40));
        assert!(!pre.mask.is_eligible(0, 0));
        assert!(pre.mask.is_eligible(30, 20));
        // Equalization pushes the background to full white.
        assert_eq!(pre.gray.get_pixel(0, 0).0[0], 255);
        assert!(pre.gray.get_pixel(30, 20).0[0] < pre.gray.get_pixel(0, 0).0[0]);
    }
}

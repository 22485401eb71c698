//! Adaptive red-hue candidate detection inside the skin region.

use image::{GrayImage, Luma, RgbImage};
use imageproc::filter::median_filter;
use serde::{Deserialize, Serialize};

use crate::color::{HUE_BINS, hue_bin};
use crate::config::DetectorConfig;
use crate::error::{DetectError, validate_image, validate_mask};

/// Hue histogram over the mask-selected pixels of one image.
#[derive(Debug, Clone)]
pub struct HueHistogram {
    counts: [u32; HUE_BINS],
    samples: u64,
}

impl HueHistogram {
    /// Counts the hue of every pixel the mask selects (any nonzero value).
    pub fn from_masked_pixels(image: &RgbImage, mask: &GrayImage) -> Self {
        let mut counts = [0u32; HUE_BINS];
        let mut samples = 0u64;
        for (pixel, mask_pixel) in image.pixels().zip(mask.pixels()) {
            if mask_pixel.0[0] == 0 {
                continue;
            }
            counts[hue_bin(*pixel)] += 1;
            samples += 1;
        }
        Self { counts, samples }
    }

    /// Number of pixels counted.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Index of the first maximal bin among the leading `probe_bins` bins.
    pub fn peak_below(&self, probe_bins: usize) -> usize {
        let probe = &self.counts[..probe_bins.min(HUE_BINS)];
        let mut peak = 0usize;
        for (bin, &count) in probe.iter().enumerate() {
            if count > probe[peak] {
                peak = bin;
            }
        }
        peak
    }
}

/// The hue band selected for one image, kept as a diagnostic trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueWindow {
    pub peak: usize,
    pub low: usize,
    pub high: usize,
}

/// Candidate mask plus the window that produced it.
///
/// `window` is `None` when the image held no skin pixels to probe.
#[derive(Debug, Clone)]
pub struct RedCandidates {
    pub mask: GrayImage,
    pub window: Option<HueWindow>,
}

/// Selects the inclusive hue acceptance window around a peak bin.
///
/// The upper edge saturates at the probe limit itself, not at
/// `peak + halfwidth`: a peak of 15 with the default half-width spans
/// 5..=20, never 5..=25.
pub fn hue_window(peak: usize, probe_bins: usize, halfwidth: usize) -> HueWindow {
    HueWindow {
        peak,
        low: peak.saturating_sub(halfwidth),
        high: (peak + halfwidth).min(probe_bins),
    }
}

/// Detects reddish candidate pixels inside the skin region.
///
/// A hue histogram over the skin pixels picks the strongest bin in the red
/// end; every pixel whose hue falls inside the window around that peak keeps
/// its skin-mask value. A 5x5 median pass then removes salt noise. An image
/// with zero skin pixels short-circuits to an all-zero mask with no window.
pub fn detect_color_candidates(
    image: &RgbImage,
    skin_mask: &GrayImage,
    config: &DetectorConfig,
) -> Result<RedCandidates, DetectError> {
    validate_image(image)?;
    validate_mask(image, skin_mask)?;
    let params = &config.redness;

    let histogram = HueHistogram::from_masked_pixels(image, skin_mask);
    if histogram.samples() == 0 {
        tracing::debug!("no skin pixels, skipping hue analysis");
        return Ok(RedCandidates {
            mask: GrayImage::new(image.width(), image.height()),
            window: None,
        });
    }

    let peak = histogram.peak_below(params.probe_bins);
    let window = hue_window(peak, params.probe_bins, params.window_halfwidth);
    tracing::debug!(
        "hue window peak={} range=({}, {})",
        window.peak,
        window.low,
        window.high
    );

    let mut mask = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let bin = hue_bin(*pixel);
        if bin < window.low || bin > window.high {
            continue;
        }
        // Intersection keeps the softened skin value, not a hard 255.
        mask.put_pixel(x, y, Luma([skin_mask.get_pixel(x, y).0[0]]));
    }

    let despeckled = median_filter(&mask, params.median_radius, params.median_radius);

    Ok(RedCandidates {
        mask: despeckled,
        window: Some(window),
    })
}

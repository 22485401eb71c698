//! Tunable parameters for every pipeline stage.
//!
//! Defaults reproduce the thresholds the pipeline was tuned with. Tests and
//! callers inject alternates through [`DetectorConfig`] instead of editing
//! constants.

const SKIN_CR_MIN: u8 = 133;
const SKIN_CR_MAX: u8 = 173;
const SKIN_CB_MIN: u8 = 77;
const SKIN_CB_MAX: u8 = 127;
const SKIN_OPEN_RADIUS: u8 = 2;
const SKIN_BLUR_SIGMA: f32 = 1.4;

const RED_PROBE_BINS: usize = 20;
const RED_WINDOW_HALFWIDTH: usize = 10;
const RED_MEDIAN_RADIUS: u32 = 2;

const LESION_MIN_AREA: usize = 20;
const LESION_MAX_AREA: usize = 3000;
const LESION_MIN_CIRCULARITY: f64 = 0.25;
const LESION_MIN_CONTRAST: f32 = 2.0;
const LESION_BOX_EXPAND: u32 = 5;

/// Chroma gate and cleanup for skin segmentation.
#[derive(Debug, Clone)]
pub struct SkinParams {
    /// Accepted red-chroma range, inclusive.
    pub cr_min: u8,
    pub cr_max: u8,
    /// Accepted blue-chroma range, inclusive.
    pub cb_min: u8,
    pub cb_max: u8,
    /// Ball radius of the opening's structuring element; 2 spans a 5x5 kernel.
    pub open_radius: u8,
    /// Sigma of the Gaussian that softens mask edges; 1.4 matches a 7x7 kernel.
    pub blur_sigma: f32,
}

impl Default for SkinParams {
    fn default() -> Self {
        Self {
            cr_min: SKIN_CR_MIN,
            cr_max: SKIN_CR_MAX,
            cb_min: SKIN_CB_MIN,
            cb_max: SKIN_CB_MAX,
            open_radius: SKIN_OPEN_RADIUS,
            blur_sigma: SKIN_BLUR_SIGMA,
        }
    }
}

/// Hue-window selection for red candidate pixels.
#[derive(Debug, Clone)]
pub struct RednessParams {
    /// Number of leading hue bins probed for the red peak.
    pub probe_bins: usize,
    /// Half-width of the acceptance window around the peak.
    pub window_halfwidth: usize,
    /// Radius of the median despeckle filter; 2 spans a 5x5 kernel.
    pub median_radius: u32,
}

impl Default for RednessParams {
    fn default() -> Self {
        Self {
            probe_bins: RED_PROBE_BINS,
            window_halfwidth: RED_WINDOW_HALFWIDTH,
            median_radius: RED_MEDIAN_RADIUS,
        }
    }
}

/// Contour filters that decide which candidate regions become lesions.
#[derive(Debug, Clone)]
pub struct LesionParams {
    /// Enclosed-pixel-count bounds, inclusive on both ends.
    pub min_area: usize,
    pub max_area: usize,
    /// Contours at least this round survive; 1.0 is a perfect circle.
    pub min_circularity: f64,
    /// Minimum a* lift of the box interior over its surround.
    pub min_contrast: f32,
    /// Pixels added on every side when sampling the surround.
    pub box_expand: u32,
}

impl Default for LesionParams {
    fn default() -> Self {
        Self {
            min_area: LESION_MIN_AREA,
            max_area: LESION_MAX_AREA,
            min_circularity: LESION_MIN_CIRCULARITY,
            min_contrast: LESION_MIN_CONTRAST,
            box_expand: LESION_BOX_EXPAND,
        }
    }
}

/// Bundled configuration for one detection run.
///
/// Immutable once built; share it freely across calls and threads.
#[derive(Debug, Clone, Default)]
pub struct DetectorConfig {
    pub skin: SkinParams,
    pub redness: RednessParams,
    pub lesions: LesionParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_thresholds() {
        let config = DetectorConfig::default();
        assert_eq!(config.skin.cr_min, 133);
        assert_eq!(config.skin.cr_max, 173);
        assert_eq!(config.skin.cb_min, 77);
        assert_eq!(config.skin.cb_max, 127);
        assert_eq!(config.skin.open_radius, 2);
        assert_eq!(config.redness.probe_bins, 20);
        assert_eq!(config.redness.window_halfwidth, 10);
        assert_eq!(config.redness.median_radius, 2);
        assert_eq!(config.lesions.min_area, 20);
        assert_eq!(config.lesions.max_area, 3000);
        assert_eq!(config.lesions.min_circularity, 0.25);
        assert_eq!(config.lesions.min_contrast, 2.0);
        assert_eq!(config.lesions.box_expand, 5);
    }
}

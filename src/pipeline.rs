//! Full detection runs bundling every stage's output.

use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::annotate::annotate;
use crate::config::DetectorConfig;
use crate::error::{DetectError, validate_image};
use crate::lesions::{LesionRecord, extract_lesions};
use crate::redness::{HueWindow, detect_color_candidates};
use crate::skin::segment_skin;

/// Everything one detection run produces, intermediates included.
#[derive(Debug, Clone)]
pub struct Detection {
    pub skin_mask: GrayImage,
    pub candidate_mask: GrayImage,
    pub hue_window: Option<HueWindow>,
    pub lesions: Vec<LesionRecord>,
    pub annotated: RgbImage,
}

impl Detection {
    /// Serializable subset of the run for reports.
    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary {
            image_size: [self.annotated.width(), self.annotated.height()],
            hue_window: self.hue_window,
            lesions: self.lesions.clone(),
        }
    }
}

/// JSON-friendly view of a detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub image_size: [u32; 2],
    pub hue_window: Option<HueWindow>,
    pub lesions: Vec<LesionRecord>,
}

/// Runs the full pipeline on one image.
///
/// Stages run in a fixed order and share nothing besides the config, so
/// identical input always produces identical output.
pub fn detect(image: &RgbImage, config: &DetectorConfig) -> Result<Detection, DetectError> {
    validate_image(image)?;

    tracing::debug!("segmenting skin on {}x{}", image.width(), image.height());
    let skin_mask = segment_skin(image, config)?;

    tracing::debug!("probing red hue candidates");
    let candidates = detect_color_candidates(image, &skin_mask, config)?;

    tracing::debug!("filtering contours");
    let lesions = extract_lesions(image, &candidates.mask, config)?;

    let annotated = annotate(image, &lesions);

    Ok(Detection {
        skin_mask,
        candidate_mask: candidates.mask,
        hue_window: candidates.window,
        lesions,
        annotated,
    })
}

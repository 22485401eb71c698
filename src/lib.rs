//! Deterministic acne lesion detection for skin photographs.
//!
//! The pipeline runs four stages over an RGB image: skin segmentation from
//! chroma bounds, adaptive red-hue candidate selection inside the skin
//! region, contour filtering on size, roundness and chromatic contrast, and
//! annotation of the surviving boxes. Nothing is cached between calls and
//! identical input always produces identical output.

pub mod config;
pub use config::{DetectorConfig, LesionParams, RednessParams, SkinParams};
pub mod error;
pub use error::{DetectError, MIN_IMAGE_DIM};
pub mod color;
pub mod skin;
pub use skin::segment_skin;
pub mod redness;
pub use redness::{HueHistogram, HueWindow, RedCandidates, detect_color_candidates, hue_window};
pub mod lesions;
pub use lesions::{BoundingBox, LesionRecord, circularity, extract_lesions};
pub mod annotate;
pub use annotate::annotate;
pub mod pipeline;
pub use pipeline::{Detection, DetectionSummary, detect};

pub use image::{GrayImage, RgbImage};

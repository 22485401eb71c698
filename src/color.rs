//! Per-pixel color conversions used across the pipeline stages.

use image::Rgb;
use palette::{FromColor, Hsv, Lab, Srgb};

/// Number of hue bins in the half-degree convention (hue 0..=179).
pub const HUE_BINS: usize = 180;

/// Full-range BT.601 luma and chroma for one pixel.
///
/// Luma is unused by the skin gate but returned so the conversion stays
/// whole; the gate reads only the two chroma channels.
pub fn ycrcb(pixel: Rgb<u8>) -> (u8, u8, u8) {
    let [r, g, b] = pixel.0;
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cr = (r - y) * 0.713 + 128.0;
    let cb = (b - y) * 0.564 + 128.0;
    (quantize(y), quantize(cr), quantize(cb))
}

fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Hue of one pixel binned into `0..HUE_BINS` (degrees halved).
pub fn hue_bin(pixel: Rgb<u8>) -> usize {
    let [r, g, b] = pixel.0;
    let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let degrees = Hsv::from_color(srgb).hue.into_positive_degrees();
    ((degrees / 2.0) as usize).min(HUE_BINS - 1)
}

/// CIE Lab a* (red minus green chrominance) of one pixel.
pub fn red_green_chroma(pixel: Rgb<u8>) -> f32 {
    let [r, g, b] = pixel.0;
    let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    Lab::from_color(srgb).a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_gray_has_centered_chroma() {
        let (y, cr, cb) = ycrcb(Rgb([128, 128, 128]));
        assert_eq!(y, 128);
        assert_eq!(cr, 128);
        assert_eq!(cb, 128);
    }

    #[test]
    fn saturated_red_pushes_cr_high() {
        let (_, cr, cb) = ycrcb(Rgb([255, 0, 0]));
        assert_eq!(cr, 255);
        assert!(cb < 128, "red must not raise blue chroma, got {cb}");
    }

    #[test]
    fn primary_hues_land_in_expected_bins() {
        assert_eq!(hue_bin(Rgb([255, 0, 0])), 0);
        assert_eq!(hue_bin(Rgb([255, 255, 0])), 30);
        assert_eq!(hue_bin(Rgb([0, 255, 0])), 60);
        assert_eq!(hue_bin(Rgb([0, 0, 255])), 120);
    }

    #[test]
    fn chroma_sign_tracks_the_red_green_axis() {
        assert!(red_green_chroma(Rgb([255, 0, 0])) > 40.0);
        assert!(red_green_chroma(Rgb([0, 255, 0])) < -40.0);
        assert!(red_green_chroma(Rgb([128, 128, 128])).abs() < 0.1);
    }
}

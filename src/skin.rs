//! Skin-region segmentation from chroma bounds.

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::open;

use crate::color::ycrcb;
use crate::config::DetectorConfig;
use crate::error::{DetectError, validate_image};

/// Segments skin-colored regions into a soft mask.
///
/// Pixels whose red and blue chroma fall inside the configured bounds are
/// selected; luma is ignored so lighting changes do not move the gate. A
/// 5x5 elliptical opening removes isolated speckles and a Gaussian pass
/// softens the edges, since the mask gates later stages rather than cutting
/// hard boundaries.
pub fn segment_skin(image: &RgbImage, config: &DetectorConfig) -> Result<GrayImage, DetectError> {
    validate_image(image)?;
    let params = &config.skin;

    let (width, height) = image.dimensions();
    let mut mask = GrayImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let (_, cr, cb) = ycrcb(*pixel);
        if (params.cr_min..=params.cr_max).contains(&cr)
            && (params.cb_min..=params.cb_max).contains(&cb)
        {
            mask.put_pixel(x, y, Luma([255]));
        }
    }

    let opened = open(&mask, Norm::L1, params.open_radius);
    let softened = gaussian_blur_f32(&opened, params.blur_sigma);

    tracing::debug!(
        "skin mask keeps {} of {} pixels",
        softened.pixels().filter(|p| p.0[0] > 0).count(),
        width as u64 * height as u64
    );

    Ok(softened)
}

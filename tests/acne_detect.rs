use acne_scan::{DetectError, DetectorConfig, detect, segment_skin};
use image::{Rgb, RgbImage};

// Chroma-gate friendly field: Cr 142, Cb 100, hue bin 21 (outside the red
// probe range).
const SKIN_TONE: [u8; 3] = [190, 170, 120];
// Still inside the chroma gate (Cr 165, Cb 104) but hue bin 7 and a clear
// a* lift over the field.
const BLEMISH_TONE: [u8; 3] = [200, 130, 105];

fn skin_field(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(SKIN_TONE))
}

fn stamp_disk(image: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
                image.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }
    }
}

#[test]
fn reddish_blob_on_skin_yields_one_centered_record() {
    let mut image = skin_field(120, 120);
    stamp_disk(&mut image, 60, 60, 8, BLEMISH_TONE);

    let detection = detect(&image, &DetectorConfig::default()).expect("detect failed");

    assert_eq!(
        detection.lesions.len(),
        1,
        "expected a single lesion, got {:?}",
        detection.lesions
    );
    let (cx, cy) = detection.lesions[0].center;
    assert!((cx as i64 - 60).abs() <= 2, "center x {cx} too far from 60");
    assert!((cy as i64 - 60).abs() <= 2, "center y {cy} too far from 60");

    let window = detection.hue_window.expect("hue window missing");
    assert_eq!(window.peak, 7);
    assert_eq!((window.low, window.high), (0, 17));
}

#[test]
fn no_skin_image_produces_empty_outputs_without_error() {
    let image = RgbImage::from_pixel(64, 64, Rgb([60, 80, 200]));

    let detection = detect(&image, &DetectorConfig::default()).expect("detect failed");

    assert!(detection.skin_mask.pixels().all(|p| p.0[0] == 0));
    assert!(detection.candidate_mask.pixels().all(|p| p.0[0] == 0));
    assert!(detection.hue_window.is_none());
    assert!(detection.lesions.is_empty());
}

#[test]
fn masks_match_input_dimensions() {
    let mut image = skin_field(96, 64);
    stamp_disk(&mut image, 30, 30, 6, BLEMISH_TONE);

    let detection = detect(&image, &DetectorConfig::default()).expect("detect failed");

    assert_eq!(detection.skin_mask.dimensions(), image.dimensions());
    assert_eq!(detection.candidate_mask.dimensions(), image.dimensions());
    assert_eq!(detection.annotated.dimensions(), image.dimensions());

    let standalone = segment_skin(&image, &DetectorConfig::default()).expect("segment failed");
    assert_eq!(standalone.dimensions(), image.dimensions());
}

#[test]
fn reruns_are_bit_identical() {
    let mut image = skin_field(120, 120);
    stamp_disk(&mut image, 40, 50, 8, BLEMISH_TONE);
    stamp_disk(&mut image, 85, 70, 7, BLEMISH_TONE);

    let config = DetectorConfig::default();
    let first = detect(&image, &config).expect("first run failed");
    let second = detect(&image, &config).expect("second run failed");

    assert_eq!(first.skin_mask.as_raw(), second.skin_mask.as_raw());
    assert_eq!(first.candidate_mask.as_raw(), second.candidate_mask.as_raw());
    assert_eq!(first.lesions, second.lesions);
    assert_eq!(first.hue_window, second.hue_window);
}

#[test]
fn records_are_sorted_top_to_bottom_left_to_right() {
    let mut image = skin_field(160, 120);
    stamp_disk(&mut image, 120, 30, 8, BLEMISH_TONE);
    stamp_disk(&mut image, 30, 80, 8, BLEMISH_TONE);
    stamp_disk(&mut image, 90, 80, 8, BLEMISH_TONE);

    let detection = detect(&image, &DetectorConfig::default()).expect("detect failed");

    assert_eq!(detection.lesions.len(), 3, "got {:?}", detection.lesions);
    let keys: Vec<(u32, u32)> = detection
        .lesions
        .iter()
        .map(|l| (l.bounds.y, l.bounds.x))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "records out of order: {keys:?}");
}

#[test]
fn degenerate_inputs_are_rejected_up_front() {
    let empty = RgbImage::new(0, 0);
    assert!(matches!(
        detect(&empty, &DetectorConfig::default()),
        Err(DetectError::EmptyImage)
    ));

    let tiny = RgbImage::from_pixel(4, 4, Rgb(SKIN_TONE));
    assert!(matches!(
        detect(&tiny, &DetectorConfig::default()),
        Err(DetectError::ImageTooSmall { .. })
    ));
}

#[test]
fn annotated_output_marks_the_lesion() {
    let mut image = skin_field(120, 120);
    stamp_disk(&mut image, 60, 60, 8, BLEMISH_TONE);

    let detection = detect(&image, &DetectorConfig::default()).expect("detect failed");
    assert_eq!(detection.lesions.len(), 1);

    let bounds = detection.lesions[0].bounds;
    let corner = *detection.annotated.get_pixel(bounds.x, bounds.y);
    assert_eq!(corner, Rgb([255, 0, 0]), "box corner not painted");
}

#[test]
fn summary_serializes_with_window_and_records() {
    let mut image = skin_field(120, 120);
    stamp_disk(&mut image, 60, 60, 8, BLEMISH_TONE);

    let detection = detect(&image, &DetectorConfig::default()).expect("detect failed");
    let json = serde_json::to_string(&detection.summary()).expect("serialize failed");

    assert!(json.contains("\"image_size\":[120,120]"), "got {json}");
    assert!(json.contains("\"peak\":7"), "got {json}");
    assert!(json.contains("\"bounds\""), "got {json}");
}

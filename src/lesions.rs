//! Contour extraction and the geometric and chromatic lesion filters.

use std::collections::VecDeque;
use std::f64::consts::PI;

use image::{GrayImage, RgbImage};
use imageproc::contours::find_contours;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use crate::color::red_green_chroma;
use crate::config::DetectorConfig;
use crate::error::{DetectError, validate_image, validate_mask};

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// One accepted lesion.
///
/// `center` is the integer box center `(x + w/2, y + h/2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LesionRecord {
    pub bounds: BoundingBox,
    pub center: (u32, u32),
}

/// Isoperimetric roundness; 1.0 is a perfect circle, thin shapes tend to 0.
pub fn circularity(area: f64, perimeter: f64) -> f64 {
    4.0 * PI * area / (perimeter * perimeter)
}

/// Closed-polygon arc length of a contour's boundary points.
pub fn perimeter(points: &[Point<i32>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let closing = point_distance(points[points.len() - 1], points[0]);
    points
        .windows(2)
        .map(|pair| point_distance(pair[0], pair[1]))
        .sum::<f64>()
        + closing
}

fn point_distance(a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    dx.hypot(dy)
}

fn bounding_box(points: &[Point<i32>]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox {
        x: min_x as u32,
        y: min_y as u32,
        w: (max_x - min_x + 1) as u32,
        h: (max_y - min_y + 1) as u32,
    })
}

/// Pixels enclosed by a boundary, holes included.
///
/// The exterior is flooded inside a one-pixel padded copy of the bounding
/// box; whatever the flood cannot reach is enclosed. The flood is
/// four-connected, so it cannot slip through an eight-connected boundary.
fn enclosed_area(points: &[Point<i32>], bounds: BoundingBox) -> usize {
    let grid_w = bounds.w as usize + 2;
    let grid_h = bounds.h as usize + 2;
    let mut boundary = vec![false; grid_w * grid_h];
    for p in points {
        let gx = (p.x - bounds.x as i32) as usize + 1;
        let gy = (p.y - bounds.y as i32) as usize + 1;
        boundary[gy * grid_w + gx] = true;
    }

    let mut outside = vec![false; grid_w * grid_h];
    let mut queue = VecDeque::new();
    outside[0] = true;
    queue.push_back(0usize);
    while let Some(idx) = queue.pop_front() {
        let x = idx % grid_w;
        let y = idx / grid_w;
        for (dx, dy) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= grid_w as isize || ny >= grid_h as isize {
                continue;
            }
            let next = ny as usize * grid_w + nx as usize;
            if outside[next] || boundary[next] {
                continue;
            }
            outside[next] = true;
            queue.push_back(next);
        }
    }

    outside.iter().filter(|&&reached| !reached).count()
}

fn mean_chroma(image: &RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) -> Option<f32> {
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    let mut sum = 0f64;
    let mut count = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            sum += red_green_chroma(*image.get_pixel(x, y)) as f64;
            count += 1;
        }
    }
    Some((sum / count as f64) as f32)
}

/// Mean a* lift of the box interior over its expanded surround.
///
/// The surround mean is taken over the expanded box with the interior still
/// inside it, exactly as the contrast threshold was tuned.
fn box_contrast(image: &RgbImage, bounds: BoundingBox, expand: u32) -> Option<f32> {
    let (width, height) = image.dimensions();
    let inner = mean_chroma(
        image,
        bounds.x,
        bounds.y,
        bounds.x + bounds.w,
        bounds.y + bounds.h,
    )?;
    let outer = mean_chroma(
        image,
        bounds.x.saturating_sub(expand),
        bounds.y.saturating_sub(expand),
        (bounds.x + bounds.w + expand).min(width),
        (bounds.y + bounds.h + expand).min(height),
    )?;
    Some(inner - outer)
}

/// Extracts lesion records from a candidate mask.
///
/// Only external contours are considered; holes inside a candidate region
/// never produce their own record. Per contour the filters run in order:
/// enclosed-area bounds, perimeter degeneracy, circularity, a* contrast.
/// Every rejection is a local skip, never an error. Surviving records are
/// sorted by `(y, x, w, h)` of their bounding box.
pub fn extract_lesions(
    image: &RgbImage,
    candidate_mask: &GrayImage,
    config: &DetectorConfig,
) -> Result<Vec<LesionRecord>, DetectError> {
    validate_image(image)?;
    validate_mask(image, candidate_mask)?;
    let params = &config.lesions;

    let contours = find_contours::<i32>(candidate_mask);
    let mut records = Vec::new();
    let mut rejected = 0usize;

    for contour in contours.iter().filter(|c| c.parent.is_none()) {
        let Some(bounds) = bounding_box(&contour.points) else {
            continue;
        };

        let area = enclosed_area(&contour.points, bounds);
        if area < params.min_area || area > params.max_area {
            rejected += 1;
            continue;
        }

        let perimeter = perimeter(&contour.points);
        if perimeter <= 0.0 {
            rejected += 1;
            continue;
        }

        if circularity(area as f64, perimeter) < params.min_circularity {
            rejected += 1;
            continue;
        }

        let Some(contrast) = box_contrast(image, bounds, params.box_expand) else {
            rejected += 1;
            continue;
        };
        if contrast < params.min_contrast {
            rejected += 1;
            continue;
        }

        records.push(LesionRecord {
            bounds,
            center: (bounds.x + bounds.w / 2, bounds.y + bounds.h / 2),
        });
    }

    records.sort_by(|a, b| {
        (a.bounds.y, a.bounds.x, a.bounds.w, a.bounds.h)
            .cmp(&(b.bounds.y, b.bounds.x, b.bounds.w, b.bounds.h))
    });

    tracing::debug!(
        "{} lesions kept, {} contours rejected",
        records.len(),
        rejected
    );

    Ok(records)
}

//! Box and caption drawing onto a copy of the input image.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::lesions::LesionRecord;

const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const BOX_THICKNESS: i32 = 2;
const CAPTION_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const CAPTION_ORIGIN: (i32, i32) = (20, 16);
const CAPTION_SCALE: u32 = 2;
const GLYPH_WIDTH: u32 = 5;

/// Returns a copy of the image with every lesion boxed in red and a blue
/// `ACNE COUNT` caption in the top-left corner.
pub fn annotate(image: &RgbImage, lesions: &[LesionRecord]) -> RgbImage {
    let mut canvas = image.clone();
    for record in lesions {
        draw_box(&mut canvas, record);
    }
    let caption = format!("ACNE COUNT: {}", lesions.len());
    draw_caption(&mut canvas, CAPTION_ORIGIN, &caption);
    canvas
}

fn draw_box(canvas: &mut RgbImage, record: &LesionRecord) {
    let bounds = record.bounds;
    // Thickness grows outward so the box never covers lesion pixels.
    for t in 0..BOX_THICKNESS {
        let rect = Rect::at(bounds.x as i32 - t, bounds.y as i32 - t)
            .of_size(bounds.w + 2 * t as u32, bounds.h + 2 * t as u32);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }
}

fn draw_caption(canvas: &mut RgbImage, origin: (i32, i32), text: &str) {
    let mut cursor_x = origin.0;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            draw_glyph(canvas, cursor_x, origin.1, rows);
        }
        cursor_x += (GLYPH_WIDTH + 1) as i32 * CAPTION_SCALE as i32;
    }
}

fn draw_glyph(canvas: &mut RgbImage, x0: i32, y0: i32, rows: [u8; 7]) {
    let (width, height) = canvas.dimensions();
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (0x10 >> col) == 0 {
                continue;
            }
            for dy in 0..CAPTION_SCALE {
                for dx in 0..CAPTION_SCALE {
                    let x = x0 + (col * CAPTION_SCALE + dx) as i32;
                    let y = y0 + (row as u32 * CAPTION_SCALE + dy) as i32;
                    if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                        canvas.put_pixel(x as u32, y as u32, CAPTION_COLOR);
                    }
                }
            }
        }
    }
}

// 5x7 bitmap rows; the most significant of the low five bits is the left
// column. Covers exactly the caption alphabet.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        ':' => [0x00, 0x04, 0x04, 0x00, 0x04, 0x04, 0x00],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        _ => return None,
    };
    Some(rows)
}

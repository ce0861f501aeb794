//! Raster primitives for the framebuffer surface.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

use super::font;
use super::surface::{TextAlign, TextStyle};

/// Draw a 1-pixel line using Bresenham's algorithm (non-antialiased).
///
/// Pixels outside the framebuffer are skipped.
///
/// # References
///
/// Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled rectangle; a negative origin is clamped to the edge.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;
    fb.fill_rect(x, y, width, height, color);
}

/// Draw `text` with the built-in 5x7 bitmap font.
///
/// `at` is the baseline anchor; `style.align` places the run relative to
/// its x. Glyphs are scaled by whole pixels and clipped at the edges.
pub fn draw_text(fb: &mut Framebuffer, at: Point, text: &str, style: TextStyle) {
    let scale = font::scale_for(style.size);
    let width = font::text_width(text, scale) as f32;
    let left = match style.align {
        TextAlign::Start => at.x,
        TextAlign::Middle => at.x - width / 2.0,
        TextAlign::End => at.x - width,
    };
    let left = left.round() as i64;
    let top = at.y.round() as i64 - i64::from(font::GLYPH_HEIGHT * scale);
    let scale = i64::from(scale);

    for (i, c) in text.chars().enumerate() {
        let origin = left + i as i64 * i64::from(font::ADVANCE) * scale;
        for (col, bits) in font::glyph(c).iter().enumerate() {
            for row in 0..font::GLYPH_HEIGHT {
                if bits & (1 << row) == 0 {
                    continue;
                }
                let x = origin + col as i64 * scale;
                let y = top + i64::from(row) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        if let (Ok(px), Ok(py)) = (u32::try_from(x + dx), u32::try_from(y + dy)) {
                            fb.set_pixel(px, py, style.color);
                        }
                    }
                }
            }
        }
    }
}

use glam::DVec2;
use image::{Rgb, RgbImage};

use crate::font::{glyph, GLYPH_SPACING, GLYPH_WIDTH};

/// A square raster canvas addressed in world coordinates.
///
/// The canvas maps the world window `[min, max] x [min, max]` onto a
/// `size x size` pixel grid with the y axis pointing up. All drawing
/// operations clip against the pixel bounds, and operations taking world
/// coordinates ignore non-finite inputs (points at infinity simply do not
/// appear on the canvas).
pub struct Canvas {
    img: RgbImage,
    min: f64,
    max: f64,
}

impl Canvas {
    /// Create a white canvas of `size x size` pixels spanning the world
    /// window `[min, max]` on both axes.
    pub fn new(size: u32, axis_range: (f64, f64)) -> Self {
        let (min, max) = axis_range;
        Self {
            img: RgbImage::from_pixel(size, size, Rgb([255, 255, 255])),
            min,
            max,
        }
    }

    /// Canvas side length in pixels.
    pub fn size(&self) -> u32 {
        self.img.width()
    }

    /// Map a world point to pixel coordinates (y flipped).
    ///
    /// The caller is responsible for checking finiteness; non-finite input
    /// yields meaningless pixel coordinates which the bounds check in
    /// `set_pixel` then rejects.
    pub fn to_pixel(&self, p: DVec2) -> (i64, i64) {
        let scale = (self.size().saturating_sub(1)) as f64 / (self.max - self.min);
        let x = ((p.x - self.min) * scale).round() as i64;
        let y = ((self.max - p.y) * scale).round() as i64;
        (x, y)
    }

    /// Set a single pixel, ignoring out-of-bounds coordinates.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && x < self.img.width() as i64 && y >= 0 && y < self.img.height() as i64 {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    fn stamp(&mut self, x: i64, y: i64, color: Rgb<u8>, thickness: u32) {
        if thickness <= 1 {
            self.set_pixel(x, y, color);
            return;
        }
        let half = thickness as i64 / 2;
        for dy in -half..=half {
            for dx in -half..=half {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Draw a line between two pixel positions with Bresenham's algorithm.
    ///
    /// Thickness above one is approximated by stamping a centered square at
    /// every step.
    pub fn line_px(&mut self, p0: (i64, i64), p1: (i64, i64), color: Rgb<u8>, thickness: u32) {
        let (mut x0, mut y0) = p0;
        let (x1, y1) = p1;

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.stamp(x0, y0, color, thickness);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draw a line segment between two world points.
    pub fn line(&mut self, a: DVec2, b: DVec2, color: Rgb<u8>, thickness: u32) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        self.line_px(self.to_pixel(a), self.to_pixel(b), color, thickness);
    }

    /// Draw an open polyline through world points, skipping segments with a
    /// non-finite endpoint.
    pub fn polyline(&mut self, points: &[DVec2], color: Rgb<u8>, thickness: u32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, thickness);
        }
    }

    /// Draw a filled disc of `radius` pixels centered on a world point.
    pub fn disc(&mut self, center: DVec2, radius: i64, color: Rgb<u8>) {
        if !center.is_finite() {
            return;
        }
        let (cx, cy) = self.to_pixel(center);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw a plus-shaped cross marker centered on a world point.
    pub fn cross(&mut self, center: DVec2, half: i64, color: Rgb<u8>, thickness: u32) {
        if !center.is_finite() {
            return;
        }
        let (cx, cy) = self.to_pixel(center);
        self.line_px((cx - half, cy), (cx + half, cy), color, thickness);
        self.line_px((cx, cy - half), (cx, cy + half), color, thickness);
    }

    /// Render text with the 5x7 bitmap font, anchored at a world point
    /// (top-left corner of the first glyph).
    pub fn text(&mut self, anchor: DVec2, text: &str, scale: u32, color: Rgb<u8>) {
        if !anchor.is_finite() {
            return;
        }
        let (x, y) = self.to_pixel(anchor);
        self.text_px(x, y, text, scale, color);
    }

    /// Render text anchored at a pixel position (top-left corner).
    pub fn text_px(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1);
        let advance = ((GLYPH_WIDTH + GLYPH_SPACING) * scale) as i64;
        let mut pen_x = x;
        for c in text.chars() {
            if let Some(rows) = glyph(c) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                            for sy in 0..scale as i64 {
                                for sx in 0..scale as i64 {
                                    self.set_pixel(
                                        pen_x + (col * scale) as i64 + sx,
                                        y + (row as u32 * scale) as i64 + sy,
                                        color,
                                    );
                                }
                            }
                        }
                    }
                }
            }
            pen_x += advance;
        }
    }

    /// Consume the canvas and return the rendered image.
    pub fn into_image(self) -> RgbImage {
        self.img
    }
}

use glam::{DMat3, DVec2, DVec3};
use image::{Rgb, RgbImage};
use std::path::Path;

use crate::canvas::Canvas;
use crate::error::FigureError;
use crate::font::{text_width, GLYPH_HEIGHT};
use planar_transforms::points::transform_points;

/// Smallest canvas on which markers, labels and the legend still fit.
pub const MIN_CANVAS_SIZE: u32 = 16;

/// Color of the untransformed shape (matplotlib's `darkgrey`).
pub const BEFORE_COLOR: Rgb<u8> = Rgb([169, 169, 169]);

/// Color of the transformed shape.
pub const AFTER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const ORIGIN_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const AXIS_COLOR: Rgb<u8> = Rgb([225, 225, 225]);

/// Parameters of a static before/after figure.
#[derive(Debug, Clone, Copy)]
pub struct FigureSpec {
    /// World window applied to both axes, `(min, max)`.
    pub axis_range: (f64, f64),
    /// Side length of the square canvas in pixels.
    pub size: u32,
    /// Offset of vertex labels from their vertex, in world units.
    pub text_offset: f64,
}

impl Default for FigureSpec {
    fn default() -> Self {
        Self {
            axis_range: (-2.0, 2.0),
            size: 480,
            text_offset: 0.1,
        }
    }
}

impl FigureSpec {
    fn validate(&self) -> Result<(), FigureError> {
        let (min, max) = self.axis_range;
        if !(min < max) {
            return Err(FigureError::InvalidAxisRange(min, max));
        }
        if self.size < MIN_CANVAS_SIZE {
            return Err(FigureError::CanvasTooSmall(self.size));
        }
        Ok(())
    }
}

/// The default point set: a three-vertex triangle in homogeneous columns.
pub fn demo_triangle() -> Vec<DVec3> {
    vec![
        DVec3::new(1.5, 1.0, 1.0),
        DVec3::new(0.75, 1.5, 1.0),
        DVec3::new(0.5, 0.5, 1.0),
    ]
}

/// Alphabetic label for the i-th vertex (`A`, `B`, ... up to `Z`).
pub fn vertex_label(index: usize) -> Option<char> {
    if index < 26 {
        Some((b'A' + index as u8) as char)
    } else {
        None
    }
}

fn close_polygon(points: &[DVec3]) -> Vec<DVec2> {
    let mut closed: Vec<DVec2> = points.iter().map(|p| p.truncate()).collect();
    if let Some(&first) = closed.first() {
        closed.push(first);
    }
    closed
}

fn draw_shape(
    canvas: &mut Canvas,
    points: &[DVec3],
    color: Rgb<u8>,
    text_offset: f64,
    primed: bool,
    sizes: &MarkerSizes,
) {
    canvas.polyline(&close_polygon(points), color, sizes.line_thickness);
    for (i, p) in points.iter().enumerate() {
        let v = p.truncate();
        canvas.disc(v, sizes.disc_radius, color);
        if let Some(label) = vertex_label(i) {
            let mut text = label.to_string();
            if primed {
                text.push('\'');
            }
            let anchor = v + DVec2::new(text_offset, text_offset);
            canvas.text(anchor, &text, sizes.text_scale, color);
        }
    }
}

struct MarkerSizes {
    line_thickness: u32,
    disc_radius: i64,
    cross_half: i64,
    text_scale: u32,
}

impl MarkerSizes {
    fn for_canvas(size: u32) -> Self {
        Self {
            line_thickness: (size / 240).max(1),
            disc_radius: (size / 96).max(1) as i64,
            cross_half: (size / 48).max(2) as i64,
            text_scale: (size / 240).max(1),
        }
    }
}

fn draw_legend(canvas: &mut Canvas, sizes: &MarkerSizes) {
    let scale = sizes.text_scale;
    let glyph_h = (GLYPH_HEIGHT * scale) as i64;
    let margin = 2 * glyph_h;
    let swatch = 3 * glyph_h;
    let entries = [("BEFORE", BEFORE_COLOR), ("AFTER", AFTER_COLOR)];

    // Frame the legend so grid lines do not run through it.
    let widest = entries
        .iter()
        .map(|(label, _)| text_width(label, scale))
        .max()
        .unwrap_or(0) as i64;
    let frame_right = margin + swatch + glyph_h + widest + glyph_h;
    let frame_bottom = margin + entries.len() as i64 * 2 * glyph_h;
    for x in (margin - glyph_h)..frame_right {
        for y in (margin - glyph_h)..frame_bottom {
            canvas.set_pixel(x, y, Rgb([255, 255, 255]));
        }
    }

    for (i, (label, color)) in entries.iter().enumerate() {
        let y = margin + i as i64 * 2 * glyph_h;
        canvas.line_px(
            (margin, y + glyph_h / 2),
            (margin + swatch, y + glyph_h / 2),
            *color,
            sizes.line_thickness,
        );
        canvas.text_px(margin + swatch + glyph_h, y, label, scale, *color);
    }
}

/// Render a before/after figure of `points` under the homography `h`.
///
/// When `points` is `None` the [`demo_triangle`] is used. Both shapes are
/// drawn as closed polygons with vertex discs; untransformed vertices are
/// labelled `A, B, C, ...` and their images `A', B', C', ...`. The origin
/// is marked with a cross. Transformed vertices that end up non-finite
/// (mapped to the line at infinity) are left out of the rendering.
pub fn render_figure(
    h: &DMat3,
    points: Option<&[DVec3]>,
    spec: &FigureSpec,
) -> Result<RgbImage, FigureError> {
    spec.validate()?;

    let owned_default;
    let before = match points {
        Some(p) => p,
        None => {
            owned_default = demo_triangle();
            &owned_default
        }
    };
    let after = transform_points(h, before);

    let mut canvas = Canvas::new(spec.size, spec.axis_range);
    let sizes = MarkerSizes::for_canvas(spec.size);

    // Axis lines through the origin, then the origin marker itself.
    let (min, max) = spec.axis_range;
    canvas.line(DVec2::new(min, 0.0), DVec2::new(max, 0.0), AXIS_COLOR, 1);
    canvas.line(DVec2::new(0.0, min), DVec2::new(0.0, max), AXIS_COLOR, 1);
    canvas.cross(
        DVec2::ZERO,
        sizes.cross_half,
        ORIGIN_COLOR,
        sizes.line_thickness,
    );

    draw_shape(
        &mut canvas,
        before,
        BEFORE_COLOR,
        spec.text_offset,
        false,
        &sizes,
    );
    draw_shape(
        &mut canvas,
        &after,
        AFTER_COLOR,
        spec.text_offset,
        true,
        &sizes,
    );
    draw_legend(&mut canvas, &sizes);

    Ok(canvas.into_image())
}

/// Write a rendered figure to disk; the format is derived from the file
/// extension (use `.png`).
pub fn save_figure(img: &RgbImage, path: impl AsRef<Path>) -> Result<(), FigureError> {
    img.save(path)?;
    Ok(())
}

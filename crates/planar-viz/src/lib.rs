#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Two backends over the same transformation core:
//!
//! - [`figure`]: static rendering into an [`image::RgbImage`] (PNG-friendly),
//!   drawing the point set before and after a homography as labelled,
//!   closed polygons.
//! - [`app`]: an interactive `eframe` application with pan/zoom and the
//!   freehand/polygon drawing tools from [`tools`].

/// Pixel-level drawing primitives on a world-coordinate canvas.
pub mod canvas;

/// Errors surfaced by the figure backends.
pub mod error;

/// Static before/after figure rendering.
pub mod figure;

/// Compact 5x7 bitmap font for vertex labels and the legend.
pub mod font;

/// Interactive eframe application.
pub mod app;

/// Drawing-tool state machines (freehand strokes, polygons).
pub mod tools;

pub use error::FigureError;
pub use figure::{demo_triangle, render_figure, save_figure, FigureSpec};

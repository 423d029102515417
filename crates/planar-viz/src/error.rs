/// An error type for figure construction and output.
#[derive(thiserror::Error, Debug)]
pub enum FigureError {
    /// The axis range is empty or inverted.
    #[error("Invalid axis range: min ({0}) must be smaller than max ({1})")]
    InvalidAxisRange(f64, f64),

    /// The requested canvas is too small to hold markers and labels.
    #[error("Canvas size {0} is below the minimum figure size")]
    CanvasTooSmall(u32),

    /// Error when encoding or writing the output image.
    #[error("Failed to write the figure image")]
    Image(#[from] image::ImageError),
}

//! Error types for camera validation and image output.

use thiserror::Error;

/// Camera settings that would produce a degenerate render.
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("image of {width}x{height} pixels is too large")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("look-from and look-at are the same point")]
    DegenerateView,

    #[error("up vector is parallel to the view direction")]
    ParallelUp,
}

/// Errors that can occur while writing a rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

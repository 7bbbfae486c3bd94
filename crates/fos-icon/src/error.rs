//! Error types

use std::io;
use std::path::PathBuf;

/// Result alias for icon operations
pub type Result<T> = std::result::Result<T, IconError>;

/// Fatal errors for a render or save call
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("degenerate viewBox {width}x{height}: width and height must be finite and positive")]
    DegenerateViewBox { width: f32, height: f32 },

    #[error("degenerate transform: matrix is not finite or not invertible")]
    DegenerateTransform,

    #[error("empty render target {width}x{height}")]
    EmptyTarget { width: f32, height: f32 },

    #[error("render target {width}x{height} exceeds the limit of {max_pixels} pixels")]
    TargetTooLarge { width: u32, height: u32, max_pixels: u64 },

    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to flush {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no supported image format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Why a single path could not be drawn
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathFailureReason {
    #[error("path has no drawable geometry")]
    EmptyGeometry,
    #[error("path geometry is not finite after transform")]
    NonFiniteGeometry,
    #[error("gradient '{0}' is not defined")]
    MissingGradient(String),
    #[error("gradient '{0}' cannot be built")]
    InvalidGradient(String),
    #[error("stroke width is not usable")]
    InvalidStroke,
}

/// A path skipped during compositing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("path {index}: {reason}")]
pub struct PathFailure {
    /// Position of the path in the icon's draw order
    pub index: usize,
    pub reason: PathFailureReason,
}

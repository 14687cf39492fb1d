//! Error types for the favicon generator

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A font file could not be read
    #[error("Failed to load font {}: {source}", path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A font file was read but held no usable faces
    #[error("No usable font faces in {}", .0.display())]
    EmptyFont(PathBuf),

    /// Encoding or resampling failed
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Writing an output file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

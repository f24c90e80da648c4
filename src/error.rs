use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a run before any file is processed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No images found in {}", .0.display())]
    NoImagesFound(PathBuf),
}

/// Failures confined to a single file; the batch moves on.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to read modification time of {}: {source}", path.display())]
    ModifiedTime {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
}

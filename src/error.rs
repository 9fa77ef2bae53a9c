use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which kind of named resource a roster row refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Background,
    Font,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Background => write!(f, "Background"),
            ResourceKind::Font => write!(f, "Font"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{kind} file not found: {}", .path.display())]
    MissingResource {
        kind: ResourceKind,
        name: String,
        path: PathBuf,
    },
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Failed to parse font: {0}")]
    InvalidFont(String),
    #[error("Image error: {0}")]
    Image(String),
    #[error("Failed to write manifest: {0}")]
    Manifest(String),
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Nothing to compose: {0}")]
    EmptyInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::Image(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::MalformedInput(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

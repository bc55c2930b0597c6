use std::path::PathBuf;

use thiserror::Error;

/// Broad failure classes, each mapped to a stable process exit code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, malformed page lists, unreadable or invalid input.
    InvalidInput,
    /// A required external tool is missing or failed.
    ResourceUnavailable,
    /// Output could not be written, including overwrite refusal.
    IoFailure,
}

impl ErrorCategory {
    /// Exit code reported by the binaries. `2` matches clap's usage errors.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCategory::InvalidInput => 2,
            ErrorCategory::ResourceUnavailable => 3,
            ErrorCategory::IoFailure => 4,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid page list '{spec}': {message}")]
    InvalidPageList { spec: String, message: String },

    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: u32, total: u32 },

    #[error("Percent must be between 0 and 100, got {0}")]
    PercentOutOfRange(u32),

    #[error("Number of parts must be at least 1")]
    InvalidPartCount,

    #[error("Document has no pages")]
    EmptyDocument,

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to load PDF {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("{tool} not found on PATH; install Ghostscript (e.g. `brew install ghostscript` or `apt install ghostscript`) or use --method in-process")]
    ToolUnavailable { tool: String },

    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Output exists: {0} (use --overwrite to replace)")]
    OutputExists(PathBuf),

    #[error("Failed to save PDF: {0}")]
    Save(#[source] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidPageList { .. }
            | Error::PageOutOfRange { .. }
            | Error::PercentOutOfRange(_)
            | Error::InvalidPartCount
            | Error::EmptyDocument
            | Error::InputNotFound(_)
            | Error::Load { .. } => ErrorCategory::InvalidInput,
            Error::ToolUnavailable { .. } | Error::ToolFailed { .. } => {
                ErrorCategory::ResourceUnavailable
            }
            Error::OutputExists(_) | Error::Save(_) | Error::Io(_) => ErrorCategory::IoFailure,
        }
    }
}

/// Why a single image was left untouched. Never aborts a run.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),

    #[error("unsupported color space: {0}")]
    UnsupportedColorSpace(String),

    #[error("unsupported image layout: {0}")]
    UnsupportedLayout(String),

    #[error("pixel data size mismatch: got {got} bytes, expected {expected}")]
    SizeMismatch { got: usize, expected: usize },

    #[error("failed to read stream: {0}")]
    Stream(#[from] lopdf::Error),

    #[error("codec error: {0}")]
    Codec(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

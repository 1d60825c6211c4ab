//! Error types for snapshot ring operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Primary error type for ring operations.
#[derive(Error, Debug)]
pub enum SnapError {
    // Input errors
    #[error("Source image not found: {}", .path.display())]
    MissingSource { path: PathBuf },

    // Filesystem errors
    #[error("Permission denied while trying to {op} {}", .path.display())]
    PermissionDenied { op: &'static str, path: PathBuf },

    #[error("Failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Layout errors
    #[error("Invalid queue length {len}: a ring needs at least one slot")]
    InvalidQueueLength { len: usize },
}

impl SnapError {
    /// Classify an I/O failure from a filesystem step.
    pub fn from_io(op: &'static str, path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                op,
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                op,
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Stable snake_case name used in robot output.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingSource { .. } => "missing_source",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::Io { .. } => "io",
            Self::InvalidQueueLength { .. } => "invalid_queue_length",
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingSource { .. } | Self::PermissionDenied { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingSource { .. } => {
                Some("Capture an image to cam.jpg first, or point --dir at the camera directory")
            }
            Self::PermissionDenied { .. } => {
                Some("Check write permissions on the ring directory and its snap files")
            }
            Self::InvalidQueueLength { .. } => Some("Use a queue length of 1 or more"),
            Self::Io { .. } => None,
        }
    }
}

/// Convenience type alias for Results using SnapError.
pub type Result<T> = std::result::Result<T, SnapError>;

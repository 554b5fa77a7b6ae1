//! Error types for the averaging pipeline.
//!
//! Errors are split between run-fatal conditions (dataset layout, output
//! collisions, bad configuration) and per-subject conditions that are
//! isolated to the subject they occur in.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Error, Debug)]
pub enum AvgRunsError {
    /// Dataset root is missing or does not look like a BIDS tree.
    /// Fatal for the whole run.
    #[error("invalid dataset layout at {}: {reason}", root.display())]
    DatasetLayout { root: PathBuf, reason: String },

    /// A subject matched no scan files.
    #[error("no scans matched for subject {subject}")]
    EmptyInput { subject: String },

    /// Images cannot be stacked because their voxel grids differ.
    #[error(
        "dimension mismatch: {} is {actual:?} but reference {} is {expected:?}",
        image.display(),
        reference.display()
    )]
    DimensionMismatch {
        reference: PathBuf,
        image: PathBuf,
        expected: [u16; 3],
        actual: [u16; 3],
    },

    /// An external tool could not be spawned or exited non-zero.
    #[error("{tool} failed ({status}): {stderr}")]
    ExternalTool {
        tool: String,
        status: String,
        stderr: String,
    },

    /// Two subjects resolved to the same output path.
    #[error("output collision: {} claimed by sub-{first} and sub-{second}", path.display())]
    OutputCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// A NIfTI header could not be read.
    #[error("failed to read NIfTI header from {}: {reason}", path.display())]
    NiftiHeader { path: PathBuf, reason: String },

    /// Invalid run configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Filesystem error with the path it occurred on.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, AvgRunsError>;

impl AvgRunsError {
    /// Create a dataset layout error.
    pub fn dataset_layout(root: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DatasetLayout {
            root: root.into(),
            reason: reason.into(),
        }
    }

    /// Create an empty-input error for a subject.
    pub fn empty_input(subject: impl Into<String>) -> Self {
        Self::EmptyInput {
            subject: subject.into(),
        }
    }

    /// Create an external tool failure.
    pub fn external_tool(
        tool: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

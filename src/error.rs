//! Failure records for a pipe run.

use crate::LineCounts;
use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Boxed cause returned by a caller's transformation.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Why a pipe run stopped early.
///
/// Every variant carries the counts as they stood when the run stopped,
/// so the caller knows how far the run got.
#[derive(Debug, Error)]
pub enum PipeError {
    /// The reader failed before a clean end of input.
    #[error("execution stopped with {counts}, due to error from reader: {source}")]
    Read {
        counts: LineCounts,
        #[source]
        source: io::Error,
    },

    /// The writer failed while writing a line or flushing.
    #[error("execution stopped with {counts}, due to error from writer: {source}")]
    Write {
        counts: LineCounts,
        #[source]
        source: io::Error,
    },

    /// The caller's transformation reported a failure for a line.
    #[error("execution stopped with {counts}, due to error from transform: {source}")]
    Transform {
        counts: LineCounts,
        #[source]
        source: BoxError,
    },
}

impl PipeError {
    /// Counts at the moment the run stopped.
    pub fn line_counts(&self) -> LineCounts {
        match self {
            PipeError::Read { counts, .. }
            | PipeError::Write { counts, .. }
            | PipeError::Transform { counts, .. } => *counts,
        }
    }

    /// Which end of the pipe failed, for log fields.
    pub fn origin(&self) -> &'static str {
        match self {
            PipeError::Read { .. } => "reader",
            PipeError::Write { .. } => "writer",
            PipeError::Transform { .. } => "transform",
        }
    }
}

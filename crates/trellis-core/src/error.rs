//! Error types for Trellis.

use thiserror::Error;

/// The main error type for Trellis operations.
///
/// Only index-addressed insertions can fail. Removing a row or section that
/// is not a member is a silent no-op, and faults inside caller-supplied
/// closures propagate to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrellisError {
    /// A row insertion index was outside `0..=count`.
    #[error("row index {index} is out of range for a section with {count} rows")]
    IndexOutOfRange {
        /// The requested insertion index.
        index: usize,
        /// The number of rows in the section at call time.
        count: usize,
    },

    /// A section insertion index was outside `0..=count`.
    #[error("section index {index} is out of range for a model with {count} sections")]
    SectionIndexOutOfRange {
        /// The requested insertion index.
        index: usize,
        /// The number of sections in the model at call time.
        count: usize,
    },
}

impl TrellisError {
    /// Returns `true` for either out-of-range variant.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::SectionIndexOutOfRange { .. }
        )
    }
}

/// A specialized Result type for Trellis operations.
pub type Result<T> = std::result::Result<T, TrellisError>;

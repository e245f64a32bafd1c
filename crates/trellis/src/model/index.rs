//! Index paths and identities for table content.
//!
//! An [`IndexPath`] locates a row by `(section, row)`. Index paths are
//! derived on demand from the current section and row order and should be
//! used immediately rather than stored: after any insertion or removal a
//! previously obtained path may point at a different row.
//!
//! Rows, sections and models additionally carry process-unique identities
//! ([`RowId`], [`SectionId`], [`ModelId`]). Membership checks compare
//! identities, never structural equality.

use std::sync::atomic::{AtomicU64, Ordering};

/// A global counter for generating unique identities.
static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// The position of a row in a table: `(section, row)`.
///
/// Index paths order by section first, then by row, which is the visual
/// order of the table.
///
/// # Example
///
/// ```
/// use trellis::model::IndexPath;
///
/// let path = IndexPath::new(1, 4);
/// assert_eq!(path.section(), 1);
/// assert_eq!(path.row(), 4);
/// assert!(IndexPath::new(0, 9) < path);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    section: usize,
    row: usize,
}

impl IndexPath {
    /// Creates an index path.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the section index.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the row index within the section.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns a path to another row in the same section.
    #[inline]
    pub const fn sibling(&self, row: usize) -> Self {
        Self::new(self.section, row)
    }

    /// Builds the paths for the rows `start..start + count` of `section`.
    pub fn range(section: usize, start: usize, count: usize) -> Vec<IndexPath> {
        (start..start + count).map(|row| Self::new(section, row)).collect()
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl std::fmt::Display for IndexPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

macro_rules! identity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            pub(crate) fn next() -> Self {
                Self(next_id())
            }

            /// Returns the raw identifier value.
            #[inline]
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }
    };
}

identity! {
    /// Identity of a [`TableModel`](super::TableModel).
    ModelId
}

identity! {
    /// Identity of a [`Section`](super::Section).
    SectionId
}

identity! {
    /// Identity of a [`Row`](super::Row).
    RowId
}

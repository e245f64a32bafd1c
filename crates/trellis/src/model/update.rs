//! Update instructions issued to the widget.
//!
//! Every logical mutation of a bound model produces exactly one
//! [`TableUpdate`]. The widget applies it atomically: its row and section
//! counts before the update plus the inserted minus the deleted entries must
//! equal the counts the data source reports afterwards.

use super::animation::RowAnimation;
use super::index::IndexPath;

/// The kind of an update instruction, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// Rows were inserted.
    InsertRows,
    /// Rows were deleted.
    DeleteRows,
    /// Row content must be re-requested.
    ReloadRows,
    /// Sections were inserted.
    InsertSections,
    /// Sections were deleted.
    DeleteSections,
    /// Section metadata (header/footer) must be re-requested.
    ReloadSections,
    /// Everything must be re-requested.
    ReloadData,
}

/// One atomic batch instruction for the widget.
///
/// Index lists are sorted ascending and free of duplicates. Row paths of a
/// delete refer to positions before the deletion; row paths of an insert
/// refer to positions after the insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableUpdate {
    /// Insert rows at the given paths.
    InsertRows {
        /// Paths of the new rows.
        paths: Vec<IndexPath>,
        /// Transition hint.
        animation: RowAnimation,
    },
    /// Delete the rows at the given paths.
    DeleteRows {
        /// Paths of the removed rows.
        paths: Vec<IndexPath>,
        /// Transition hint.
        animation: RowAnimation,
    },
    /// Reload the rows at the given paths.
    ReloadRows {
        /// Paths of the rows to refresh.
        paths: Vec<IndexPath>,
        /// Transition hint.
        animation: RowAnimation,
    },
    /// Insert sections at the given indices.
    InsertSections {
        /// Indices of the new sections.
        sections: Vec<usize>,
        /// Transition hint.
        animation: RowAnimation,
    },
    /// Delete the sections at the given indices.
    DeleteSections {
        /// Indices of the removed sections.
        sections: Vec<usize>,
        /// Transition hint.
        animation: RowAnimation,
    },
    /// Reload header/footer metadata for the given sections.
    ReloadSections {
        /// Indices of the sections to refresh.
        sections: Vec<usize>,
        /// Transition hint.
        animation: RowAnimation,
    },
    /// Discard all cached state and re-query the data source.
    ReloadData,
}

impl TableUpdate {
    pub(crate) fn insert_rows(mut paths: Vec<IndexPath>, animation: RowAnimation) -> Self {
        normalize(&mut paths);
        Self::InsertRows { paths, animation }
    }

    pub(crate) fn delete_rows(mut paths: Vec<IndexPath>, animation: RowAnimation) -> Self {
        normalize(&mut paths);
        Self::DeleteRows { paths, animation }
    }

    pub(crate) fn reload_rows(mut paths: Vec<IndexPath>, animation: RowAnimation) -> Self {
        normalize(&mut paths);
        Self::ReloadRows { paths, animation }
    }

    pub(crate) fn insert_sections(mut sections: Vec<usize>, animation: RowAnimation) -> Self {
        normalize(&mut sections);
        Self::InsertSections {
            sections,
            animation,
        }
    }

    pub(crate) fn delete_sections(mut sections: Vec<usize>, animation: RowAnimation) -> Self {
        normalize(&mut sections);
        Self::DeleteSections {
            sections,
            animation,
        }
    }

    pub(crate) fn reload_sections(mut sections: Vec<usize>, animation: RowAnimation) -> Self {
        normalize(&mut sections);
        Self::ReloadSections {
            sections,
            animation,
        }
    }

    /// Returns the kind of this instruction.
    pub fn kind(&self) -> UpdateKind {
        match self {
            Self::InsertRows { .. } => UpdateKind::InsertRows,
            Self::DeleteRows { .. } => UpdateKind::DeleteRows,
            Self::ReloadRows { .. } => UpdateKind::ReloadRows,
            Self::InsertSections { .. } => UpdateKind::InsertSections,
            Self::DeleteSections { .. } => UpdateKind::DeleteSections,
            Self::ReloadSections { .. } => UpdateKind::ReloadSections,
            Self::ReloadData => UpdateKind::ReloadData,
        }
    }

    /// Returns the animation hint, or `None` for [`TableUpdate::ReloadData`].
    pub fn animation(&self) -> Option<RowAnimation> {
        match self {
            Self::InsertRows { animation, .. }
            | Self::DeleteRows { animation, .. }
            | Self::ReloadRows { animation, .. }
            | Self::InsertSections { animation, .. }
            | Self::DeleteSections { animation, .. }
            | Self::ReloadSections { animation, .. } => Some(*animation),
            Self::ReloadData => None,
        }
    }

    /// Returns the row paths targeted by a row-level instruction.
    pub fn paths(&self) -> &[IndexPath] {
        match self {
            Self::InsertRows { paths, .. }
            | Self::DeleteRows { paths, .. }
            | Self::ReloadRows { paths, .. } => paths,
            _ => &[],
        }
    }

    /// Returns the section indices targeted by a section-level instruction.
    pub fn sections(&self) -> &[usize] {
        match self {
            Self::InsertSections { sections, .. }
            | Self::DeleteSections { sections, .. }
            | Self::ReloadSections { sections, .. } => sections,
            _ => &[],
        }
    }

    /// Returns `true` if the instruction changes row or section counts.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind(),
            UpdateKind::InsertRows
                | UpdateKind::DeleteRows
                | UpdateKind::InsertSections
                | UpdateKind::DeleteSections
        )
    }

    /// Returns `true` if the instruction targets nothing.
    ///
    /// Empty instructions are never sent to the widget.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::ReloadData => false,
            _ => self.paths().is_empty() && self.sections().is_empty(),
        }
    }
}

fn normalize<T: Ord>(items: &mut Vec<T>) {
    items.sort_unstable();
    items.dedup();
}

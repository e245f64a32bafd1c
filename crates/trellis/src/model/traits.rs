//! Core traits for binding a table model to a widget.
//!
//! The binding layer talks to the visual table exclusively through
//! [`TableWidget`]. In the other direction, the widget queries counts
//! through [`TableDataSource`] while it applies an update, and calls the
//! model's inherent data-source/delegate methods (`cell_for`, `height_for`,
//! `did_select`, ...) whenever it needs content.

use std::sync::Arc;

use trellis_core::Signal;

use super::index::IndexPath;
use super::update::TableUpdate;

/// The visual table widget a [`TableModel`](super::TableModel) drives.
///
/// Implementations own rendering, scrolling and cell recycling. The model is
/// the only caller of these methods.
///
/// # Implementation Requirements
///
/// - [`apply_update`](TableWidget::apply_update) must apply the instruction
///   atomically relative to subsequent count queries. The data source passed
///   in already reflects the state after the update, so an implementation can
///   verify its own bookkeeping against it.
/// - [`dequeue_cell`](TableWidget::dequeue_cell) must return a reusable or
///   fresh cell built from the given template.
///
/// # Example
///
/// ```ignore
/// use trellis::model::{IndexPath, TableDataSource, TableUpdate, TableWidget};
///
/// struct TerminalTable { /* ... */ }
///
/// impl TableWidget for TerminalTable {
///     type Cell = TextCell;
///
///     fn dequeue_cell(&self, template_id: &str, _path: IndexPath) -> TextCell {
///         self.pool.take(template_id)
///     }
///
///     fn dequeue_header_footer_view(&self, template_id: &str, _section: usize) -> TextCell {
///         self.pool.take(template_id)
///     }
///
///     fn apply_update(&self, update: &TableUpdate, data: &dyn TableDataSource) {
///         self.schedule_redraw(update, data.number_of_sections());
///     }
///
///     fn selected_index_path(&self) -> Option<IndexPath> {
///         self.selection.get()
///     }
///
///     fn clear_selection(&self) {
///         self.selection.set(None);
///     }
/// }
/// ```
pub trait TableWidget: Send + Sync + 'static {
    /// The widget's visual item type, used for rows and for header/footer
    /// views alike.
    type Cell: 'static;

    /// Returns a cell for the given template, to be shown at `path`.
    fn dequeue_cell(&self, template_id: &str, path: IndexPath) -> Self::Cell;

    /// Returns a header or footer view for the given template, to be shown
    /// for `section`.
    fn dequeue_header_footer_view(&self, template_id: &str, section: usize) -> Self::Cell;

    /// Applies one batch instruction.
    fn apply_update(&self, update: &TableUpdate, data_source: &dyn TableDataSource);

    /// Returns the currently selected row, if any.
    fn selected_index_path(&self) -> Option<IndexPath>;

    /// Clears the visual selection.
    fn clear_selection(&self);
}

impl<T: TableWidget> TableWidget for Arc<T> {
    type Cell = T::Cell;

    fn dequeue_cell(&self, template_id: &str, path: IndexPath) -> Self::Cell {
        (**self).dequeue_cell(template_id, path)
    }

    fn dequeue_header_footer_view(&self, template_id: &str, section: usize) -> Self::Cell {
        (**self).dequeue_header_footer_view(template_id, section)
    }

    fn apply_update(&self, update: &TableUpdate, data_source: &dyn TableDataSource) {
        (**self).apply_update(update, data_source);
    }

    fn selected_index_path(&self) -> Option<IndexPath> {
        (**self).selected_index_path()
    }

    fn clear_selection(&self) {
        (**self).clear_selection();
    }
}

/// Count queries the widget may issue while applying an update.
pub trait TableDataSource {
    /// Returns the number of sections.
    fn number_of_sections(&self) -> usize;

    /// Returns the number of rows in `section`, or 0 for an unknown section.
    fn number_of_rows(&self, section: usize) -> usize;

    /// Returns the number of rows across all sections.
    fn total_row_count(&self) -> usize {
        (0..self.number_of_sections())
            .map(|section| self.number_of_rows(section))
            .sum()
    }
}

/// Signals emitted by a [`TableModel`](super::TableModel).
///
/// Observers connect here to follow what the model tells its widget,
/// for example to keep an accessibility tree or a status line in sync.
pub struct TableSignals {
    /// Emitted after the widget applied an update instruction.
    pub update_applied: Signal<TableUpdate>,

    /// Emitted after a row's selection has been handled.
    pub row_selected: Signal<IndexPath>,
}

impl Default for TableSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSignals {
    /// Creates a new set of table signals.
    pub fn new() -> Self {
        Self {
            update_applied: Signal::new(),
            row_selected: Signal::new(),
        }
    }
}

impl std::fmt::Debug for TableSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSignals")
            .field("update_applied", &self.update_applied.connection_count())
            .field("row_selected", &self.row_selected.connection_count())
            .finish()
    }
}

//! Shared test widget for the integration tests.
//!
//! `MockTable` mirrors what a real table widget does with update
//! instructions: it keeps its own per-section row counts, applies every
//! instruction to them, and then checks the result against the data source.
//! A model that emits a wrong or missing instruction makes the check panic.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use trellis::model::{
    IndexPath, RowHeight, TableDataSource, TableModel, TableUpdate, TableWidget,
};

/// Natural height of every mock cell template.
pub const TEMPLATE_HEIGHT: f32 = 80.0;

/// A cell or header/footer view handed out by [`MockTable`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockCell {
    pub template_id: String,
    pub path: Option<IndexPath>,
    pub section: Option<usize>,
    pub text: String,
    pub height: f32,
}

#[derive(Default)]
pub struct MockTable {
    counts: Mutex<Vec<usize>>,
    updates: Mutex<Vec<TableUpdate>>,
    selection: Mutex<Option<IndexPath>>,
    dequeued: Mutex<usize>,
}

impl MockTable {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns every instruction applied so far.
    pub fn updates(&self) -> Vec<TableUpdate> {
        self.updates.lock().clone()
    }

    /// Returns and forgets the instructions applied so far.
    pub fn take_updates(&self) -> Vec<TableUpdate> {
        std::mem::take(&mut *self.updates.lock())
    }

    /// Returns the widget's own view of the row counts.
    pub fn counts(&self) -> Vec<usize> {
        self.counts.lock().clone()
    }

    /// Simulates the user highlighting a row.
    pub fn select(&self, path: IndexPath) {
        *self.selection.lock() = Some(path);
    }

    pub fn dequeued(&self) -> usize {
        *self.dequeued.lock()
    }

    fn cell(&self, template_id: &str) -> MockCell {
        *self.dequeued.lock() += 1;
        MockCell {
            template_id: template_id.to_string(),
            height: TEMPLATE_HEIGHT,
            ..MockCell::default()
        }
    }
}

impl TableWidget for MockTable {
    type Cell = MockCell;

    fn dequeue_cell(&self, template_id: &str, path: IndexPath) -> MockCell {
        MockCell {
            path: Some(path),
            ..self.cell(template_id)
        }
    }

    fn dequeue_header_footer_view(&self, template_id: &str, section: usize) -> MockCell {
        MockCell {
            section: Some(section),
            ..self.cell(template_id)
        }
    }

    fn apply_update(&self, update: &TableUpdate, data: &dyn TableDataSource) {
        let mut counts = self.counts.lock();
        match update {
            TableUpdate::InsertSections { sections, .. } => {
                for &section in sections {
                    assert!(section <= counts.len(), "section insert {section} out of range");
                    counts.insert(section, data.number_of_rows(section));
                }
            }
            TableUpdate::DeleteSections { sections, .. } => {
                for &section in sections.iter().rev() {
                    assert!(section < counts.len(), "section delete {section} out of range");
                    counts.remove(section);
                }
            }
            TableUpdate::InsertRows { paths, .. } => {
                for path in paths {
                    let count = counts
                        .get_mut(path.section())
                        .unwrap_or_else(|| panic!("row insert into unknown section {path}"));
                    *count += 1;
                }
            }
            TableUpdate::DeleteRows { paths, .. } => {
                // Delete paths address rows as they were before the update.
                let before = counts.clone();
                for path in paths {
                    let count = before
                        .get(path.section())
                        .unwrap_or_else(|| panic!("row delete from unknown section {path}"));
                    assert!(path.row() < *count, "row delete {path} out of range");
                }
                for path in paths {
                    counts[path.section()] -= 1;
                }
            }
            TableUpdate::ReloadRows { paths, .. } => {
                for path in paths {
                    assert!(
                        path.row() < data.number_of_rows(path.section()),
                        "reload {path} out of range"
                    );
                }
            }
            TableUpdate::ReloadSections { sections, .. } => {
                for &section in sections {
                    assert!(
                        section < data.number_of_sections(),
                        "reload section {section} out of range"
                    );
                }
            }
            TableUpdate::ReloadData => {
                *counts = (0..data.number_of_sections())
                    .map(|s| data.number_of_rows(s))
                    .collect();
            }
        }

        let expected: Vec<usize> = (0..data.number_of_sections())
            .map(|s| data.number_of_rows(s))
            .collect();
        assert_eq!(*counts, expected, "widget out of sync after {update:?}");

        self.updates.lock().push(update.clone());
    }

    fn selected_index_path(&self) -> Option<IndexPath> {
        *self.selection.lock()
    }

    fn clear_selection(&self) {
        *self.selection.lock() = None;
    }
}

pub type MockModel = TableModel<Arc<MockTable>>;

/// Creates a model bound to a fresh mock widget.
pub fn model() -> (Arc<MockTable>, MockModel) {
    init_tracing();
    let table = MockTable::new();
    let model = TableModel::new(table.clone());
    (table, model)
}

/// Resolves the height the widget would lay out for `path`.
pub fn laid_out_height(model: &MockModel, path: IndexPath) -> Option<f32> {
    model
        .height_for(path)
        .map(|height: RowHeight| height.unwrap_or(TEMPLATE_HEIGHT))
}

/// Routes model logs to the test output; `RUST_LOG=trellis=debug` shows
/// every applied instruction.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

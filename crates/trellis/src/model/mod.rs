//! Declarative table binding.
//!
//! This module describes a sectioned table as plain data and keeps a table
//! widget in sync with it. Application code builds [`Row`]s and
//! [`Section`]s, hands them to a [`TableModel`], and from then on only
//! mutates the model objects; every mutation is translated into exactly one
//! [`TableUpdate`] batch instruction for the widget.
//!
//! # Core Types
//!
//! - [`Row`]: one list item; cell template, height, deferred configuration,
//!   selection and edit behavior
//! - [`Section`]: an ordered group of rows with header and footer metadata
//! - [`TableModel`]: owns the sections and the widget, answers the widget's
//!   data queries and dispatches its interactions
//! - [`TableWidget`]: the trait the visual table implements
//! - [`TableUpdate`]: the batch instructions the widget applies
//! - [`IndexPath`]: a `(section, row)` position, always computed fresh
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  owns   ┌─────────────┐  owns   ┌─────────────┐
//! │ TableModel  │────────>│   Section   │────────>│     Row     │
//! │             │<╌╌╌╌╌╌╌╌│             │<╌╌╌╌╌╌╌╌│             │
//! └─────────────┘  weak   └─────────────┘  weak   └─────────────┘
//!       │    ▲
//!       │    │ cell_for / height_for / did_select / ...
//!       ▼    │
//! ┌─────────────┐
//! │ TableWidget │  apply_update(TableUpdate)
//! └─────────────┘
//! ```
//!
//! Positions are never stored: a row's [`IndexPath`] is derived from its
//! owning section's position in the model and its own position in the
//! section at the time of the query.
//!
//! # Example
//!
//! ```
//! use trellis::model::{IndexPath, Row, Section, TableDataSource, TableModel, TableUpdate, TableWidget};
//!
//! #[derive(Default)]
//! struct Label(String);
//!
//! struct NullTable;
//!
//! impl TableWidget for NullTable {
//!     type Cell = Label;
//!
//!     fn dequeue_cell(&self, _template_id: &str, _path: IndexPath) -> Label {
//!         Label::default()
//!     }
//!
//!     fn dequeue_header_footer_view(&self, _template_id: &str, _section: usize) -> Label {
//!         Label::default()
//!     }
//!
//!     fn apply_update(&self, _update: &TableUpdate, _data: &dyn TableDataSource) {}
//!
//!     fn selected_index_path(&self) -> Option<IndexPath> {
//!         None
//!     }
//!
//!     fn clear_selection(&self) {}
//! }
//!
//! let model = TableModel::new(NullTable);
//! let section = Section::new();
//! model.add_section(section.clone());
//!
//! let row = Row::new("Label");
//! row.configure_cell(|cell: &mut Label| cell.0 = "Hello".into());
//! section.add_row(row.clone());
//!
//! assert_eq!(row.index_path(), Some(IndexPath::new(0, 0)));
//! assert_eq!(model.cell_for(IndexPath::new(0, 0)).map(|c| c.0), Some("Hello".into()));
//! ```

mod animation;
mod edit;
mod index;
mod row;
mod section;
mod table_model;
mod traits;
mod update;

pub use animation::RowAnimation;
pub use edit::{EditAction, EditActionStyle};
pub use index::{IndexPath, ModelId, RowId, SectionId};
pub use row::{
    CellConfigurator, EditActionsProvider, HeightProvider, Row, RowHeight, SelectHandler, WeakRow,
};
pub use section::{AnimatedSection, Section, SectionBuilder, SupplementaryView};
pub use table_model::{AnimatedModel, TableModel, TableOptions};
pub use traits::{TableDataSource, TableSignals, TableWidget};
pub use update::{TableUpdate, UpdateKind};

//! Trellis - declarative section/row binding for table widgets.
//!
//! This is the main crate; it re-exports the core plumbing from
//! `trellis-core` and adds the [`model`] binding layer.
//!
//! # Example
//!
//! ```ignore
//! use trellis::prelude::*;
//!
//! let model = TableModel::new(widget);
//!
//! let section = Section::builder()
//!     .header_title("Newsfeed")
//!     .header_height(30.0)
//!     .build();
//! model.add_section(section.clone());
//!
//! let row = Row::new("FeedCell").with_height(120.0);
//! row.on_select(|row| tracing::info!(path = ?row.index_path(), "tapped"));
//! section.add_row(row);
//! ```

pub use trellis_core::*;

pub mod model;
pub mod prelude;

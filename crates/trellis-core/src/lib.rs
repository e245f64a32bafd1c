//! Core plumbing for Trellis.
//!
//! This crate provides the ambient pieces the table binding layer is built on:
//!
//! - **Signal/Slot System**: [`Signal`] for observer notifications
//! - **Errors**: [`TrellisError`] and the [`Result`] alias
//! - **Logging**: tracing targets, span names and a tree formatter for
//!   human-readable model dumps
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let selected = Signal::<(usize, usize)>::new();
//!
//! let conn_id = selected.connect(|(section, row)| {
//!     println!("selected row {row} of section {section}");
//! });
//!
//! selected.emit((0, 2));
//! selected.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Result, TrellisError};
pub use logging::{DebugNode, PerfSpan, TreeDebug, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionGuard, ConnectionId, Signal};

//! Prelude module for Trellis.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use crate::{ConnectionId, Result, Signal, TrellisError};

// ============================================================================
// Table Model
// ============================================================================

pub use crate::model::{
    EditAction, EditActionStyle, IndexPath, Row, RowAnimation, RowHeight, Section,
    SupplementaryView, TableModel, TableOptions,
};

// ============================================================================
// Widget Integration
// ============================================================================

pub use crate::model::{TableDataSource, TableUpdate, TableWidget, UpdateKind};

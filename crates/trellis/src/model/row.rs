//! Rows: the leaf entities of a table.
//!
//! A [`Row`] describes one list item: which cell template it uses, how tall
//! it is, how to fill a freshly dequeued cell, and what happens when the user
//! selects or edits it. Everything is stored as deferred callbacks that run
//! only when the widget asks for them.
//!
//! # Example
//!
//! ```
//! use trellis::model::{Row, RowHeight};
//!
//! struct LabelCell {
//!     text: String,
//! }
//!
//! let row = Row::<LabelCell>::new("LabelCell").with_height(44.0);
//! row.configure_cell(|cell| cell.text = "Hello".into());
//!
//! assert_eq!(row.resolved_height(), RowHeight::Fixed(44.0));
//! ```

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use trellis_core::logging::targets;

use super::edit::EditAction;
use super::index::{IndexPath, RowId};
use super::section::{Section, SectionInner};

/// Deferred cell configuration callback.
pub type CellConfigurator<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// Deferred height computation.
pub type HeightProvider = Arc<dyn Fn() -> f32 + Send + Sync>;

/// Selection callback; receives the selected row.
pub type SelectHandler<C> = Arc<dyn Fn(&Row<C>) + Send + Sync>;

/// Builds the edit actions for an editable row.
pub type EditActionsProvider = Arc<dyn Fn() -> Vec<EditAction> + Send + Sync>;

/// The height a row reports to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RowHeight {
    /// An explicit height in logical pixels.
    Fixed(f32),
    /// Let the widget use the template's natural height.
    #[default]
    Automatic,
}

impl RowHeight {
    /// Returns the explicit height, if any.
    pub fn fixed(&self) -> Option<f32> {
        match self {
            RowHeight::Fixed(height) => Some(*height),
            RowHeight::Automatic => None,
        }
    }

    /// Returns the explicit height or `template_default`.
    pub fn unwrap_or(&self, template_default: f32) -> f32 {
        self.fixed().unwrap_or(template_default)
    }
}

struct RowState<C> {
    height: Option<f32>,
    height_provider: Option<HeightProvider>,
    configurator: Option<CellConfigurator<C>>,
    select_handler: Option<SelectHandler<C>>,
    deselect_after_selection: bool,
    editable: bool,
    edit_actions: Option<EditActionsProvider>,
    section: Weak<SectionInner<C>>,
}

pub(crate) struct RowInner<C> {
    id: RowId,
    template_id: String,
    state: RwLock<RowState<C>>,
}

/// A shared handle to one table row.
///
/// Cloning a `Row` clones the handle, not the row: all clones refer to the
/// same entity, and membership checks use that identity ([`Row::ptr_eq`]).
///
/// A row belongs to at most one [`Section`] at a time. The owning section
/// is tracked as a weak back-reference that the section sets on insertion and
/// clears on removal; a row cannot insert itself anywhere.
pub struct Row<C> {
    inner: Arc<RowInner<C>>,
}

impl<C> Clone for Row<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C: 'static> Row<C> {
    /// Creates a row that renders with the given cell template.
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RowInner {
                id: RowId::next(),
                template_id: template_id.into(),
                state: RwLock::new(RowState {
                    height: None,
                    height_provider: None,
                    configurator: None,
                    select_handler: None,
                    deselect_after_selection: true,
                    editable: false,
                    edit_actions: None,
                    section: Weak::new(),
                }),
            }),
        }
    }

    /// Returns the row's identity.
    pub fn id(&self) -> RowId {
        self.inner.id
    }

    /// Returns the cell template identifier.
    pub fn template_id(&self) -> &str {
        &self.inner.template_id
    }

    /// Returns `true` if both handles refer to the same row.
    pub fn ptr_eq(&self, other: &Row<C>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Creates a weak handle to this row.
    pub fn downgrade(&self) -> WeakRow<C> {
        WeakRow {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // =========================================================================
    // Cell configuration
    // =========================================================================

    /// Registers the cell configurator, replacing any previous one.
    ///
    /// The configurator runs once each time the widget binds a freshly
    /// dequeued cell to this row. Registering it while a cell is already on
    /// screen does not touch that cell; the new configurator applies from the
    /// next binding on.
    ///
    /// The configurator may call setters on the row itself, for example to
    /// adopt a height the cell computed from its content.
    pub fn configure_cell<F>(&self, configurator: F)
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.inner.state.write().configurator = Some(Arc::new(configurator));
    }

    /// Returns `true` if a configurator is registered.
    pub fn has_configurator(&self) -> bool {
        self.inner.state.read().configurator.is_some()
    }

    /// Runs the configurator against `cell`.
    ///
    /// Returns `false` if no configurator is registered.
    pub(crate) fn bind_cell(&self, cell: &mut C) -> bool {
        let configurator = self.inner.state.read().configurator.clone();
        match configurator {
            Some(configure) => {
                tracing::trace!(
                    target: targets::ROW,
                    row = ?self.id(),
                    template = %self.template_id(),
                    "configuring cell"
                );
                configure(cell);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Height
    // =========================================================================

    /// Sets or clears the explicit height.
    pub fn set_height(&self, height: impl Into<Option<f32>>) {
        self.inner.state.write().height = height.into();
    }

    /// Returns the explicit height, if set.
    pub fn height(&self) -> Option<f32> {
        self.inner.state.read().height
    }

    /// Registers a deferred height computation.
    ///
    /// The provider is evaluated on every height query and takes precedence
    /// over the explicit height.
    pub fn configure_height<F>(&self, provider: F)
    where
        F: Fn() -> f32 + Send + Sync + 'static,
    {
        self.inner.state.write().height_provider = Some(Arc::new(provider));
    }

    /// Removes the deferred height computation.
    pub fn clear_height_provider(&self) {
        self.inner.state.write().height_provider = None;
    }

    /// Resolves the height to report: provider, then explicit height, then
    /// the template default.
    pub fn resolved_height(&self) -> RowHeight {
        let (provider, height) = {
            let state = self.inner.state.read();
            (state.height_provider.clone(), state.height)
        };

        if let Some(provider) = provider {
            return RowHeight::Fixed(provider());
        }
        height.map_or(RowHeight::Automatic, RowHeight::Fixed)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Registers the selection handler, replacing any previous one.
    pub fn on_select<F>(&self, handler: F)
    where
        F: Fn(&Row<C>) + Send + Sync + 'static,
    {
        self.inner.state.write().select_handler = Some(Arc::new(handler));
    }

    /// Returns `true` if a selection handler is registered.
    pub fn has_select_handler(&self) -> bool {
        self.inner.state.read().select_handler.is_some()
    }

    /// Returns whether the widget selection is cleared right after the
    /// handler runs. Defaults to `true`.
    pub fn deselect_after_selection(&self) -> bool {
        self.inner.state.read().deselect_after_selection
    }

    /// Sets whether the widget selection is cleared after the handler runs.
    pub fn set_deselect_after_selection(&self, deselect: bool) {
        self.inner.state.write().deselect_after_selection = deselect;
    }

    /// Runs the selection handler, if any. Returns `true` if one ran.
    pub(crate) fn select(&self) -> bool {
        let handler = self.inner.state.read().select_handler.clone();
        match handler {
            Some(handler) => {
                handler(self);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Returns `true` if the row offers edit actions. Defaults to `false`.
    pub fn is_editable(&self) -> bool {
        self.inner.state.read().editable
    }

    /// Sets whether the row offers edit actions.
    pub fn set_editable(&self, editable: bool) {
        self.inner.state.write().editable = editable;
    }

    /// Registers the edit action provider, replacing any previous one.
    pub fn set_edit_actions<F>(&self, provider: F)
    where
        F: Fn() -> Vec<EditAction> + Send + Sync + 'static,
    {
        self.inner.state.write().edit_actions = Some(Arc::new(provider));
    }

    /// Builds the edit actions. Empty when no provider is registered.
    pub fn edit_actions(&self) -> Vec<EditAction> {
        let provider = self.inner.state.read().edit_actions.clone();
        provider.map(|provider| provider()).unwrap_or_default()
    }

    // =========================================================================
    // Ownership
    // =========================================================================

    /// Returns the section that currently owns this row.
    pub fn section(&self) -> Option<Section<C>> {
        self.section_inner().map(Section::from_inner)
    }

    /// Computes the row's current index path.
    ///
    /// `None` if the row is not in a section or its section is not in a
    /// model.
    pub fn index_path(&self) -> Option<IndexPath> {
        let section = self.section()?;
        let section_index = section.index()?;
        let row = section.index_of(self)?;
        Some(IndexPath::new(section_index, row))
    }

    /// Removes the row from its owning section, if any.
    pub fn remove_from_section(&self) {
        if let Some(section) = self.section() {
            section.remove_row(self);
        }
    }

    pub(crate) fn section_inner(&self) -> Option<Arc<SectionInner<C>>> {
        self.inner.state.read().section.upgrade()
    }

    pub(crate) fn set_section(&self, section: Option<&Arc<SectionInner<C>>>) {
        self.inner.state.write().section = section.map_or_else(Weak::new, Arc::downgrade);
    }

    pub(crate) fn is_owned_by(&self, section: &Arc<SectionInner<C>>) -> bool {
        self.inner
            .state
            .read()
            .section
            .upgrade()
            .is_some_and(|owner| Arc::ptr_eq(&owner, section))
    }

    // =========================================================================
    // Builder-style helpers
    // =========================================================================

    /// Sets the explicit height.
    pub fn with_height(self, height: f32) -> Self {
        self.set_height(height);
        self
    }

    /// Sets the cell configurator.
    pub fn with_configurator<F>(self, configurator: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.configure_cell(configurator);
        self
    }

    /// Sets the selection handler.
    pub fn with_select_handler<F>(self, handler: F) -> Self
    where
        F: Fn(&Row<C>) + Send + Sync + 'static,
    {
        self.on_select(handler);
        self
    }

    /// Sets the editable flag.
    pub fn with_editable(self, editable: bool) -> Self {
        self.set_editable(editable);
        self
    }

    /// Sets whether selection is cleared after the handler runs.
    pub fn with_deselect_after_selection(self, deselect: bool) -> Self {
        self.set_deselect_after_selection(deselect);
        self
    }
}

impl<C> std::fmt::Debug for Row<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Row")
            .field("id", &self.inner.id)
            .field("template_id", &self.inner.template_id)
            .field("height", &state.height)
            .field("editable", &state.editable)
            .field("attached", &(state.section.strong_count() > 0))
            .finish()
    }
}

/// A weak handle to a [`Row`].
pub struct WeakRow<C> {
    inner: Weak<RowInner<C>>,
}

impl<C> Clone for WeakRow<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C> WeakRow<C> {
    /// Upgrades to a strong handle if the row is still alive.
    pub fn upgrade(&self) -> Option<Row<C>> {
        self.inner.upgrade().map(|inner| Row { inner })
    }
}

impl<C> std::fmt::Debug for WeakRow<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WeakRow(alive: {})", self.inner.strong_count() > 0)
    }
}

static_assertions::assert_impl_all!(Row<String>: Send, Sync);

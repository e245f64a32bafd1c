//! The table model: the coordinator between sections and the widget.
//!
//! [`TableModel`] owns an ordered list of [`Section`]s and is the only
//! component that talks to the [`TableWidget`]. Section and row mutations
//! are routed through it as [`TableUpdate`] instructions; in the other
//! direction, the widget asks it for counts, cells, heights and header or
//! footer content, and reports selection and edit interactions to it.
//!
//! # Example
//!
//! ```ignore
//! use trellis::model::{Row, RowAnimation, Section, TableModel};
//!
//! let model = TableModel::new(widget);
//!
//! let section = Section::new();
//! section.set_header_title(Some("Newsfeed".into()));
//! section.set_header_height(30.0);
//! model.add_section(section.clone());
//!
//! let row = Row::new("FeedCell");
//! row.configure_cell(|cell| cell.set_text("Hello"));
//! row.on_select(|row| println!("selected {:?}", row.index_path()));
//! section.add_row(row);
//!
//! model.animated(RowAnimation::Fade).remove_section(&section);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use trellis_core::logging::targets;
use trellis_core::{DebugNode, PerfSpan, Result, TreeDebug, TreeFormatOptions, TrellisError};

use super::animation::RowAnimation;
use super::edit::EditAction;
use super::index::{IndexPath, ModelId};
use super::row::{Row, RowHeight};
use super::section::{Section, SectionHost, SectionInner};
use super::traits::{TableDataSource, TableSignals, TableWidget};
use super::update::TableUpdate;

/// Model-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TableOptions {
    section_animation: RowAnimation,
    default_row_animation: Option<RowAnimation>,
}

impl TableOptions {
    /// Creates the default options: automatic section animation, sections
    /// keep their own row animation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the animation used for section inserts and deletes.
    pub fn with_section_animation(mut self, animation: RowAnimation) -> Self {
        self.section_animation = animation;
        self
    }

    /// Sets the row animation adopted by added sections that never chose
    /// one explicitly.
    pub fn with_default_row_animation(mut self, animation: RowAnimation) -> Self {
        self.default_row_animation = Some(animation);
        self
    }

    /// Returns the animation used for section inserts and deletes.
    pub fn section_animation(&self) -> RowAnimation {
        self.section_animation
    }

    /// Returns the row animation adopted by added sections, if any.
    pub fn default_row_animation(&self) -> Option<RowAnimation> {
        self.default_row_animation
    }
}

struct ModelInner<W: TableWidget> {
    id: ModelId,
    this: Weak<ModelInner<W>>,
    widget: W,
    sections: RwLock<Vec<Section<W::Cell>>>,
    options: TableOptions,
    signals: TableSignals,
}

impl<W: TableWidget> ModelInner<W> {
    fn section_animation(&self, animation: Option<RowAnimation>) -> RowAnimation {
        RowAnimation::or_default_to(animation, self.options.section_animation)
    }

    fn section_at(&self, index: usize) -> Option<Section<W::Cell>> {
        self.sections.read().get(index).cloned()
    }

    fn row_at(&self, path: IndexPath) -> Option<Row<W::Cell>> {
        self.section_at(path.section())?.row(path.row())
    }

    fn owns(&self, section: &Section<W::Cell>) -> bool {
        section.model_id() == Some(self.id)
    }

    #[tracing::instrument(skip(self), target = "trellis::model", level = "trace")]
    fn apply(&self, update: TableUpdate) {
        if update.is_empty() {
            tracing::trace!(target: targets::MODEL, model = ?self.id, "skipping empty update");
            return;
        }

        tracing::debug!(
            target: targets::MODEL,
            model = ?self.id,
            kind = ?update.kind(),
            paths = ?update.paths(),
            sections = ?update.sections(),
            animation = ?update.animation(),
            "applying update"
        );
        self.widget.apply_update(&update, self);
        self.signals.update_applied.emit(update);
    }

    fn insert_sections(
        &self,
        sections: Vec<Section<W::Cell>>,
        index: Option<usize>,
        animation: Option<RowAnimation>,
    ) -> Result<()> {
        if let Some(index) = index {
            let count = self.sections.read().len();
            if index > count {
                return Err(TrellisError::SectionIndexOutOfRange { index, count });
            }
        }

        let mut adopted: Vec<Section<W::Cell>> = Vec::with_capacity(sections.len());
        for section in sections {
            if adopted.iter().any(|s| s.ptr_eq(&section)) {
                continue;
            }
            if section.is_attached() {
                tracing::debug!(
                    target: targets::MODEL,
                    section = ?section.id(),
                    to = ?self.id,
                    "moving section between models"
                );
                section.remove_from_model();
            }
            adopted.push(section);
        }
        if adopted.is_empty() {
            return Ok(());
        }

        let count = adopted.len();
        let start = {
            let mut list = self.sections.write();
            // Adopting may have pulled sections out of this very model.
            let start = index.unwrap_or(list.len()).min(list.len());
            list.splice(start..start, adopted.iter().cloned());
            start
        };

        let host: Weak<dyn SectionHost<W::Cell>> = self.this.clone();
        for section in &adopted {
            section.attach(host.clone());
            if let Some(animation) = self.options.default_row_animation {
                section.inherit_row_animation(animation);
            }
        }

        self.apply(TableUpdate::insert_sections(
            (start..start + count).collect(),
            self.section_animation(animation),
        ));
        Ok(())
    }

    fn remove_sections(&self, sections: &[Section<W::Cell>], animation: Option<RowAnimation>) {
        let owned: Vec<&Section<W::Cell>> = sections.iter().filter(|s| self.owns(s)).collect();

        let (indices, removed) = {
            let mut list = self.sections.write();
            let mut indices: Vec<usize> = owned
                .iter()
                .filter_map(|section| list.iter().position(|s| s.ptr_eq(section)))
                .collect();
            indices.sort_unstable();
            indices.dedup();

            let removed: Vec<Section<W::Cell>> =
                indices.iter().rev().map(|&i| list.remove(i)).collect();
            (indices, removed)
        };

        if indices.is_empty() {
            tracing::trace!(
                target: targets::MODEL,
                model = ?self.id,
                "remove of foreign sections ignored"
            );
            return;
        }

        for section in &removed {
            section.detach();
        }
        self.apply(TableUpdate::delete_sections(
            indices,
            self.section_animation(animation),
        ));
    }

    fn remove_all_sections(&self, animation: Option<RowAnimation>) {
        let _span = PerfSpan::new("remove_all_sections");
        let removed = std::mem::take(&mut *self.sections.write());
        if removed.is_empty() {
            return;
        }

        for section in &removed {
            section.detach();
        }
        self.apply(TableUpdate::delete_sections(
            (0..removed.len()).collect(),
            self.section_animation(animation),
        ));
    }
}

impl<W: TableWidget> SectionHost<W::Cell> for ModelInner<W> {
    fn model_id(&self) -> ModelId {
        self.id
    }

    fn section_index(&self, section: &Arc<SectionInner<W::Cell>>) -> Option<usize> {
        self.sections
            .read()
            .iter()
            .position(|s| Arc::ptr_eq(s.inner(), section))
    }

    fn dispatch(&self, update: TableUpdate) {
        self.apply(update);
    }

    fn detach_section(&self, section: &Section<W::Cell>) {
        self.remove_sections(std::slice::from_ref(section), None);
    }
}

impl<W: TableWidget> TableDataSource for ModelInner<W> {
    fn number_of_sections(&self) -> usize {
        self.sections.read().len()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.sections
            .read()
            .get(section)
            .map_or(0, |s| s.row_count())
    }
}

impl<W: TableWidget> Drop for ModelInner<W> {
    fn drop(&mut self) {
        for section in self.sections.get_mut().drain(..) {
            section.detach();
        }
    }
}

/// Coordinates a list of sections with one table widget.
///
/// `TableModel` is a cheap handle; clones share the same model. The model
/// owns its widget and its sections. Sections refer back to the model
/// weakly, so dropping the last model handle unbinds every section.
///
/// # Reentrancy
///
/// No internal lock is held while the widget, a row callback or a signal
/// slot runs. A selection handler or an edit action may therefore mutate the
/// model, including removing the row it was invoked for.
pub struct TableModel<W: TableWidget> {
    inner: Arc<ModelInner<W>>,
}

impl<W: TableWidget> Clone for TableModel<W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<W: TableWidget> TableModel<W> {
    /// Creates an empty model driving `widget`.
    pub fn new(widget: W) -> Self {
        Self::with_options(widget, TableOptions::default())
    }

    /// Creates an empty model with custom options.
    pub fn with_options(widget: W, options: TableOptions) -> Self {
        let inner = Arc::new_cyclic(|this| ModelInner {
            id: ModelId::next(),
            this: this.clone(),
            widget,
            sections: RwLock::new(Vec::new()),
            options,
            signals: TableSignals::new(),
        });
        tracing::debug!(target: targets::MODEL, model = ?inner.id, "created table model");
        Self { inner }
    }

    /// Returns the model's identity.
    pub fn id(&self) -> ModelId {
        self.inner.id
    }

    /// Returns the widget this model drives.
    pub fn widget(&self) -> &W {
        &self.inner.widget
    }

    /// Returns the model's options.
    pub fn options(&self) -> TableOptions {
        self.inner.options
    }

    /// Returns the model's signals.
    pub fn signals(&self) -> &TableSignals {
        &self.inner.signals
    }

    // =========================================================================
    // Section mutations
    // =========================================================================

    /// Returns a mutator whose operations use `animation` instead of the
    /// model's section animation.
    pub fn animated(&self, animation: RowAnimation) -> AnimatedModel<'_, W> {
        AnimatedModel {
            model: self,
            animation,
        }
    }

    /// Appends a section. Its existing rows become visible with it.
    ///
    /// A section owned by another model is removed from there first.
    pub fn add_section(&self, section: Section<W::Cell>) {
        // Appending cannot be out of range.
        let _ = self.inner.insert_sections(vec![section], None, None);
    }

    /// Appends several sections as one batch.
    pub fn add_sections<I>(&self, sections: I)
    where
        I: IntoIterator<Item = Section<W::Cell>>,
    {
        let _ = self
            .inner
            .insert_sections(sections.into_iter().collect(), None, None);
    }

    /// Inserts a section at `index`.
    ///
    /// # Errors
    ///
    /// [`TrellisError::SectionIndexOutOfRange`] if `index > section_count()`.
    pub fn insert_section(&self, section: Section<W::Cell>, index: usize) -> Result<()> {
        self.inner.insert_sections(vec![section], Some(index), None)
    }

    /// Removes a section owned by this model. Does nothing for sections that
    /// belong to another model or to none.
    pub fn remove_section(&self, section: &Section<W::Cell>) {
        self.inner.remove_sections(std::slice::from_ref(section), None);
    }

    /// Removes several sections as one batch, ignoring foreign ones.
    pub fn remove_sections(&self, sections: &[Section<W::Cell>]) {
        self.inner.remove_sections(sections, None);
    }

    /// Removes every section as one batch.
    pub fn remove_all_sections(&self) {
        self.inner.remove_all_sections(None);
    }

    /// Asks the widget to discard everything and re-query.
    pub fn reload_data(&self) {
        self.inner.apply(TableUpdate::ReloadData);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.inner.number_of_sections()
    }

    /// Returns the section at `index`.
    pub fn section(&self, index: usize) -> Option<Section<W::Cell>> {
        self.inner.section_at(index)
    }

    /// Returns a snapshot of the sections in display order.
    pub fn sections(&self) -> Vec<Section<W::Cell>> {
        self.inner.sections.read().clone()
    }

    /// Returns the row at `path`.
    pub fn row_at(&self, path: IndexPath) -> Option<Row<W::Cell>> {
        self.inner.row_at(path)
    }

    /// Returns the current index path of `row`, if it is shown by this
    /// model.
    pub fn index_path_of(&self, row: &Row<W::Cell>) -> Option<IndexPath> {
        let section = row.section()?;
        if !self.inner.owns(&section) {
            return None;
        }
        row.index_path()
    }

    /// Returns the number of rows across all sections.
    pub fn total_row_count(&self) -> usize {
        self.inner.total_row_count()
    }

    /// Renders the section and row structure as a text tree.
    pub fn debug_tree(&self, options: TreeFormatOptions) -> String {
        let sections = self.sections();
        let mut root = DebugNode::new("TableModel")
            .with_id(self.id())
            .with_detail("sections", sections.len());

        for (index, section) in sections.iter().enumerate() {
            let mut node = DebugNode::new(format!("section {index}"))
                .with_id(section.id())
                .with_detail("rows", section.row_count())
                .with_detail("animation", format!("{:?}", section.row_animation()));
            if let Some(title) = section.header_title() {
                node = node.with_detail("header", title);
            }

            for (row_index, row) in section.rows().iter().enumerate() {
                let height = row
                    .height()
                    .map_or_else(|| "auto".to_string(), |h| h.to_string());
                node.push_child(
                    DebugNode::new(format!("row {row_index}: {}", row.template_id()))
                        .with_id(row.id())
                        .with_detail("height", height)
                        .with_detail("editable", row.is_editable()),
                );
            }
            root.push_child(node);
        }

        TreeDebug::with_options(options).format(&root)
    }

    // =========================================================================
    // Widget surface
    // =========================================================================

    /// Dequeues and configures the cell for `path`.
    ///
    /// `None` if `path` does not name a row.
    pub fn cell_for(&self, path: IndexPath) -> Option<W::Cell> {
        let row = self.row_at(path)?;
        let mut cell = self.inner.widget.dequeue_cell(row.template_id(), path);
        row.bind_cell(&mut cell);
        Some(cell)
    }

    /// Returns the height of the row at `path`.
    pub fn height_for(&self, path: IndexPath) -> Option<RowHeight> {
        self.row_at(path).map(|row| row.resolved_height())
    }

    /// Dequeues and configures the header view of `section`.
    pub fn header_view_for(&self, section: usize) -> Option<W::Cell> {
        let view = self.section(section)?.header_view()?;
        let mut cell = self
            .inner
            .widget
            .dequeue_header_footer_view(view.template_id(), section);
        view.configure(&mut cell);
        Some(cell)
    }

    /// Dequeues and configures the footer view of `section`.
    pub fn footer_view_for(&self, section: usize) -> Option<W::Cell> {
        let view = self.section(section)?.footer_view()?;
        let mut cell = self
            .inner
            .widget
            .dequeue_header_footer_view(view.template_id(), section);
        view.configure(&mut cell);
        Some(cell)
    }

    /// Returns the header height of `section`.
    pub fn header_height_for(&self, section: usize) -> Option<f32> {
        self.section(section)?.header_height()
    }

    /// Returns the footer height of `section`.
    pub fn footer_height_for(&self, section: usize) -> Option<f32> {
        self.section(section)?.footer_height()
    }

    /// Returns the header title of `section`.
    pub fn header_title_for(&self, section: usize) -> Option<String> {
        self.section(section)?.header_title()
    }

    /// Returns the footer title of `section`.
    pub fn footer_title_for(&self, section: usize) -> Option<String> {
        self.section(section)?.footer_title()
    }

    /// Handles a selection reported by the widget.
    ///
    /// Runs the row's handler, then clears the widget selection unless the
    /// row opted out, then emits [`TableSignals::row_selected`].
    pub fn did_select(&self, path: IndexPath) {
        let Some(row) = self.row_at(path) else {
            tracing::trace!(target: targets::MODEL, %path, "selection of unknown row ignored");
            return;
        };

        tracing::trace!(target: targets::ROW, row = ?row.id(), %path, "row selected");
        row.select();
        if row.deselect_after_selection() {
            self.inner.widget.clear_selection();
        }
        self.inner.signals.row_selected.emit(path);
    }

    /// Returns `true` if the row at `path` offers edit actions.
    pub fn can_edit(&self, path: IndexPath) -> bool {
        self.row_at(path).is_some_and(|row| row.is_editable())
    }

    /// Returns the edit actions of the row at `path`.
    ///
    /// Empty for rows that are not editable.
    pub fn edit_actions_for(&self, path: IndexPath) -> Vec<EditAction> {
        match self.row_at(path) {
            Some(row) if row.is_editable() => row.edit_actions(),
            _ => Vec::new(),
        }
    }

    /// Commits a swipe-to-delete gesture by removing the row at `path`.
    pub fn commit_delete(&self, path: IndexPath) {
        match self.row_at(path) {
            Some(row) => row.remove_from_section(),
            None => {
                tracing::trace!(target: targets::MODEL, %path, "delete of unknown row ignored");
            }
        }
    }
}

impl<W: TableWidget> TableDataSource for TableModel<W> {
    fn number_of_sections(&self) -> usize {
        self.inner.number_of_sections()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.inner.number_of_rows(section)
    }
}

impl<W: TableWidget> std::fmt::Debug for TableModel<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableModel")
            .field("id", &self.inner.id)
            .field("sections", &self.inner.number_of_sections())
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

/// Section mutations of a [`TableModel`] with an explicit animation
/// override.
///
/// Created by [`TableModel::animated`].
pub struct AnimatedModel<'a, W: TableWidget> {
    model: &'a TableModel<W>,
    animation: RowAnimation,
}

impl<W: TableWidget> AnimatedModel<'_, W> {
    /// Appends a section.
    pub fn add_section(&self, section: Section<W::Cell>) {
        let _ = self
            .model
            .inner
            .insert_sections(vec![section], None, Some(self.animation));
    }

    /// Appends several sections as one batch.
    pub fn add_sections<I>(&self, sections: I)
    where
        I: IntoIterator<Item = Section<W::Cell>>,
    {
        let _ = self.model.inner.insert_sections(
            sections.into_iter().collect(),
            None,
            Some(self.animation),
        );
    }

    /// Inserts a section at `index`.
    ///
    /// # Errors
    ///
    /// [`TrellisError::SectionIndexOutOfRange`] if `index > section_count()`.
    pub fn insert_section(&self, section: Section<W::Cell>, index: usize) -> Result<()> {
        self.model
            .inner
            .insert_sections(vec![section], Some(index), Some(self.animation))
    }

    /// Removes a section owned by the model.
    pub fn remove_section(&self, section: &Section<W::Cell>) {
        self.model
            .inner
            .remove_sections(std::slice::from_ref(section), Some(self.animation));
    }

    /// Removes several sections as one batch.
    pub fn remove_sections(&self, sections: &[Section<W::Cell>]) {
        self.model.inner.remove_sections(sections, Some(self.animation));
    }

    /// Removes every section as one batch.
    pub fn remove_all_sections(&self) {
        self.model.inner.remove_all_sections(Some(self.animation));
    }
}

static_assertions::assert_impl_all!(TableOptions: Send, Sync, Copy);

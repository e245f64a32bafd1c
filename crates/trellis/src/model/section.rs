//! Sections: ordered row containers with header and footer metadata.
//!
//! A [`Section`] owns its rows and translates every row mutation into one
//! batch instruction for the widget. Sections never talk to the widget
//! directly: while bound to a [`TableModel`](super::TableModel) they hand
//! their instructions to the model, which forwards them. An unbound section
//! mutates silently; its rows become visible in one piece when it is added
//! to a model.
//!
//! # Example
//!
//! ```ignore
//! use trellis::model::{Row, RowAnimation, Section};
//!
//! let section = Section::new();
//! model.add_section(section.clone());
//!
//! section.add_row(Row::new("FeedCell"));
//!
//! // Change the animation for the next mutations.
//! section.set_row_animation(RowAnimation::Top);
//! section.insert_row(Row::new("GiveFeedbackCell"), 0)?;
//!
//! // Or override it for a single call.
//! section.animated(RowAnimation::Fade).remove_all_rows();
//! ```

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use trellis_core::logging::targets;
use trellis_core::{PerfSpan, Result, TrellisError};

use super::animation::RowAnimation;
use super::index::{IndexPath, ModelId, SectionId};
use super::row::{CellConfigurator, Row};
use super::update::TableUpdate;

/// The model side of a section binding.
///
/// Implemented by the table model; sections hold it weakly so that
/// ownership only ever flows from model to section.
pub(crate) trait SectionHost<C>: Send + Sync {
    /// Identity of the owning model.
    fn model_id(&self) -> ModelId;

    /// Current index of `section` in the model, computed fresh.
    fn section_index(&self, section: &Arc<SectionInner<C>>) -> Option<usize>;

    /// Forwards an instruction to the widget.
    fn dispatch(&self, update: TableUpdate);

    /// Removes `section` from the model.
    fn detach_section(&self, section: &Section<C>);
}

/// A header or footer view descriptor.
///
/// The widget supplies the view instance for `template_id`; the optional
/// configurator fills it in, the same way a row configures its cell.
pub struct SupplementaryView<C> {
    template_id: String,
    configurator: Option<CellConfigurator<C>>,
}

impl<C> Clone for SupplementaryView<C> {
    fn clone(&self) -> Self {
        Self {
            template_id: self.template_id.clone(),
            configurator: self.configurator.clone(),
        }
    }
}

impl<C> SupplementaryView<C> {
    /// Creates a descriptor for the given view template.
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            configurator: None,
        }
    }

    /// Sets the configurator that fills in the supplied view.
    pub fn with_configurator<F>(mut self, configurator: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.configurator = Some(Arc::new(configurator));
        self
    }

    /// Returns the view template identifier.
    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub(crate) fn configure(&self, view: &mut C) {
        if let Some(configure) = &self.configurator {
            configure(view);
        }
    }
}

impl<C> std::fmt::Debug for SupplementaryView<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplementaryView")
            .field("template_id", &self.template_id)
            .field("configured", &self.configurator.is_some())
            .finish()
    }
}

struct SectionMeta<C> {
    header_view: Option<SupplementaryView<C>>,
    footer_view: Option<SupplementaryView<C>>,
    header_height: Option<f32>,
    footer_height: Option<f32>,
    header_title: Option<String>,
    footer_title: Option<String>,
    row_animation: RowAnimation,
    row_animation_set: bool,
}

impl<C> Default for SectionMeta<C> {
    fn default() -> Self {
        Self {
            header_view: None,
            footer_view: None,
            header_height: None,
            footer_height: None,
            header_title: None,
            footer_title: None,
            row_animation: RowAnimation::default(),
            row_animation_set: false,
        }
    }
}

pub(crate) struct SectionInner<C> {
    id: SectionId,
    rows: RwLock<Vec<Row<C>>>,
    meta: RwLock<SectionMeta<C>>,
    host: RwLock<Option<Weak<dyn SectionHost<C>>>>,
}

/// A shared handle to an ordered group of rows.
///
/// Cloning a `Section` clones the handle. A section belongs to at most one
/// model at a time; the owning model and its widget are tracked as weak
/// back-references that are set when the model adopts the section and
/// cleared, together, when it lets go.
pub struct Section<C> {
    inner: Arc<SectionInner<C>>,
}

impl<C> Clone for Section<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C: 'static> Default for Section<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> Section<C> {
    /// Creates an empty, unbound section.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SectionInner {
                id: SectionId::next(),
                rows: RwLock::new(Vec::new()),
                meta: RwLock::new(SectionMeta::default()),
                host: RwLock::new(None),
            }),
        }
    }

    /// Creates a builder for a section with metadata and initial rows.
    pub fn builder() -> SectionBuilder<C> {
        SectionBuilder::new()
    }

    pub(crate) fn from_inner(inner: Arc<SectionInner<C>>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &Arc<SectionInner<C>> {
        &self.inner
    }

    /// Returns the section's identity.
    pub fn id(&self) -> SectionId {
        self.inner.id
    }

    /// Returns `true` if both handles refer to the same section.
    pub fn ptr_eq(&self, other: &Section<C>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // =========================================================================
    // Row queries
    // =========================================================================

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.inner.rows.read().len()
    }

    /// Returns `true` if the section has no rows.
    pub fn is_empty(&self) -> bool {
        self.inner.rows.read().is_empty()
    }

    /// Returns the row at `index`.
    pub fn row(&self, index: usize) -> Option<Row<C>> {
        self.inner.rows.read().get(index).cloned()
    }

    /// Returns a snapshot of the rows in display order.
    pub fn rows(&self) -> Vec<Row<C>> {
        self.inner.rows.read().clone()
    }

    /// Returns the current index of `row`, if it is a member.
    pub fn index_of(&self, row: &Row<C>) -> Option<usize> {
        self.inner.rows.read().iter().position(|r| r.ptr_eq(row))
    }

    /// Returns `true` if `row` is a member of this section.
    pub fn contains(&self, row: &Row<C>) -> bool {
        row.is_owned_by(&self.inner)
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Returns the identity of the owning model, if the section is bound to
    /// a live model.
    pub fn model_id(&self) -> Option<ModelId> {
        self.host().map(|host| host.model_id())
    }

    /// Returns `true` if the section is bound to a live model and therefore
    /// reaches a widget.
    pub fn is_attached(&self) -> bool {
        self.model_id().is_some()
    }

    /// Returns the section's current index in its model.
    pub fn index(&self) -> Option<usize> {
        let host = self.host()?;
        host.section_index(&self.inner)
    }

    /// Removes the section from its owning model, if any.
    pub fn remove_from_model(&self) {
        if let Some(host) = self.host() {
            host.detach_section(self);
        }
    }

    pub(crate) fn attach(&self, host: Weak<dyn SectionHost<C>>) {
        *self.inner.host.write() = Some(host);
    }

    pub(crate) fn detach(&self) {
        *self.inner.host.write() = None;
    }

    fn host(&self) -> Option<Arc<dyn SectionHost<C>>> {
        self.inner.host.read().as_ref().and_then(Weak::upgrade)
    }

    /// Returns the host and this section's index in it, if bound.
    fn bound_host(&self) -> Option<(Arc<dyn SectionHost<C>>, usize)> {
        let host = self.host()?;
        match host.section_index(&self.inner) {
            Some(index) => Some((host, index)),
            None => {
                tracing::warn!(
                    target: targets::SECTION,
                    section = ?self.id(),
                    "bound section not found in its model; dropping instruction"
                );
                None
            }
        }
    }

    fn dispatch_rows<F>(&self, build: F)
    where
        F: FnOnce(usize) -> TableUpdate,
    {
        match self.bound_host() {
            Some((host, section_index)) => host.dispatch(build(section_index)),
            None => {
                tracing::trace!(
                    target: targets::SECTION,
                    section = ?self.id(),
                    "section unbound, no instruction"
                );
            }
        }
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Returns the default animation for this section's instructions.
    pub fn row_animation(&self) -> RowAnimation {
        self.inner.meta.read().row_animation
    }

    /// Sets the default animation used by subsequent mutations.
    pub fn set_row_animation(&self, animation: RowAnimation) {
        let mut meta = self.inner.meta.write();
        meta.row_animation = animation;
        meta.row_animation_set = true;
    }

    /// Applies a model-wide default unless an animation was chosen
    /// explicitly.
    pub(crate) fn inherit_row_animation(&self, animation: RowAnimation) {
        let mut meta = self.inner.meta.write();
        if !meta.row_animation_set {
            meta.row_animation = animation;
        }
    }

    /// Returns a mutator whose operations use `animation` instead of the
    /// section default.
    pub fn animated(&self, animation: RowAnimation) -> AnimatedSection<'_, C> {
        AnimatedSection {
            section: self,
            animation: Some(animation),
        }
    }

    fn with_default_animation(&self) -> AnimatedSection<'_, C> {
        AnimatedSection {
            section: self,
            animation: None,
        }
    }

    // =========================================================================
    // Row mutations
    // =========================================================================

    /// Appends a row.
    pub fn add_row(&self, row: Row<C>) {
        self.with_default_animation().add_row(row);
    }

    /// Appends several rows as one batch.
    pub fn add_rows<I>(&self, rows: I)
    where
        I: IntoIterator<Item = Row<C>>,
    {
        self.with_default_animation().add_rows(rows);
    }

    /// Inserts a row at `index`.
    ///
    /// # Errors
    ///
    /// [`TrellisError::IndexOutOfRange`] if `index > row_count()`.
    pub fn insert_row(&self, row: Row<C>, index: usize) -> Result<()> {
        self.with_default_animation().insert_row(row, index)
    }

    /// Inserts several rows starting at `index` as one batch.
    ///
    /// # Errors
    ///
    /// [`TrellisError::IndexOutOfRange`] if `index > row_count()`.
    pub fn insert_rows<I>(&self, rows: I, index: usize) -> Result<()>
    where
        I: IntoIterator<Item = Row<C>>,
    {
        self.with_default_animation().insert_rows(rows, index)
    }

    /// Removes a row. Does nothing if the row is not a member.
    pub fn remove_row(&self, row: &Row<C>) {
        self.with_default_animation().remove_row(row);
    }

    /// Removes several rows as one batch, ignoring non-members.
    pub fn remove_rows(&self, rows: &[Row<C>]) {
        self.with_default_animation().remove_rows(rows);
    }

    /// Removes every row as one batch.
    pub fn remove_all_rows(&self) {
        self.with_default_animation().remove_all_rows();
    }

    /// Asks the widget to re-request the cell of a member row.
    pub fn reload_row(&self, row: &Row<C>) {
        self.with_default_animation().reload_rows(std::slice::from_ref(row));
    }

    /// Asks the widget to re-request the cells of member rows.
    pub fn reload_rows(&self, rows: &[Row<C>]) {
        self.with_default_animation().reload_rows(rows);
    }

    // =========================================================================
    // Header and footer
    // =========================================================================

    /// Returns the header view descriptor.
    pub fn header_view(&self) -> Option<SupplementaryView<C>> {
        self.inner.meta.read().header_view.clone()
    }

    /// Sets the header view descriptor.
    pub fn set_header_view(&self, view: Option<SupplementaryView<C>>) {
        self.inner.meta.write().header_view = view;
        self.reload_metadata();
    }

    /// Returns the footer view descriptor.
    pub fn footer_view(&self) -> Option<SupplementaryView<C>> {
        self.inner.meta.read().footer_view.clone()
    }

    /// Sets the footer view descriptor.
    pub fn set_footer_view(&self, view: Option<SupplementaryView<C>>) {
        self.inner.meta.write().footer_view = view;
        self.reload_metadata();
    }

    /// Returns the header height.
    pub fn header_height(&self) -> Option<f32> {
        self.inner.meta.read().header_height
    }

    /// Sets the header height.
    pub fn set_header_height(&self, height: impl Into<Option<f32>>) {
        self.inner.meta.write().header_height = height.into();
        self.reload_metadata();
    }

    /// Returns the footer height.
    pub fn footer_height(&self) -> Option<f32> {
        self.inner.meta.read().footer_height
    }

    /// Sets the footer height.
    pub fn set_footer_height(&self, height: impl Into<Option<f32>>) {
        self.inner.meta.write().footer_height = height.into();
        self.reload_metadata();
    }

    /// Returns the header title.
    pub fn header_title(&self) -> Option<String> {
        self.inner.meta.read().header_title.clone()
    }

    /// Sets the header title.
    pub fn set_header_title(&self, title: Option<String>) {
        self.inner.meta.write().header_title = title;
        self.reload_metadata();
    }

    /// Returns the footer title.
    pub fn footer_title(&self) -> Option<String> {
        self.inner.meta.read().footer_title.clone()
    }

    /// Sets the footer title.
    pub fn set_footer_title(&self, title: Option<String>) {
        self.inner.meta.write().footer_title = title;
        self.reload_metadata();
    }

    fn reload_metadata(&self) {
        let animation = self.row_animation();
        if let Some((host, index)) = self.bound_host() {
            host.dispatch(TableUpdate::reload_sections(vec![index], animation));
        }
    }
}

impl<C> std::fmt::Debug for Section<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let meta = self.inner.meta.read();
        f.debug_struct("Section")
            .field("id", &self.inner.id)
            .field("rows", &self.inner.rows.read().len())
            .field("header_title", &meta.header_title)
            .field("row_animation", &meta.row_animation)
            .field(
                "model_id",
                &self
                    .inner
                    .host
                    .read()
                    .as_ref()
                    .and_then(Weak::upgrade)
                    .map(|host| host.model_id()),
            )
            .finish()
    }
}

/// Row mutations of a [`Section`] with an explicit animation override.
///
/// Created by [`Section::animated`]. Each method behaves exactly like the
/// section method of the same name.
pub struct AnimatedSection<'a, C> {
    section: &'a Section<C>,
    animation: Option<RowAnimation>,
}

impl<C: 'static> AnimatedSection<'_, C> {
    fn animation(&self) -> RowAnimation {
        RowAnimation::or_default_to(self.animation, self.section.row_animation())
    }

    /// Appends a row.
    pub fn add_row(&self, row: Row<C>) {
        self.add_rows([row]);
    }

    /// Appends several rows as one batch.
    pub fn add_rows<I>(&self, rows: I)
    where
        I: IntoIterator<Item = Row<C>>,
    {
        let rows = self.adopt(rows);
        if rows.is_empty() {
            return;
        }

        let count = rows.len();
        let start = {
            let mut list = self.section.inner.rows.write();
            let start = list.len();
            for row in rows {
                row.set_section(Some(&self.section.inner));
                list.push(row);
            }
            start
        };

        let animation = self.animation();
        self.section.dispatch_rows(|section| {
            TableUpdate::insert_rows(IndexPath::range(section, start, count), animation)
        });
    }

    /// Inserts a row at `index`.
    ///
    /// # Errors
    ///
    /// [`TrellisError::IndexOutOfRange`] if `index > row_count()`.
    pub fn insert_row(&self, row: Row<C>, index: usize) -> Result<()> {
        self.insert_rows([row], index)
    }

    /// Inserts several rows starting at `index` as one batch.
    ///
    /// # Errors
    ///
    /// [`TrellisError::IndexOutOfRange`] if `index > row_count()`.
    pub fn insert_rows<I>(&self, rows: I, index: usize) -> Result<()>
    where
        I: IntoIterator<Item = Row<C>>,
    {
        let count = self.section.row_count();
        if index > count {
            return Err(TrellisError::IndexOutOfRange { index, count });
        }

        let rows = self.adopt(rows);
        if rows.is_empty() {
            return Ok(());
        }

        let inserted = rows.len();
        let index = {
            let mut list = self.section.inner.rows.write();
            // Adopting may have pulled rows out of this very section.
            let index = index.min(list.len());
            for row in &rows {
                row.set_section(Some(&self.section.inner));
            }
            list.splice(index..index, rows);
            index
        };

        let animation = self.animation();
        self.section.dispatch_rows(|section| {
            TableUpdate::insert_rows(IndexPath::range(section, index, inserted), animation)
        });
        Ok(())
    }

    /// Removes a row. Does nothing if the row is not a member.
    pub fn remove_row(&self, row: &Row<C>) {
        self.remove_rows(std::slice::from_ref(row));
    }

    /// Removes several rows as one batch, ignoring non-members.
    ///
    /// All target indices are resolved before anything is removed, so the
    /// order of `rows` does not matter.
    pub fn remove_rows(&self, rows: &[Row<C>]) {
        let (indices, removed) = {
            let mut list = self.section.inner.rows.write();
            let mut indices: Vec<usize> = rows
                .iter()
                .filter_map(|row| list.iter().position(|r| r.ptr_eq(row)))
                .collect();
            indices.sort_unstable();
            indices.dedup();

            let removed: Vec<Row<C>> = indices.iter().rev().map(|&i| list.remove(i)).collect();
            (indices, removed)
        };

        if indices.is_empty() {
            tracing::trace!(
                target: targets::SECTION,
                section = ?self.section.id(),
                "remove of non-member rows ignored"
            );
            return;
        }

        for row in &removed {
            row.set_section(None);
        }

        let animation = self.animation();
        self.section.dispatch_rows(|section| {
            let paths = indices.iter().map(|&row| IndexPath::new(section, row)).collect();
            TableUpdate::delete_rows(paths, animation)
        });
    }

    /// Removes every row as one batch.
    pub fn remove_all_rows(&self) {
        let _span = PerfSpan::new("remove_all_rows");
        let removed = std::mem::take(&mut *self.section.inner.rows.write());
        if removed.is_empty() {
            return;
        }

        for row in &removed {
            row.set_section(None);
        }

        let count = removed.len();
        let animation = self.animation();
        self.section.dispatch_rows(|section| {
            TableUpdate::delete_rows(IndexPath::range(section, 0, count), animation)
        });
    }

    /// Asks the widget to re-request the cells of member rows.
    pub fn reload_rows(&self, rows: &[Row<C>]) {
        let indices: Vec<usize> = rows
            .iter()
            .filter_map(|row| self.section.index_of(row))
            .collect();
        if indices.is_empty() {
            return;
        }

        let animation = self.animation();
        self.section.dispatch_rows(|section| {
            let paths = indices.iter().map(|&row| IndexPath::new(section, row)).collect();
            TableUpdate::reload_rows(paths, animation)
        });
    }

    /// Takes ownership of incoming rows: duplicates within the batch are
    /// dropped and rows owned by any section (this one included) are removed
    /// from it first.
    fn adopt<I>(&self, rows: I) -> Vec<Row<C>>
    where
        I: IntoIterator<Item = Row<C>>,
    {
        let mut adopted: Vec<Row<C>> = Vec::new();
        for row in rows {
            if adopted.iter().any(|r| r.ptr_eq(&row)) {
                continue;
            }
            if let Some(owner) = row.section() {
                tracing::debug!(
                    target: targets::SECTION,
                    row = ?row.id(),
                    from = ?owner.id(),
                    to = ?self.section.id(),
                    "moving row between sections"
                );
                owner.remove_row(&row);
            }
            adopted.push(row);
        }
        adopted
    }
}

/// Builder for a [`Section`] with metadata and initial rows.
///
/// # Example
///
/// ```
/// use trellis::model::{Row, RowAnimation, Section};
///
/// let section: Section<String> = Section::builder()
///     .header_title("Newsfeed")
///     .header_height(30.0)
///     .row_animation(RowAnimation::Top)
///     .row(Row::new("FeedCell"))
///     .row(Row::new("SpacerCell"))
///     .build();
///
/// assert_eq!(section.row_count(), 2);
/// assert_eq!(section.header_title().as_deref(), Some("Newsfeed"));
/// ```
pub struct SectionBuilder<C> {
    meta: SectionMeta<C>,
    rows: Vec<Row<C>>,
}

impl<C: 'static> Default for SectionBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> SectionBuilder<C> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            meta: SectionMeta::default(),
            rows: Vec::new(),
        }
    }

    /// Sets the header view.
    pub fn header_view(mut self, view: SupplementaryView<C>) -> Self {
        self.meta.header_view = Some(view);
        self
    }

    /// Sets the footer view.
    pub fn footer_view(mut self, view: SupplementaryView<C>) -> Self {
        self.meta.footer_view = Some(view);
        self
    }

    /// Sets the header height.
    pub fn header_height(mut self, height: f32) -> Self {
        self.meta.header_height = Some(height);
        self
    }

    /// Sets the footer height.
    pub fn footer_height(mut self, height: f32) -> Self {
        self.meta.footer_height = Some(height);
        self
    }

    /// Sets the header title.
    pub fn header_title(mut self, title: impl Into<String>) -> Self {
        self.meta.header_title = Some(title.into());
        self
    }

    /// Sets the footer title.
    pub fn footer_title(mut self, title: impl Into<String>) -> Self {
        self.meta.footer_title = Some(title.into());
        self
    }

    /// Sets the default row animation.
    pub fn row_animation(mut self, animation: RowAnimation) -> Self {
        self.meta.row_animation = animation;
        self.meta.row_animation_set = true;
        self
    }

    /// Appends an initial row.
    pub fn row(mut self, row: Row<C>) -> Self {
        self.rows.push(row);
        self
    }

    /// Appends several initial rows.
    pub fn rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = Row<C>>,
    {
        self.rows.extend(rows);
        self
    }

    /// Builds the section. The section is unbound, so no instruction is
    /// issued for the initial rows.
    pub fn build(self) -> Section<C> {
        let section = Section::new();
        *section.inner.meta.write() = self.meta;
        section.add_rows(self.rows);
        section
    }
}

static_assertions::assert_impl_all!(Section<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    type TestSection = Section<String>;

    fn rows(n: usize) -> Vec<Row<String>> {
        (0..n).map(|i| Row::new(format!("Cell{i}"))).collect()
    }

    #[test]
    fn test_add_rows_sets_back_reference() {
        let section = TestSection::new();
        let rows = rows(3);
        section.add_rows(rows.clone());

        assert_eq!(section.row_count(), 3);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(section.index_of(row), Some(i));
            assert!(row.section().is_some_and(|s| s.ptr_eq(&section)));
        }
    }

    #[test]
    fn test_insert_row_bounds() {
        let section = TestSection::new();
        section.add_rows(rows(2));

        let row = Row::new("Inserted");
        assert_eq!(
            section.insert_row(row.clone(), 3),
            Err(TrellisError::IndexOutOfRange { index: 3, count: 2 })
        );
        assert!(row.section().is_none());

        section.insert_row(row.clone(), 2).unwrap();
        assert_eq!(section.index_of(&row), Some(2));

        let first = Row::new("First");
        section.insert_row(first.clone(), 0).unwrap();
        assert_eq!(section.index_of(&first), Some(0));
        assert_eq!(section.index_of(&row), Some(3));
    }

    #[test]
    fn test_remove_non_member_is_noop() {
        let section = TestSection::new();
        section.add_rows(rows(2));
        let stranger = Row::new("Stranger");

        section.remove_row(&stranger);
        assert_eq!(section.row_count(), 2);
    }

    #[test]
    fn test_remove_rows_order_independent() {
        let a = TestSection::new();
        let b = TestSection::new();
        let rows_a = rows(4);
        let rows_b = rows(4);
        a.add_rows(rows_a.clone());
        b.add_rows(rows_b.clone());

        a.remove_rows(&[rows_a[0].clone(), rows_a[2].clone()]);
        b.remove_rows(&[rows_b[2].clone(), rows_b[0].clone()]);

        let names = |s: &TestSection| -> Vec<String> {
            s.rows().iter().map(|r| r.template_id().to_string()).collect()
        };
        assert_eq!(names(&a), names(&b));
        assert_eq!(names(&a), vec!["Cell1", "Cell3"]);
        assert!(rows_a[0].section().is_none());
        assert!(rows_a[2].section().is_none());
    }

    #[test]
    fn test_remove_all_rows_clears_back_references() {
        let section = TestSection::new();
        let rows = rows(3);
        section.add_rows(rows.clone());

        section.remove_all_rows();
        assert!(section.is_empty());
        assert!(rows.iter().all(|r| r.section().is_none()));
    }

    #[test]
    fn test_adding_owned_row_moves_it() {
        let from = TestSection::new();
        let to = TestSection::new();
        let row = Row::new("Cell");
        from.add_row(row.clone());

        to.add_row(row.clone());
        assert!(!from.contains(&row));
        assert!(to.contains(&row));
        assert!(row.section().is_some_and(|s| s.ptr_eq(&to)));
    }

    #[test]
    fn test_adding_row_twice_keeps_single_membership() {
        let section = TestSection::new();
        let row = Row::new("Cell");
        section.add_rows([row.clone(), row.clone()]);
        assert_eq!(section.row_count(), 1);

        section.add_row(row.clone());
        assert_eq!(section.row_count(), 1);
    }

    #[test]
    fn test_unbound_section_metadata() {
        let section = TestSection::new();
        section.set_header_title(Some("Test Section".into()));
        section.set_header_height(30.0);
        section.set_footer_view(Some(SupplementaryView::new("Footer")));

        assert_eq!(section.header_title().as_deref(), Some("Test Section"));
        assert_eq!(section.header_height(), Some(30.0));
        assert_eq!(
            section.footer_view().map(|v| v.template_id().to_string()),
            Some("Footer".to_string())
        );
        assert!(section.model_id().is_none());
        assert!(!section.is_attached());
        assert!(section.index().is_none());
    }

    #[test]
    fn test_row_animation_default_and_override() {
        let section = TestSection::new();
        assert_eq!(section.row_animation(), RowAnimation::Automatic);
        section.inherit_row_animation(RowAnimation::Bottom);
        assert_eq!(section.row_animation(), RowAnimation::Bottom);
        section.set_row_animation(RowAnimation::Right);
        section.inherit_row_animation(RowAnimation::Bottom);
        assert_eq!(section.row_animation(), RowAnimation::Right);
        assert_eq!(
            section.animated(RowAnimation::Left).animation(),
            RowAnimation::Left
        );
        assert_eq!(
            section.with_default_animation().animation(),
            RowAnimation::Right
        );
    }

    #[test]
    fn test_builder() {
        let section = TestSection::builder()
            .header_title("Header")
            .footer_title("Footer")
            .footer_height(12.0)
            .rows(rows(2))
            .build();

        assert_eq!(section.row_count(), 2);
        assert_eq!(section.footer_title().as_deref(), Some("Footer"));
        assert_eq!(section.footer_height(), Some(12.0));
        assert!(section.rows().iter().all(|r| r.section().is_some()));
    }
}

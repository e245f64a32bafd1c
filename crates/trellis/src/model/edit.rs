//! Edit actions offered by editable rows.

use std::sync::Arc;

use trellis_core::logging::targets;

use super::index::IndexPath;
use super::row::Row;

/// Visual style of an edit action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditActionStyle {
    /// A regular action.
    #[default]
    Normal,
    /// An action that removes or destroys content.
    Destructive,
}

type ActionHandler = Arc<dyn Fn(IndexPath) + Send + Sync>;

/// A titled action the widget shows when the user starts editing a row
/// (for example a swipe-to-reveal "Delete" button).
///
/// The widget activates an action with the index path it was shown for.
/// Handlers should not trust that path for structural changes: rows may have
/// moved since the action list was built. [`EditAction::delete`] resolves its
/// row through the row's live owning section instead.
#[derive(Clone)]
pub struct EditAction {
    title: String,
    style: EditActionStyle,
    handler: ActionHandler,
}

impl EditAction {
    /// Creates an action with a custom handler.
    pub fn new<F>(title: impl Into<String>, style: EditActionStyle, handler: F) -> Self
    where
        F: Fn(IndexPath) + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            style,
            handler: Arc::new(handler),
        }
    }

    /// Creates a destructive action that removes `row` from whatever section
    /// owns it at activation time.
    ///
    /// The action holds only a weak handle; activating it after the row was
    /// dropped or detached does nothing.
    pub fn delete<C: 'static>(title: impl Into<String>, row: &Row<C>) -> Self {
        let row = row.downgrade();
        Self::new(title, EditActionStyle::Destructive, move |_| {
            if let Some(row) = row.upgrade() {
                row.remove_from_section();
            }
        })
    }

    /// Returns the button title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the button style.
    pub fn style(&self) -> EditActionStyle {
        self.style
    }

    /// Runs the action's handler.
    pub fn activate(&self, path: IndexPath) {
        tracing::trace!(target: targets::ROW, title = %self.title, %path, "edit action activated");
        (self.handler)(path);
    }
}

impl std::fmt::Debug for EditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditAction")
            .field("title", &self.title)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

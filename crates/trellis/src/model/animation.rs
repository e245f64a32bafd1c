//! Animation hints for update instructions.

/// The visual transition a widget should use for an insert, delete or
/// reload instruction.
///
/// The binding layer never interprets the hint; it only picks which one to
/// attach. A per-call override wins over the section's (or model's) default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowAnimation {
    /// Cross-fade.
    Fade,
    /// Slide in from / out to the right.
    Right,
    /// Slide in from / out to the left.
    Left,
    /// Slide in from / out to the top.
    Top,
    /// Slide in from / out to the bottom.
    Bottom,
    /// No animation.
    None,
    /// Keep the content centered while the space expands or collapses.
    Middle,
    /// Let the widget pick an appropriate style.
    #[default]
    Automatic,
}

impl RowAnimation {
    /// Returns `true` if the widget should apply the update without a
    /// transition.
    pub fn is_none(&self) -> bool {
        matches!(self, RowAnimation::None)
    }

    /// Resolves an optional per-call override against a default.
    #[inline]
    pub fn or_default_to(override_animation: Option<RowAnimation>, default: RowAnimation) -> Self {
        override_animation.unwrap_or(default)
    }
}

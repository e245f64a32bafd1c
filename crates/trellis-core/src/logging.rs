//! Logging and debugging facilities for Trellis.
//!
//! This module provides:
//! - Target names for filtering `tracing` output per subsystem
//! - A small tree formatter used to dump models in a human-readable form
//! - A performance span guard for timing batch operations
//!
//! # Tracing Integration
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis::model=debug")
//!     .init();
//! ```

use std::fmt::{self, Write as FmtWrite};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Table model (section list and widget dispatch) target.
    pub const MODEL: &str = "trellis::model";
    /// Section row bookkeeping target.
    pub const SECTION: &str = "trellis::section";
    /// Row callbacks target.
    pub const ROW: &str = "trellis::row";
    /// Performance spans target.
    pub const PERF: &str = "trellis::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact dash-prefixed representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show identifiers.
    pub show_ids: bool,
    /// Whether to show per-node details (heights, titles, flags).
    pub show_details: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_details: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_details: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_details: false,
            ..Default::default()
        }
    }

    /// Sets the tree style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Limits traversal depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// One node of a debug tree.
///
/// Models build a `DebugNode` hierarchy describing themselves and hand it to
/// [`TreeDebug`] for formatting.
#[derive(Debug, Clone, Default)]
pub struct DebugNode {
    /// Primary label.
    pub label: String,
    /// Identifier, shown when [`TreeFormatOptions::show_ids`] is set.
    pub id: Option<String>,
    /// Extra `key=value` details, shown when
    /// [`TreeFormatOptions::show_details`] is set.
    pub details: Vec<(String, String)>,
    /// Child nodes in display order.
    pub children: Vec<DebugNode>,
}

impl DebugNode {
    /// Creates a leaf node with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl fmt::Debug) -> Self {
        self.id = Some(format!("{id:?}"));
        self
    }

    /// Adds a detail entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.details.push((key.into(), value.to_string()));
        self
    }

    /// Appends a child node.
    pub fn push_child(&mut self, child: DebugNode) {
        self.children.push(child);
    }
}

/// Formats [`DebugNode`] trees.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the tree rooted at `root`.
    pub fn format(&self, root: &DebugNode) -> String {
        let mut output = String::new();
        self.format_into(root, 0, true, &mut output);
        output
    }

    fn format_into(&self, node: &DebugNode, depth: usize, is_last: bool, output: &mut String) {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return;
            }
        }

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&node.label);

        if self.options.show_ids {
            if let Some(id) = &node.id {
                let _ = write!(output, " [{id}]");
            }
        }

        if self.options.show_details && !node.details.is_empty() {
            let details: Vec<String> = node
                .details
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            let _ = write!(output, " ({})", details.join(", "));
        }

        output.push('\n');

        let child_count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.format_into(child, depth + 1, i + 1 == child_count, output);
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time batch operations such as clearing a whole section.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DebugNode {
        let mut root = DebugNode::new("model").with_id(1u64);
        let mut section = DebugNode::new("section 0").with_detail("rows", 2);
        section.push_child(DebugNode::new("row FeedCell"));
        section.push_child(DebugNode::new("row SpacerCell"));
        root.push_child(section);
        root.push_child(DebugNode::new("section 1"));
        root
    }

    #[test]
    fn test_tree_format_hierarchy() {
        let output = TreeDebug::new().format(&sample_tree());

        assert!(output.starts_with("model [1]\n"));
        assert!(output.contains("FeedCell"));
        assert!(output.contains("SpacerCell"));
        assert!(output.contains("\u{2514}\u{2500}\u{2500} section 1"));
    }

    #[test]
    fn test_tree_format_minimal() {
        let output = TreeDebug::with_options(TreeFormatOptions::minimal()).format(&sample_tree());

        assert!(output.starts_with("model\n"));
        assert!(!output.contains('['));
        assert!(!output.contains("rows="));
    }

    #[test]
    fn test_tree_format_details_and_depth() {
        let options = TreeFormatOptions::detailed()
            .with_style(TreeStyle::Ascii)
            .with_max_depth(1);
        let output = TreeDebug::with_options(options).format(&sample_tree());

        assert!(output.contains("+-- section 0 (rows=2)"));
        assert!(output.contains("`-- section 1"));
        assert!(!output.contains("FeedCell"));
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}

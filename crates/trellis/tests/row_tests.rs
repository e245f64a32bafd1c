//! Tests for row configuration, heights, selection and editing as seen by
//! the widget.

mod support;

use std::sync::Arc;

use parking_lot::Mutex;
use support::{MockCell, TEMPLATE_HEIGHT, laid_out_height, model};
use trellis::model::{
    EditAction, EditActionStyle, IndexPath, Row, RowAnimation, RowHeight, Section, TableUpdate,
    TableWidget,
};

const FIRST: IndexPath = IndexPath::new(0, 0);

fn bound_row(
    row: Row<MockCell>,
) -> (Arc<support::MockTable>, support::MockModel, Section<MockCell>) {
    let (table, model) = model();
    let section = Section::new();
    section.add_row(row);
    model.add_section(section.clone());
    table.take_updates();
    (table, model, section)
}

// ============================================================================
// Cell configuration
// ============================================================================

#[test]
fn test_configure_cell_before_adding() {
    let row = Row::new("TextCell");
    row.configure_cell(|cell: &mut MockCell| cell.text = "configured early".into());
    let (table, model, _section) = bound_row(row);

    let cell = model.cell_for(FIRST).unwrap();
    assert_eq!(cell.template_id, "TextCell");
    assert_eq!(cell.path, Some(FIRST));
    assert_eq!(cell.text, "configured early");
    assert_eq!(table.dequeued(), 1);
}

#[test]
fn test_configure_cell_after_adding() {
    let row = Row::new("TextCell");
    let (table, model, _section) = bound_row(row.clone());

    row.configure_cell(|cell: &mut MockCell| cell.text = "configured late".into());

    assert_eq!(model.cell_for(FIRST).unwrap().text, "configured late");
    // Registering a configurator is not a structural change.
    assert!(table.updates().is_empty());
}

#[test]
fn test_cell_without_configurator_is_left_alone() {
    let (_table, model, _section) = bound_row(Row::new("Plain"));

    let cell = model.cell_for(FIRST).unwrap();
    assert_eq!(cell.text, "");
    assert!(model.cell_for(IndexPath::new(0, 1)).is_none());
    assert!(model.cell_for(IndexPath::new(3, 0)).is_none());
}

#[test]
fn test_configurator_can_size_its_row() {
    let row = Row::new("FeedCell");
    let weak = row.downgrade();
    row.configure_cell(move |cell: &mut MockCell| {
        cell.height = 150.0;
        if let Some(row) = weak.upgrade() {
            row.set_height(cell.height);
        }
    });
    let (_table, model, _section) = bound_row(row.clone());

    assert_eq!(laid_out_height(&model, FIRST), Some(TEMPLATE_HEIGHT));
    model.cell_for(FIRST);
    assert_eq!(laid_out_height(&model, FIRST), Some(150.0));
}

// ============================================================================
// Heights
// ============================================================================

#[test]
fn test_height_defaults_to_template() {
    let (_table, model, _section) = bound_row(Row::new("FeedCell"));

    assert_eq!(model.height_for(FIRST), Some(RowHeight::Automatic));
    assert_eq!(laid_out_height(&model, FIRST), Some(TEMPLATE_HEIGHT));
    assert_eq!(model.height_for(IndexPath::new(0, 1)), None);
}

#[test]
fn test_explicit_height() {
    let (_table, model, _section) = bound_row(Row::new("FeedCell").with_height(120.0));
    assert_eq!(laid_out_height(&model, FIRST), Some(120.0));
}

#[test]
fn test_height_provider_wins() {
    let row = Row::new("FeedCell").with_height(120.0);
    row.configure_height(|| 90.0);
    let (_table, model, _section) = bound_row(row.clone());

    assert_eq!(laid_out_height(&model, FIRST), Some(90.0));

    row.clear_height_provider();
    assert_eq!(laid_out_height(&model, FIRST), Some(120.0));
}

#[test]
fn test_variable_row_heights() {
    let (_table, model) = model();
    let section = Section::new();
    model.add_section(section.clone());

    let rows: Vec<Row<MockCell>> = (101..120)
        .map(|height| Row::new("VariableCell").with_height(height as f32))
        .collect();
    section.add_rows(rows.clone());

    for (index, height) in (101..120).enumerate() {
        let path = IndexPath::new(0, index);
        assert_eq!(laid_out_height(&model, path), Some(height as f32));
    }

    section.remove_rows(&[rows[1].clone(), rows[3].clone()]);
    assert_eq!(laid_out_height(&model, IndexPath::new(0, 1)), Some(103.0));
    assert_eq!(laid_out_height(&model, IndexPath::new(0, 2)), Some(105.0));

    section
        .insert_row(Row::new("VariableCell").with_height(200.0), 1)
        .unwrap();
    assert_eq!(laid_out_height(&model, IndexPath::new(0, 1)), Some(200.0));
    assert_eq!(laid_out_height(&model, IndexPath::new(0, 2)), Some(103.0));
    assert_eq!(model.total_row_count(), 18);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_runs_handler_and_deselects() {
    let selected = Arc::new(Mutex::new(Vec::new()));
    let row = Row::new("Cell");
    let seen = selected.clone();
    row.on_select(move |row| seen.lock().push(row.index_path()));
    let (table, model, _section) = bound_row(row);

    table.select(FIRST);
    model.did_select(FIRST);

    assert_eq!(*selected.lock(), vec![Some(FIRST)]);
    assert_eq!(table.selected_index_path(), None);
}

#[test]
fn test_select_can_keep_selection() {
    let row = Row::new("Cell").with_deselect_after_selection(false);
    let (table, model, _section) = bound_row(row);

    table.select(FIRST);
    model.did_select(FIRST);

    assert_eq!(table.selected_index_path(), Some(FIRST));
}

#[test]
fn test_select_without_handler_still_notifies() {
    let (table, model, _section) = bound_row(Row::new("Cell"));
    let notified = Arc::new(Mutex::new(Vec::new()));
    let sink = notified.clone();
    model
        .signals()
        .row_selected
        .connect(move |path| sink.lock().push(*path));

    table.select(FIRST);
    model.did_select(FIRST);
    model.did_select(IndexPath::new(4, 4));

    assert_eq!(*notified.lock(), vec![FIRST]);
}

#[test]
fn test_select_handler_may_remove_its_row() {
    let (table, model) = model();
    let section = Section::new();
    model.add_section(section.clone());
    let row = Row::new("Dismissible");
    row.on_select(|row| row.remove_from_section());
    section.add_rows([Row::new("Keep"), row.clone()]);
    table.take_updates();

    let path = row.index_path().unwrap();
    table.select(path);
    model.did_select(path);

    assert_eq!(
        table.take_updates(),
        vec![TableUpdate::DeleteRows {
            paths: vec![path],
            animation: RowAnimation::Automatic,
        }]
    );
    assert!(row.section().is_none());
    assert_eq!(table.counts(), vec![1]);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_edit_actions_require_editable_row() {
    let row = Row::new("Cell");
    let weak = row.downgrade();
    row.set_edit_actions(move || {
        weak.upgrade()
            .map(|row| vec![EditAction::delete("Delete", &row)])
            .unwrap_or_default()
    });
    let (_table, model, _section) = bound_row(row.clone());

    assert!(!model.can_edit(FIRST));
    assert!(model.edit_actions_for(FIRST).is_empty());

    row.set_editable(true);
    assert!(model.can_edit(FIRST));
    let actions = model.edit_actions_for(FIRST);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].title(), "Delete");
    assert_eq!(actions[0].style(), EditActionStyle::Destructive);
}

#[test]
fn test_delete_action_removes_row_through_live_section() {
    let (table, model) = model();
    let section = Section::new();
    model.add_section(section.clone());

    let rows: Vec<Row<MockCell>> = (0..3).map(|_| Row::new("Cell").with_editable(true)).collect();
    for row in &rows {
        let weak = row.downgrade();
        row.set_edit_actions(move || {
            weak.upgrade()
                .map(|row| vec![EditAction::delete("Delete", &row)])
                .unwrap_or_default()
        });
    }
    section.add_rows(rows.clone());
    table.take_updates();

    let stale = IndexPath::new(0, 2);
    let actions = model.edit_actions_for(stale);
    section.remove_row(&rows[0]);
    table.take_updates();

    actions[0].activate(stale);

    assert_eq!(
        table.take_updates(),
        vec![TableUpdate::DeleteRows {
            paths: vec![IndexPath::new(0, 1)],
            animation: RowAnimation::Automatic,
        }]
    );
    assert!(rows[2].section().is_none());
    assert!(section.contains(&rows[1]));
}

#[test]
fn test_commit_delete() {
    let (table, model) = model();
    let section = Section::new();
    model.add_section(section.clone());
    section.set_row_animation(RowAnimation::Left);
    section.add_rows([Row::new("A"), Row::new("B")]);
    table.take_updates();

    model.commit_delete(IndexPath::new(0, 0));
    model.commit_delete(IndexPath::new(0, 5));

    assert_eq!(
        table.take_updates(),
        vec![TableUpdate::DeleteRows {
            paths: vec![IndexPath::new(0, 0)],
            animation: RowAnimation::Left,
        }]
    );
    assert_eq!(section.row(0).map(|r| r.template_id().to_string()), Some("B".into()));
}

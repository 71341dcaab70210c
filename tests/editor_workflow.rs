use curvedit::config::EditorConfig;
use curvedit::edit::{EditState, PressOutcome};
use curvedit::editor::{CurveEditor, ResetOutcome, SaveOutcome};
use curvedit::geometry::{DataPoint, ScreenPoint};
use curvedit::series::LoadStatus;
use curvedit::transform::{AxisScale, AxisTransform, PlotTransform};
use curvedit::CurveError;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

// One data unit is 10 px on both axes; Y grows upwards.
fn transform() -> PlotTransform {
    PlotTransform {
        x: AxisTransform::new(AxisScale::Linear, (0.0, 100.0), (0.0, 1000.0)),
        y: AxisTransform::new(AxisScale::Linear, (0.0, 100.0), (1000.0, 0.0)),
    }
}

fn ys(editor: &CurveEditor, id: curvedit::SeriesId) -> Vec<f64> {
    editor
        .store()
        .get(id)
        .expect("series")
        .coordinates()
        .iter()
        .map(|p| p.y)
        .collect()
}

#[test]
fn edit_undo_across_series_and_save() {
    let a = csv("time;label;value\r\n1;first;10\r\n2;second;20\r\n");
    let b = csv("5;50\n6;60\n");
    let dir = tempdir().expect("temp dir");
    let out = dir.path().join("a-edited.csv");

    let mut editor = CurveEditor::new(EditorConfig {
        delimiter: ';',
        ..EditorConfig::default()
    });
    let first = editor.load_series(a.path(), 0, 2).expect("loaded");
    let second = editor.load_series(b.path(), 0, 1).expect("loaded");
    let t = transform();

    editor.enable_drag_mode();
    assert_eq!(
        editor.pointer_down(first, ScreenPoint::new(20.0, 800.0), &t),
        PressOutcome::Grabbed(1)
    );
    editor.pointer_move(Some(first), ScreenPoint::new(25.0, 750.0), &t);
    editor.pointer_move(Some(first), ScreenPoint::new(30.0, 700.0), &t);
    editor.pointer_up();
    assert_eq!(ys(&editor, first), vec![10.0, 30.0]);

    assert!(editor.set_point_y(second, 0, 55.0));
    assert_eq!(editor.history().undo_len(), 2);

    // Undo walks back through both series in reverse order.
    assert_eq!(editor.undo(), Some(second));
    assert_eq!(ys(&editor, second), vec![50.0, 60.0]);
    assert_eq!(editor.undo(), Some(first));
    assert_eq!(ys(&editor, first), vec![10.0, 20.0]);
    assert_eq!(editor.undo(), None);
    assert_eq!(editor.redo(), Some(first));
    assert_eq!(ys(&editor, first), vec![10.0, 30.0]);

    let outcome = editor.save_series(first, &out).expect("saved");
    assert_eq!(outcome, SaveOutcome::Saved { rows: 2 });
    assert_eq!(
        std::fs::read_to_string(&out).expect("read"),
        "time;label;value\n1;first;10\n2;second;30\n"
    );
    assert!(!editor.store().get(first).expect("series").is_modified());
    assert_eq!(
        editor.save_series(first, &out).expect("second save"),
        SaveOutcome::NotModified
    );
}

#[test]
fn reset_restores_source_values() {
    let file = csv("x,y\n1,2\n3,4\n");
    let mut editor = CurveEditor::default();
    let id = editor.load_series(file.path(), 0, 1).expect("loaded");

    editor.set_point_y(id, 0, 100.0);
    editor.set_point_y(id, 1, 200.0);
    let outcome = editor.reset_series(id).expect("reset");
    let ResetOutcome::Reset(stats) = outcome else {
        panic!("expected a reset, got {outcome:?}");
    };
    assert_eq!(stats.data_rows, 2);
    assert_eq!(ys(&editor, id), vec![2.0, 4.0]);
    assert_eq!(editor.history_availability(), (false, false));
}

#[test]
fn history_depth_is_bounded() {
    let file = csv("1,1\n");
    let mut editor = CurveEditor::new(EditorConfig {
        history_depth: 3,
        ..EditorConfig::default()
    });
    let id = editor.load_series(file.path(), 0, 1).expect("loaded");

    for value in 2..=6 {
        editor.set_point_y(id, 0, f64::from(value));
    }
    assert_eq!(editor.history().undo_len(), 3);

    while editor.undo().is_some() {}
    // The two oldest snapshots (1 and 2) were dropped.
    assert_eq!(ys(&editor, id), vec![3.0]);
}

#[test]
fn unreadable_source_gives_empty_series() {
    let mut editor = CurveEditor::default();
    let err = editor
        .load_series("/no/such/dir/data.csv", 0, 1)
        .expect_err("unreadable");
    assert!(err.is_io());
    let CurveError::SeriesLoad { id, .. } = err else {
        panic!("unexpected error: {err}");
    };

    let series = editor.store().get(id).expect("series kept");
    assert!(series.is_empty());
    assert!(matches!(series.load_status(), LoadStatus::Failed(_)));
    assert!(matches!(
        editor.reset_series(id),
        Ok(ResetOutcome::NotModified)
    ));
}

#[test]
fn removing_dragged_series_returns_to_armed() {
    let a = csv("10,10\n");
    let mut editor = CurveEditor::default();
    let id = editor.load_series(a.path(), 0, 1).expect("loaded");
    let t = transform();

    editor.enable_drag_mode();
    editor.pointer_down(id, ScreenPoint::new(100.0, 900.0), &t);
    assert!(editor.session().is_dragging());

    editor.remove_series(id).expect("removed");
    assert_eq!(editor.session().state(), EditState::Armed);
    assert!(!editor.history().can_undo());
    assert!(editor.store().is_empty());
}

#[test]
fn drag_keeps_x_fixed() {
    let file = csv("10,10\n20,20\n");
    let mut editor = CurveEditor::default();
    let id = editor.load_series(file.path(), 0, 1).expect("loaded");
    let t = transform();

    editor.enable_drag_mode();
    editor.pointer_down(id, ScreenPoint::new(100.0, 900.0), &t);
    editor.pointer_move(Some(id), ScreenPoint::new(600.0, 400.0), &t);
    editor.pointer_up();

    assert_eq!(
        editor.store().get(id).expect("series").coordinates(),
        &[DataPoint::new(10.0, 60.0), DataPoint::new(20.0, 20.0)]
    );
}

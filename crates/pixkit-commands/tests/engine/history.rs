use pixkit_commands::edits::{
    offset_objects_command, resize_command, set_raster_selection_command, AddObjectCommand,
};
use pixkit_commands::{CommandContext, HistoryConfig};
use pixkit_core::{Color, Error, Frame, IntRect, IntSize, Point, SelectionState, Size, VectorObject};

use crate::common::{editor, editor_with, paint, pixel, BLUE, GREEN, RED};

#[test]
fn test_empty_history() {
    let mut ed = editor(4, 4);
    assert!(!ed.can_undo());
    assert!(!ed.can_redo());
    assert!(ed.undo().is_none());
    assert!(ed.redo().is_none());
    assert_eq!(ed.undo_name(), None);
    assert_eq!(ed.history().undo_depth(), 0);
}

#[test]
fn test_raster_undo_replays_earlier_commands() {
    let mut ed = editor(4, 4);
    ed.run_command(paint(0, 0, RED));
    ed.run_command(paint(1, 0, BLUE));

    ed.undo();
    assert_eq!(pixel(&ed, 0, 0), RED);
    assert_eq!(pixel(&ed, 1, 0), Color::WHITE);

    ed.undo();
    assert_eq!(pixel(&ed, 0, 0), Color::WHITE);

    ed.redo();
    ed.redo();
    assert_eq!(pixel(&ed, 0, 0), RED);
    assert_eq!(pixel(&ed, 1, 0), BLUE);
}

#[test]
fn test_original_stored_on_first_raster_command_only() {
    let mut ed = editor(2, 2);
    let obj = VectorObject::rectangle(Point::default(), Size::new(1.0, 1.0), Color::BLACK);
    ed.run_command(Box::new(AddObjectCommand::new(obj)));
    assert!(!ed.document().active_frame().has_stored_original());

    ed.run_command(paint(0, 0, RED));
    ed.run_command(paint(1, 1, RED));
    let original = ed.document().active_frame().original().expect("original stored");
    assert_eq!(original.get(pixkit_core::IntPoint::new(0, 0)), Some(Color::WHITE));
}

#[test]
fn test_new_command_clears_redo() {
    let mut ed = editor(4, 4);
    ed.run_command(paint(0, 0, RED));
    ed.undo();
    assert!(ed.can_redo());
    ed.run_command(paint(1, 1, GREEN));
    assert!(!ed.can_redo());
    assert_eq!(pixel(&ed, 0, 0), Color::WHITE);
}

#[test]
fn test_object_undo_is_exact() {
    let mut ed = editor(10, 10);
    let obj = VectorObject::rectangle(Point::new(1.0, 1.0), Size::new(2.0, 2.0), Color::BLACK);
    let id = obj.id();
    let before = obj.points.clone();
    ed.run_command(Box::new(AddObjectCommand::new(obj)));

    let offset = {
        let obj = ed.document().active_frame().object(id).expect("added");
        offset_objects_command(&[obj], Point::new(3.0, 0.0))
    };
    ed.run_command(offset);
    let moved = &ed.document().active_frame().object(id).expect("object").points;
    assert_eq!(moved[0], Point::new(4.0, 1.0));

    ed.undo();
    assert_eq!(ed.document().active_frame().object(id).expect("object").points, before);
    ed.undo();
    assert!(ed.document().active_frame().object(id).is_none());
    ed.redo();
    assert!(ed.document().active_frame().object(id).is_some());
}

#[test]
fn test_group_bracket_undoes_and_redoes_as_one() {
    let mut ed = editor(4, 4);
    ed.open_undo_bundle();
    ed.run_command(paint(0, 0, RED));
    ed.run_command(paint(3, 3, BLUE));
    ed.close_undo_bundle(Some("Batch Edit".to_string()));

    assert_eq!(ed.history().undo_depth(), 1);
    assert_eq!(ed.undo_name().as_deref(), Some("Batch Edit"));

    ed.undo();
    assert_eq!(pixel(&ed, 0, 0), Color::WHITE);
    assert_eq!(pixel(&ed, 3, 3), Color::WHITE);
    assert!(!ed.can_undo());
    assert_eq!(ed.redo_name().as_deref(), Some("Batch Edit"));

    ed.redo();
    assert_eq!(pixel(&ed, 0, 0), RED);
    assert_eq!(pixel(&ed, 3, 3), BLUE);
    assert!(!ed.can_redo());
    assert_eq!(ed.history().undo_depth(), 1);
}

#[test]
fn test_unnamed_group_counts_commands() {
    let mut ed = editor(4, 4);
    ed.open_undo_bundle();
    ed.run_command(paint(0, 0, RED));
    ed.run_command(paint(1, 0, RED));
    ed.run_command(paint(2, 0, RED));
    ed.close_undo_bundle(None);
    assert_eq!(ed.undo_name().as_deref(), Some("Grouped Commands (3)"));
    ed.undo();
    assert_eq!(ed.redo_name().as_deref(), Some("Grouped Commands (3)"));
}

#[test]
fn test_empty_bundle_leaves_no_trace() {
    let mut ed = editor(4, 4);
    ed.open_undo_bundle();
    assert!(!ed.can_undo());
    ed.close_undo_bundle(Some("Nothing".to_string()));
    assert!(ed.history().is_empty());
}

#[test]
fn test_single_command_bundle_is_unwrapped() {
    let mut ed = editor(4, 4);
    ed.open_undo_bundle();
    ed.run_command(paint(0, 0, RED));
    ed.close_undo_bundle(Some("Batch Edit".to_string()));
    assert_eq!(ed.history().len(), 1);
    assert_eq!(ed.undo_name().as_deref(), Some("Paint"));
}

#[test]
#[should_panic(expected = "no undo bundle")]
fn test_close_without_open_panics() {
    let mut ed = editor(4, 4);
    ed.close_undo_bundle(None);
}

#[test]
fn test_commands_on_other_frames_are_isolated() {
    let mut ed = editor(4, 4);
    let second = ed
        .document_mut()
        .add_frame(Frame::with_size(IntSize::new(4, 4), Color::WHITE));

    ed.run_command(paint(0, 0, RED));
    ed.run_command_on(paint(0, 0, BLUE), second).expect("known frame");
    assert_eq!(ed.undo_name().as_deref(), Some("Paint (Frame: 2)"));

    ed.undo();
    let frame = ed.document().frame(second).expect("second frame");
    assert_eq!(frame.bitmap().get(pixkit_core::IntPoint::new(0, 0)), Some(Color::WHITE));
    assert_eq!(pixel(&ed, 0, 0), RED);
    assert_eq!(ed.undo_name().as_deref(), Some("Paint"));
}

#[test]
fn test_run_on_unknown_frame_fails() {
    let mut ed = editor(4, 4);
    let stray = Frame::with_size(IntSize::new(1, 1), Color::WHITE).id();
    let result = ed.run_command_on(paint(0, 0, RED), stray);
    assert!(matches!(result, Err(Error::UnknownFrame(_))));
    assert!(ed.history().is_empty());
}

#[test]
fn test_size_change_clips_selection_and_moves_anchor() {
    let mut ed = editor(20, 20);
    ed.run_command(set_raster_selection_command(
        SelectionState::Rectangle(IntRect::new(5, 5, 10, 10)),
        SelectionState::Empty,
        "Select Rectangle",
    ));
    ed.set_view_anchor(Point::new(10.0, 10.0));

    let resize = resize_command(IntRect::new(2, 3, 8, 8), Color::WHITE).expect("non-empty");
    let outcome = ed.run_command(resize);
    assert!(outcome.size_changed);
    assert_eq!(ed.document().image_size(), IntSize::new(8, 8));
    assert_eq!(ed.view_anchor(), Point::new(8.0, 7.0));
    assert_eq!(
        ed.document().active_frame().selection().rect(),
        Some(IntRect::new(3, 2, 5, 6))
    );

    ed.undo();
    assert_eq!(ed.document().image_size(), IntSize::new(20, 20));
    assert_eq!(ed.view_anchor(), Point::new(10.0, 10.0));
}

#[test]
fn test_anchor_follows_each_resize_in_a_bundle() {
    let mut ed = editor(20, 20);
    ed.set_view_anchor(Point::new(10.0, 10.0));

    ed.open_undo_bundle();
    ed.run_command(resize_command(IntRect::new(2, 3, 16, 16), Color::WHITE).expect("non-empty"));
    ed.run_command(paint(0, 0, RED));
    ed.run_command(resize_command(IntRect::new(1, 1, 8, 8), Color::WHITE).expect("non-empty"));
    ed.close_undo_bundle(Some("Crop Twice".to_string()));
    assert_eq!(ed.view_anchor(), Point::new(7.0, 6.0));

    let outcome = ed.undo().expect("bundle undone");
    assert!(outcome.size_changed);
    assert_eq!(ed.document().image_size(), IntSize::new(20, 20));
    assert_eq!(ed.view_anchor(), Point::new(10.0, 10.0));

    ed.redo();
    assert_eq!(ed.document().image_size(), IntSize::new(8, 8));
    assert_eq!(ed.view_anchor(), Point::new(7.0, 6.0));
}

#[test]
fn test_undo_limit_bakes_evicted_raster_effects() {
    let config = HistoryConfig {
        undo_limit: 2,
        merge_commands: true,
    };
    let mut ed = editor_with(4, 4, config);
    ed.run_command(paint(0, 0, RED));
    ed.run_command(paint(1, 0, GREEN));
    ed.run_command(paint(2, 0, BLUE));
    assert_eq!(ed.history().undo_depth(), 2);

    ed.undo();
    ed.undo();
    assert!(!ed.can_undo());
    assert_eq!(pixel(&ed, 0, 0), RED);
    assert_eq!(pixel(&ed, 1, 0), Color::WHITE);
    assert_eq!(pixel(&ed, 2, 0), Color::WHITE);
}

#[test]
fn test_dirty_tracking_ignores_selection_changes() {
    let mut ed = editor(8, 8);
    assert!(!ed.is_dirty());
    ed.run_command(paint(0, 0, RED));
    assert!(ed.is_dirty());
    ed.mark_saved();
    assert!(!ed.is_dirty());

    ed.run_command(set_raster_selection_command(
        SelectionState::Rectangle(IntRect::new(0, 0, 2, 2)),
        SelectionState::Empty,
        "Select Rectangle",
    ));
    assert!(!ed.is_dirty());
    ed.undo();
    assert!(!ed.is_dirty());
    ed.undo();
    assert!(ed.is_dirty());
}

#[test]
fn test_merge_into_saved_command_stays_clean() {
    use pixkit_commands::edits::MovePointCommand;

    let mut ed = editor(20, 20);
    let obj = VectorObject::polygon(
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
        Color::BLACK,
    );
    ed.run_command(Box::new(AddObjectCommand::new(obj.clone())));
    ed.run_command(Box::new(MovePointCommand::new(&obj, 0, Point::new(1.0, 1.0))));
    ed.mark_saved();

    let outcome = ed.run_command(Box::new(MovePointCommand::new(&obj, 0, Point::new(2.0, 2.0))));
    assert!(outcome.merged);
    assert!(!ed.is_dirty());
}

#[test]
fn test_merging_can_be_disabled() {
    use pixkit_commands::edits::move_raster_selection_command;
    use pixkit_core::IntPoint;

    let config = HistoryConfig {
        undo_limit: 0,
        merge_commands: false,
    };
    let mut ed = editor_with(8, 8, config);
    ed.run_command(move_raster_selection_command(IntPoint::new(1, 1), IntPoint::new(0, 0)));
    ed.run_command(move_raster_selection_command(IntPoint::new(2, 2), IntPoint::new(1, 1)));
    assert_eq!(ed.history().len(), 2);
}

use std::cell::Cell;
use std::rc::Rc;

use pixkit_commands::edits::{
    appending_insert_point_command, move_raster_selection_command, offset_objects_command,
    set_raster_selection_appending, AddObjectCommand, MovePointCommand,
};
use pixkit_commands::{
    command_bunch, perhaps_bunched, AppendWhile, AsAny, Command, CommandType, Document, OldCommand,
};
use pixkit_core::{
    Bitmap, Color, Frame, IntPoint, IntRect, IntSize, Point, SelectionState, Size, VectorObject,
};

use crate::common::{editor, paint, pixel, recorder, Log, RED};

#[test]
fn test_perhaps_bunched_returns_single_command() {
    let cmd = paint(0, 0, RED);
    let id = cmd.id();
    let result = perhaps_bunched("Paint", vec![cmd]);
    assert_eq!(result.id(), id);
    assert!(result.as_ref().as_any().downcast_ref::<pixkit_commands::CommandBunch>().is_none());
}

#[test]
fn test_perhaps_bunched_wraps_several() {
    let result = perhaps_bunched("Two", vec![paint(0, 0, RED), paint(1, 1, RED)]);
    assert_eq!(result.name(), "Two");
    assert_eq!(result.command_type(), CommandType::Raster);
}

#[test]
#[should_panic(expected = "at least one command")]
fn test_empty_bunch_panics() {
    command_bunch("Empty", Vec::new(), None);
}

#[test]
fn test_bunch_executes_in_order_and_undoes_in_reverse() {
    let log = Log::default();
    let mut doc = Document::new(IntSize::new(2, 2), Color::WHITE).expect("document");
    let mut bunch = command_bunch(
        "Recorded",
        vec![recorder("a", &log), recorder("b", &log), recorder("c", &log)],
        None,
    );
    bunch.execute(&mut doc);
    bunch.undo(&mut doc);
    assert_eq!(
        *log.borrow(),
        ["do a", "do b", "do c", "undo c", "undo b", "undo a"]
    );
}

#[test]
fn test_bunch_name_falls_back_to_last_child() {
    let log = Log::default();
    let bunch = command_bunch("", vec![recorder("first", &log), recorder("last", &log)], None);
    assert_eq!(bunch.name(), "last");
}

#[test]
fn test_brush_stroke_collapses_into_one_step() {
    let mut ed = editor(8, 8);
    let dragging = Rc::new(Cell::new(true));
    ed.run_command(command_bunch(
        "Brush",
        vec![paint(0, 0, RED)],
        Some(Box::new(AppendWhile::new(Rc::clone(&dragging)))),
    ));
    ed.run_command(paint(1, 0, RED));
    ed.run_command(paint(2, 0, RED));
    assert_eq!(ed.history().len(), 1);
    assert_eq!(ed.undo_name().as_deref(), Some("Brush"));

    dragging.set(false);
    ed.run_command(paint(5, 5, RED));
    assert_eq!(ed.history().len(), 2);

    ed.undo();
    ed.undo();
    for x in 0..3 {
        assert_eq!(pixel(&ed, x, 0), Color::WHITE);
    }
    assert!(!ed.can_undo());
}

#[test]
fn test_stroke_absorbing_object_command_undoes_it() {
    let mut ed = editor(8, 8);
    let dragging = Rc::new(Cell::new(true));
    ed.run_command(command_bunch(
        "Brush",
        vec![paint(0, 0, RED)],
        Some(Box::new(AppendWhile::new(Rc::clone(&dragging)))),
    ));
    let obj = VectorObject::rectangle(Point::new(1.0, 1.0), Size::new(2.0, 2.0), Color::BLACK);
    let id = obj.id();
    ed.run_command(Box::new(AddObjectCommand::new(obj)));
    assert_eq!(ed.history().len(), 1);
    let stroke = ed.history().next_undo_command().expect("stroke on top");
    assert_eq!(stroke.command_type(), CommandType::Hybrid);

    ed.undo();
    assert!(ed.document().active_frame().object(id).is_none());
    assert_eq!(pixel(&ed, 0, 0), Color::WHITE);

    ed.redo();
    assert!(ed.document().active_frame().object(id).is_some());
    assert_eq!(pixel(&ed, 0, 0), RED);
}

#[test]
fn test_insert_point_absorbs_one_move() {
    let mut ed = editor(20, 20);
    let obj = VectorObject::polygon(
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
        Color::BLACK,
    );
    let id = obj.id();
    ed.run_command(Box::new(AddObjectCommand::new(obj.clone())));

    ed.run_command(appending_insert_point_command(&obj, 1, Point::new(5.0, 0.0)));
    let inserted = ed.document().active_frame().object(id).expect("object").clone();
    ed.run_command(Box::new(MovePointCommand::new(&inserted, 1, Point::new(5.0, -3.0))));
    assert_eq!(ed.history().len(), 2);

    let moved = ed.document().active_frame().object(id).expect("object").clone();
    ed.run_command(Box::new(MovePointCommand::new(&moved, 0, Point::new(1.0, 1.0))));
    assert_eq!(ed.history().len(), 3);

    ed.undo();
    ed.undo();
    assert_eq!(ed.document().active_frame().object(id).expect("object").points, obj.points);
}

#[test]
fn test_repeated_offsets_of_same_objects_merge() {
    let mut ed = editor(20, 20);
    let a = VectorObject::polygon(vec![Point::new(1.0, 1.0)], Color::BLACK);
    let b = VectorObject::polygon(vec![Point::new(5.0, 5.0)], Color::BLACK);
    let (a_id, b_id) = (a.id(), b.id());
    ed.run_command(Box::new(AddObjectCommand::new(a)));
    ed.run_command(Box::new(AddObjectCommand::new(b)));

    let nudge = |ed: &pixkit_commands::Editor, ids: &[pixkit_core::ObjectId]| {
        let frame = ed.document().active_frame();
        let objects: Vec<&VectorObject> = ids.iter().filter_map(|id| frame.object(*id)).collect();
        offset_objects_command(&objects, Point::new(1.0, 0.0))
    };

    let cmd = nudge(&ed, &[a_id, b_id]);
    ed.run_command(cmd);
    let cmd = nudge(&ed, &[a_id, b_id]);
    ed.run_command(cmd);
    assert_eq!(ed.history().len(), 3);
    assert_eq!(ed.undo_name().as_deref(), Some("Offset 2 Polygons"));

    let cmd = nudge(&ed, &[a_id]);
    ed.run_command(cmd);
    assert_eq!(ed.history().len(), 4);

    ed.undo();
    ed.undo();
    let frame = ed.document().active_frame();
    assert_eq!(frame.object(a_id).expect("a").points[0], Point::new(1.0, 1.0));
    assert_eq!(frame.object(b_id).expect("b").points[0], Point::new(5.0, 5.0));
}

#[test]
fn test_entries_on_different_frames_never_merge() {
    let f1 = Frame::with_size(IntSize::new(4, 4), Color::WHITE).id();
    let f2 = Frame::with_size(IntSize::new(4, 4), Color::WHITE).id();
    let mut first = OldCommand::new(
        move_raster_selection_command(IntPoint::new(1, 1), IntPoint::new(0, 0)),
        f1,
    );
    let second = OldCommand::new(
        move_raster_selection_command(IntPoint::new(2, 2), IntPoint::new(1, 1)),
        f2,
    );
    assert!(!first.should_merge(&second));
    assert!(first.merge(second).is_err());

    let third = OldCommand::new(
        move_raster_selection_command(IntPoint::new(3, 3), IntPoint::new(2, 2)),
        f1,
    );
    assert!(first.merge(third).is_ok());
}

#[test]
fn test_group_markers_never_merge() {
    let frame = Frame::with_size(IntSize::new(1, 1), Color::WHITE).id();
    let mut open = OldCommand::OpenGroup;
    let cmd = OldCommand::new(
        move_raster_selection_command(IntPoint::new(1, 1), IntPoint::new(0, 0)),
        frame,
    );
    assert!(open.merge(cmd).is_err());
}

#[test]
fn test_placed_selection_absorbs_moves_and_takes_their_name() {
    let mut ed = editor(10, 10);
    let floating = SelectionState::floating(Bitmap::new(IntSize::new(2, 2), RED), IntPoint::new(0, 0));
    ed.run_command(set_raster_selection_appending(floating, SelectionState::Empty, "Paste"));
    ed.run_command(move_raster_selection_command(IntPoint::new(4, 4), IntPoint::new(0, 0)));
    assert_eq!(ed.history().len(), 1);
    assert_eq!(ed.undo_name().as_deref(), Some("Move Selected Content"));
    assert_eq!(
        ed.document().active_frame().selection().rect(),
        Some(IntRect::new(4, 4, 2, 2))
    );

    ed.undo();
    assert!(ed.document().active_frame().selection().is_empty());
}

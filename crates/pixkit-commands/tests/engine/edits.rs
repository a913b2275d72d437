use std::cell::Cell;
use std::rc::Rc;

use pixkit_commands::edits::{
    delete_rect_command_for, flip_image_command, rescale_command, resize_command,
    rotate_image_90_command, set_bitmap_command, stamp_selection_command, AddObjectCommand,
    DeleteObjectCommand, ResizeOptions,
};
use pixkit_commands::{
    fill_command, function_command, target_floating_selection, target_rectangle, CommandContext,
    Document,
};
use pixkit_core::{
    Axis, Bitmap, Color, GeometryError, IntPoint, IntRect, IntSize, Point, ScaleQuality,
    SelectionState, Size, VectorObject,
};

use crate::common::{editor, paint, pixel, BLUE, GREEN, RED};

fn add_square(ed: &mut pixkit_commands::Editor, at: Point) -> pixkit_core::ObjectId {
    let obj = VectorObject::rectangle(at, Size::new(2.0, 2.0), Color::BLACK);
    let id = obj.id();
    ed.run_command(Box::new(AddObjectCommand::new(obj)));
    id
}

fn first_point(ed: &pixkit_commands::Editor, id: pixkit_core::ObjectId) -> Point {
    ed.document().active_frame().object(id).expect("object").points[0]
}

#[test]
fn test_resize_moves_objects_and_restores_on_undo() {
    let mut ed = editor(10, 10);
    ed.run_command(paint(4, 4, RED));
    let id = add_square(&mut ed, Point::new(5.0, 5.0));

    ed.run_command(resize_command(IntRect::new(2, 2, 20, 6), BLUE).expect("non-empty"));
    assert_eq!(ed.document().image_size(), IntSize::new(20, 6));
    assert_eq!(pixel(&ed, 2, 2), RED);
    assert_eq!(pixel(&ed, 15, 0), BLUE);
    assert_eq!(first_point(&ed, id), Point::new(3.0, 3.0));

    ed.undo();
    assert_eq!(ed.document().image_size(), IntSize::new(10, 10));
    assert_eq!(pixel(&ed, 4, 4), RED);
    assert_eq!(first_point(&ed, id), Point::new(5.0, 5.0));

    ed.redo();
    assert_eq!(ed.document().image_size(), IntSize::new(20, 6));
}

#[test]
fn test_resize_rejects_empty_rect() {
    assert!(resize_command(IntRect::new(0, 0, 0, 5), Color::WHITE).is_none());
    let err = ResizeOptions::new(IntRect::new(0, 0, 4, 4), Color::WHITE)
        .alt_rect(IntRect::new(0, 0, 4, -1))
        .build()
        .expect_err("empty alternate");
    assert!(matches!(err, GeometryError::EmptyRect { h: -1, .. }));
}

#[test]
fn test_rescale_scales_objects_and_view() {
    let mut ed = editor(10, 10);
    let id = add_square(&mut ed, Point::new(2.0, 4.0));
    ed.set_view_anchor(Point::new(5.0, 5.0));

    ed.run_command(rescale_command(IntSize::new(20, 5), ScaleQuality::Nearest));
    assert_eq!(ed.document().image_size(), IntSize::new(20, 5));
    assert_eq!(first_point(&ed, id), Point::new(4.0, 2.0));
    assert_eq!(ed.view_anchor(), Point::new(10.0, 2.5));

    ed.undo();
    assert_eq!(ed.document().image_size(), IntSize::new(10, 10));
    assert_eq!(first_point(&ed, id), Point::new(2.0, 4.0));
    assert_eq!(ed.view_anchor(), Point::new(5.0, 5.0));

    ed.redo();
    assert_eq!(first_point(&ed, id), Point::new(4.0, 2.0));
}

#[test]
fn test_flip_mirrors_pixels_and_objects() {
    let mut ed = editor(10, 4);
    ed.run_command(paint(0, 1, RED));
    let id = add_square(&mut ed, Point::new(1.0, 0.0));

    ed.run_command(flip_image_command(Axis::Horizontal));
    assert_eq!(pixel(&ed, 9, 1), RED);
    assert_eq!(pixel(&ed, 0, 1), Color::WHITE);
    assert_eq!(first_point(&ed, id), Point::new(9.0, 0.0));
    assert_eq!(ed.undo_name().as_deref(), Some("Flip Image Horizontally"));

    ed.undo();
    assert_eq!(pixel(&ed, 0, 1), RED);
    assert_eq!(first_point(&ed, id), Point::new(1.0, 0.0));
}

#[test]
fn test_rotate_swaps_size_and_undoes() {
    let mut ed = editor(6, 3);
    ed.run_command(paint(0, 0, RED));
    let id = add_square(&mut ed, Point::new(1.0, 2.0));

    ed.run_command(rotate_image_90_command());
    assert_eq!(ed.document().image_size(), IntSize::new(3, 6));
    assert_eq!(pixel(&ed, 2, 0), RED);
    assert_eq!(first_point(&ed, id), Point::new(1.0, 1.0));

    ed.undo();
    assert_eq!(ed.document().image_size(), IntSize::new(6, 3));
    assert_eq!(pixel(&ed, 0, 0), RED);
    assert_eq!(first_point(&ed, id), Point::new(1.0, 2.0));
}

#[test]
fn test_set_bitmap_replaces_image() {
    let mut ed = editor(4, 4);
    let id = add_square(&mut ed, Point::new(3.0, 3.0));
    let replacement = Bitmap::new(IntSize::new(2, 2), GREEN);
    ed.run_command(set_bitmap_command(replacement, IntPoint::new(1, 1), "Crop"));
    assert_eq!(ed.document().image_size(), IntSize::new(2, 2));
    assert_eq!(pixel(&ed, 0, 0), GREEN);
    assert_eq!(first_point(&ed, id), Point::new(2.0, 2.0));

    ed.undo();
    assert_eq!(ed.document().image_size(), IntSize::new(4, 4));
    assert_eq!(pixel(&ed, 0, 0), Color::WHITE);
    assert_eq!(first_point(&ed, id), Point::new(3.0, 3.0));
}

#[test]
fn test_delete_rect_outside_image() {
    let bitmap = Bitmap::new(IntSize::new(4, 4), Color::WHITE);
    assert!(delete_rect_command_for(&bitmap, IntRect::new(10, 10, 2, 2), Color::WHITE).is_none());
}

#[test]
fn test_delete_rect_clips_to_image() {
    let mut ed = editor(4, 4);
    let cmd = delete_rect_command_for(
        ed.document().active_frame().bitmap(),
        IntRect::new(2, 2, 10, 10),
        BLUE,
    )
    .expect("overlaps");
    ed.run_command(cmd);
    assert_eq!(pixel(&ed, 3, 3), BLUE);
    assert_eq!(pixel(&ed, 1, 1), Color::WHITE);
}

#[test]
fn test_target_rectangle_only_touches_rect() {
    let mut ed = editor(6, 6);
    ed.run_command(target_rectangle(fill_command(RED), IntRect::new(1, 1, 2, 2)));
    assert_eq!(pixel(&ed, 1, 1), RED);
    assert_eq!(pixel(&ed, 2, 2), RED);
    assert_eq!(pixel(&ed, 3, 3), Color::WHITE);
    assert_eq!(pixel(&ed, 0, 0), Color::WHITE);
    assert_eq!(ed.undo_name().as_deref(), Some("Fill"));
}

fn floating_doc() -> Document {
    let mut doc = Document::new(IntSize::new(8, 8), Color::WHITE).expect("document");
    doc.raster_selection_mut().set_state(SelectionState::floating(
        Bitmap::new(IntSize::new(2, 2), GREEN),
        IntPoint::new(3, 3),
    ));
    doc
}

fn floating_pixel(doc: &Document) -> Option<Color> {
    doc.raster_selection()
        .floating_bitmap()
        .and_then(|b| b.get(IntPoint::new(0, 0)))
}

#[test]
fn test_floating_selection_keeps_first_old_bitmap() {
    let mut doc = floating_doc();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut cmd = target_floating_selection(function_command("Recolor", move |bmp: &mut Bitmap| {
        counter.set(counter.get() + 1);
        bmp.fill(if counter.get() == 1 { RED } else { BLUE });
    }));

    cmd.execute(&mut doc);
    assert_eq!(floating_pixel(&doc), Some(RED));
    cmd.execute(&mut doc);
    assert_eq!(floating_pixel(&doc), Some(BLUE));
    cmd.undo(&mut doc);
    assert_eq!(floating_pixel(&doc), Some(GREEN));
    assert_eq!(calls.get(), 2);
    assert_eq!(doc.bitmap().get(IntPoint::new(3, 3)), Some(Color::WHITE));
}

#[test]
#[should_panic(expected = "needs a raster selection")]
fn test_floating_selection_requires_selection() {
    let mut doc = Document::new(IntSize::new(4, 4), Color::WHITE).expect("document");
    target_floating_selection(fill_command(RED)).execute(&mut doc);
}

#[test]
#[should_panic(expected = "needs a floating selection")]
fn test_floating_selection_requires_floating() {
    let mut doc = Document::new(IntSize::new(4, 4), Color::WHITE).expect("document");
    doc.raster_selection_mut()
        .set_state(SelectionState::Rectangle(IntRect::new(0, 0, 2, 2)));
    target_floating_selection(fill_command(RED)).execute(&mut doc);
}

#[test]
fn test_floating_selection_undo_through_history() {
    let mut ed = editor(8, 8);
    ed.document_mut()
        .raster_selection_mut()
        .set_state(SelectionState::floating(
            Bitmap::new(IntSize::new(2, 2), GREEN),
            IntPoint::new(3, 3),
        ));
    ed.run_command(target_floating_selection(fill_command(RED)));
    assert_eq!(floating_pixel(ed.document()), Some(RED));
    ed.undo();
    assert_eq!(floating_pixel(ed.document()), Some(GREEN));
    ed.redo();
    assert_eq!(floating_pixel(ed.document()), Some(RED));
}

#[test]
fn test_stamp_selection() {
    let mut ed = editor(8, 8);
    assert!(stamp_selection_command(ed.document()).is_none());
    ed.document_mut()
        .raster_selection_mut()
        .set_state(SelectionState::floating(
            Bitmap::new(IntSize::new(2, 2), GREEN),
            IntPoint::new(3, 3),
        ));
    let stamp = stamp_selection_command(ed.document()).expect("floating");
    ed.run_command(stamp);
    assert_eq!(pixel(&ed, 4, 4), GREEN);
    ed.undo();
    assert_eq!(pixel(&ed, 4, 4), Color::WHITE);
}

#[test]
fn test_delete_object_restores_z_order() {
    let mut ed = editor(8, 8);
    let a = add_square(&mut ed, Point::new(0.0, 0.0));
    let b = add_square(&mut ed, Point::new(1.0, 1.0));
    let obj = ed.document().active_frame().object(a).expect("a").clone();
    ed.run_command(Box::new(DeleteObjectCommand::new(&obj)));
    assert_eq!(ed.document().active_frame().objects().len(), 1);
    ed.undo();
    let ids: Vec<_> = ed.document().active_frame().objects().iter().map(|o| o.id()).collect();
    assert_eq!(ids, vec![a, b]);
}

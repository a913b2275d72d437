use pixkit_commands::edits::{
    delete_rect_command_for, set_raster_selection_command, ResizeOptions,
    SetRasterSelectionCommand,
};
use pixkit_commands::{fill_command, target_full_image, CommandContext};
use pixkit_core::{Color, Frame, IntRect, IntSize, SelectionState};

use crate::common::{editor, paint, pixel, BLUE, RED};

#[test]
fn test_dwim_without_alternative_does_nothing() {
    let mut ed = editor(4, 4);
    assert!(ed.apply_dwim().is_none());
    ed.run_command(paint(0, 0, RED));
    assert!(ed.apply_dwim().is_none());
    assert_eq!(pixel(&ed, 0, 0), RED);
}

#[test]
fn test_resize_dwim_swaps_background() {
    let mut ed = editor(4, 4);
    let resize = ResizeOptions::new(IntRect::new(0, 0, 6, 6), Color::WHITE)
        .alt_bg(BLUE)
        .build()
        .expect("valid resize");
    ed.run_command(Box::new(resize));
    assert_eq!(pixel(&ed, 5, 5), Color::WHITE);

    ed.apply_dwim().expect("alternate available");
    assert_eq!(pixel(&ed, 5, 5), BLUE);
    assert_eq!(ed.history().undo_depth(), 1);
    assert_eq!(ed.undo_name().as_deref(), Some("Resize Image (DWIM)"));

    ed.apply_dwim().expect("alternate of the alternate");
    assert_eq!(pixel(&ed, 5, 5), Color::WHITE);

    ed.undo();
    assert_eq!(ed.document().image_size(), IntSize::new(4, 4));
    assert!(!ed.can_undo());
}

#[test]
fn test_resize_dwim_swaps_rect() {
    let mut ed = editor(10, 10);
    let resize = ResizeOptions::new(IntRect::new(0, 0, 5, 5), Color::WHITE)
        .alt_rect(IntRect::new(0, 0, 8, 3))
        .build()
        .expect("valid resize");
    ed.run_command(Box::new(resize));
    ed.apply_dwim();
    assert_eq!(ed.document().image_size(), IntSize::new(8, 3));
}

#[test]
fn test_delete_rect_dwim_uses_surrounding_colour() {
    let mut ed = editor(6, 6);
    ed.run_command(target_full_image(fill_command(RED)));
    let cmd = delete_rect_command_for(
        ed.document().active_frame().bitmap(),
        IntRect::new(2, 2, 2, 2),
        Color::WHITE,
    )
    .expect("inside image");
    assert!(cmd.has_dwim());
    ed.run_command(cmd);
    assert_eq!(pixel(&ed, 2, 2), Color::WHITE);

    ed.apply_dwim();
    assert_eq!(pixel(&ed, 2, 2), RED);
    assert_eq!(ed.undo_name().as_deref(), Some("Delete Region (DWIM)"));
}

#[test]
fn test_delete_rect_without_distinct_edge_has_no_dwim() {
    let ed = editor(6, 6);
    let cmd = delete_rect_command_for(
        ed.document().active_frame().bitmap(),
        IntRect::new(2, 2, 2, 2),
        Color::WHITE,
    )
    .expect("inside image");
    assert!(!cmd.has_dwim());
}

#[test]
fn test_dwim_applies_to_the_frame_of_the_command() {
    let mut ed = editor(4, 4);
    let second = ed
        .document_mut()
        .add_frame(Frame::with_size(IntSize::new(4, 4), Color::WHITE));
    let cmd = SetRasterSelectionCommand::new(
        SelectionState::Rectangle(IntRect::new(0, 0, 1, 1)),
        SelectionState::Empty,
        "Select",
    )
    .with_alternate(SelectionState::Rectangle(IntRect::new(0, 0, 3, 3)));
    ed.run_command_on(Box::new(cmd), second).expect("known frame");

    ed.apply_dwim().expect("alternate available");
    let frame = ed.document().frame(second).expect("second frame");
    assert_eq!(frame.selection().rect(), Some(IntRect::new(0, 0, 3, 3)));
    assert!(ed.document().active_frame().selection().is_empty());

    let plain = set_raster_selection_command(SelectionState::Empty, SelectionState::Empty, "Deselect");
    assert!(!plain.has_dwim());
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use pixkit_commands::{
    function_command, target_full_image, Command, CommandContext, CommandId, CommandType, Editor,
    HistoryConfig,
};
use pixkit_core::{Bitmap, Color, IntPoint, IntSize};

pub const RED: Color = Color::rgb(255, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);

pub fn editor(w: i32, h: i32) -> Editor {
    editor_with(w, h, HistoryConfig::default())
}

pub fn editor_with(w: i32, h: i32, config: HistoryConfig) -> Editor {
    Editor::blank(IntSize::new(w, h), Color::WHITE, config).expect("blank editor")
}

/// A raster command setting one pixel.
pub fn paint(x: i32, y: i32, color: Color) -> Box<dyn Command> {
    target_full_image(function_command("Paint", move |bmp: &mut Bitmap| {
        bmp.set(IntPoint::new(x, y), color)
    }))
}

pub fn pixel(editor: &Editor, x: i32, y: i32) -> Color {
    editor
        .document()
        .active_frame()
        .bitmap()
        .get(IntPoint::new(x, y))
        .expect("pixel in bounds")
}

pub type Log = Rc<RefCell<Vec<String>>>;

/// An object command that only records calls into a shared log.
pub struct Recorder {
    id: CommandId,
    label: &'static str,
    log: Log,
}

impl Command for Recorder {
    fn command_type(&self) -> CommandType {
        CommandType::Object
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, _ctx: &mut dyn CommandContext) {
        self.log.borrow_mut().push(format!("do {}", self.label));
    }

    fn undo(&mut self, _ctx: &mut dyn CommandContext) {
        self.log.borrow_mut().push(format!("undo {}", self.label));
    }

    fn name(&self) -> String {
        self.label.to_string()
    }
}

pub fn recorder(label: &'static str, log: &Log) -> Box<dyn Command> {
    Box::new(Recorder {
        id: CommandId::next(),
        label,
        log: Rc::clone(log),
    })
}

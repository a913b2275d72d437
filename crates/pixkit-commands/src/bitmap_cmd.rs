//! Bitmap-only operations and the adapters that turn them into commands.
//!
//! A [`BitmapCommand`] knows nothing about frames or selections; it only
//! edits a bitmap. The adapters decide which bitmap that is: the whole
//! image, a rectangle of it, or the pixels of a floating selection.

use pixkit_core::{Bitmap, Color, IntRect};

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;

/// An operation on a bare bitmap.
pub trait BitmapCommand {
    fn execute(&mut self, bitmap: &mut Bitmap);
    fn name(&self) -> String;
}

struct FunctionCommand<F> {
    name: String,
    func: F,
}

impl<F: FnMut(&mut Bitmap)> BitmapCommand for FunctionCommand<F> {
    fn execute(&mut self, bitmap: &mut Bitmap) {
        (self.func)(bitmap);
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// A bitmap operation from a closure.
pub fn function_command<F>(name: impl Into<String>, func: F) -> Box<dyn BitmapCommand>
where
    F: FnMut(&mut Bitmap) + 'static,
{
    Box::new(FunctionCommand {
        name: name.into(),
        func,
    })
}

/// Fills the whole target bitmap with `color`.
pub fn fill_command(color: Color) -> Box<dyn BitmapCommand> {
    function_command("Fill", move |bitmap: &mut Bitmap| bitmap.fill(color))
}

enum Target {
    Image,
    Rectangle(IntRect),
    FloatingSelection { old: Option<Bitmap> },
}

/// A [`BitmapCommand`] applied to part of a frame.
pub struct BitmapTargetCommand {
    id: CommandId,
    command: Box<dyn BitmapCommand>,
    target: Target,
}

impl BitmapTargetCommand {
    fn new(command: Box<dyn BitmapCommand>, target: Target) -> Self {
        Self {
            id: CommandId::next(),
            command,
            target,
        }
    }
}

impl Command for BitmapTargetCommand {
    fn command_type(&self) -> CommandType {
        match self.target {
            Target::Image | Target::Rectangle(_) => CommandType::Raster,
            Target::FloatingSelection { .. } => CommandType::Selection,
        }
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        match &mut self.target {
            Target::Image => self.command.execute(ctx.raw_bitmap()),
            Target::Rectangle(rect) => {
                let mut region = ctx.raw_bitmap().subbitmap(*rect);
                self.command.execute(&mut region);
                ctx.dc().blit(&region, rect.top_left());
            }
            Target::FloatingSelection { old } => {
                let selection = ctx.raster_selection_mut();
                assert!(
                    !selection.is_empty(),
                    "'{}' needs a raster selection",
                    self.command.name()
                );
                let (Some(current), Some(top_left)) =
                    (selection.floating_bitmap(), selection.top_left())
                else {
                    panic!("'{}' needs a floating selection", self.command.name());
                };
                if old.is_none() {
                    *old = Some(current.clone());
                }
                let mut pixels = current.clone();
                self.command.execute(&mut pixels);
                selection.set_floating_bitmap(pixels, top_left);
            }
        }
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        if let Target::FloatingSelection { old: Some(old) } = &self.target {
            let selection = ctx.raster_selection_mut();
            if let Some(top_left) = selection.top_left() {
                selection.set_floating_bitmap(old.clone(), top_left);
            }
        }
    }

    fn name(&self) -> String {
        self.command.name()
    }
}

/// Applies `command` to the whole image of the target frame.
pub fn target_full_image(command: Box<dyn BitmapCommand>) -> Box<dyn Command> {
    Box::new(BitmapTargetCommand::new(command, Target::Image))
}

/// Applies `command` to `rect` of the image, as if the rectangle were an
/// image of its own.
pub fn target_rectangle(command: Box<dyn BitmapCommand>, rect: IntRect) -> Box<dyn Command> {
    Box::new(BitmapTargetCommand::new(command, Target::Rectangle(rect)))
}

/// Applies `command` to the pixels of the floating raster selection.
///
/// # Panics
///
/// When executed while the selection is empty or not floating.
pub fn target_floating_selection(command: Box<dyn BitmapCommand>) -> Box<dyn Command> {
    Box::new(BitmapTargetCommand::new(
        command,
        Target::FloatingSelection { old: None },
    ))
}

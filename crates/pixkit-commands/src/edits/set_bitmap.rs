//! Replacing the whole image, e.g. when pasting or cropping to content.

use pixkit_core::{Bitmap, IntPoint, Point};

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;

/// Replaces the frame's bitmap. `top_left` is where the new bitmap's origin
/// lies in the old image; objects and the selection move accordingly.
#[derive(Debug)]
pub struct SetBitmapCommand {
    id: CommandId,
    bitmap: Bitmap,
    top_left: IntPoint,
    name: String,
}

impl Command for SetBitmapCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Hybrid
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        self.execute_raster(ctx);
        ctx.offset_origin(-self.top_left);
    }

    fn execute_raster(&mut self, ctx: &mut dyn CommandContext) {
        ctx.set_bitmap(self.bitmap.clone());
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        ctx.offset_origin(self.top_left);
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn translate(&self, p: Point) -> Point {
        p - self.top_left.floated()
    }

    fn undo_translate(&self, p: Point) -> Point {
        p + self.top_left.floated()
    }
}

pub fn set_bitmap_command(
    bitmap: Bitmap,
    top_left: IntPoint,
    name: impl Into<String>,
) -> Box<dyn Command> {
    Box::new(SetBitmapCommand {
        id: CommandId::next(),
        bitmap,
        top_left,
        name: name.into(),
    })
}

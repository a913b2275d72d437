//! Rescaling the image and everything on it.

use pixkit_core::{IntSize, Point, Scale, ScaleQuality, VectorObject};

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;
use crate::edits::points::scale_objects_command;

#[derive(Debug)]
pub struct RescaleCommand {
    id: CommandId,
    size: IntSize,
    old_size: IntSize,
    quality: ScaleQuality,
    /// Created on first execution from the objects present then.
    scale_objects: Option<Box<dyn Command>>,
}

impl RescaleCommand {
    fn scale(&self) -> Scale {
        Scale::between(self.size.floated(), self.old_size.floated())
    }
}

impl Command for RescaleCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Hybrid
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        self.execute_raster(ctx);
        if self.scale_objects.is_none() && ctx.has_objects() {
            let objects: Vec<&VectorObject> = ctx.objects().iter().collect();
            self.scale_objects = Some(scale_objects_command(
                &objects,
                self.scale(),
                Point::default(),
            ));
        }
        if let Some(cmd) = &mut self.scale_objects {
            cmd.execute(ctx);
        }
    }

    fn execute_raster(&mut self, ctx: &mut dyn CommandContext) {
        self.old_size = ctx.image_size();
        let scaled = ctx.bitmap().scaled(self.size, self.quality);
        ctx.set_bitmap(scaled);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        if let Some(cmd) = &mut self.scale_objects {
            cmd.undo(ctx);
        }
    }

    fn name(&self) -> String {
        "Rescale Image".to_string()
    }

    fn translate(&self, p: Point) -> Point {
        p.scaled(self.scale(), Point::default())
    }

    fn undo_translate(&self, p: Point) -> Point {
        p.scaled(self.scale().inverse(), Point::default())
    }
}

/// Rescales the image to `size`.
pub fn rescale_command(size: IntSize, quality: ScaleQuality) -> Box<dyn Command> {
    Box::new(RescaleCommand {
        id: CommandId::next(),
        size,
        old_size: size,
        quality,
        scale_objects: None,
    })
}

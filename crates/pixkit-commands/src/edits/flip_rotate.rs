//! Flipping and rotating the whole image with its objects.

use pixkit_core::{Axis, IntSize, Point};

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;

fn mirror(p: Point, axis: Axis, size: IntSize) -> Point {
    match axis {
        Axis::Horizontal => Point::new(f64::from(size.w) - p.x, p.y),
        Axis::Vertical => Point::new(p.x, f64::from(size.h) - p.y),
    }
}

fn flip_objects(ctx: &mut dyn CommandContext, axis: Axis) {
    let size = ctx.image_size();
    for obj in ctx.objects_mut() {
        obj.map_points(|p| mirror(p, axis, size));
    }
}

#[derive(Debug)]
pub struct FlipImageCommand {
    id: CommandId,
    axis: Axis,
}

impl Command for FlipImageCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Hybrid
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        flip_objects(ctx, self.axis);
        self.execute_raster(ctx);
    }

    fn execute_raster(&mut self, ctx: &mut dyn CommandContext) {
        let flipped = ctx.bitmap().flipped(self.axis);
        ctx.set_bitmap(flipped);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        flip_objects(ctx, self.axis);
    }

    fn name(&self) -> String {
        match self.axis {
            Axis::Horizontal => "Flip Image Horizontally".to_string(),
            Axis::Vertical => "Flip Image Vertically".to_string(),
        }
    }
}

/// Mirrors the image and its objects along `axis`.
pub fn flip_image_command(axis: Axis) -> Box<dyn Command> {
    Box::new(FlipImageCommand {
        id: CommandId::next(),
        axis,
    })
}

/// Rotates the image and its objects 90 degrees clockwise.
#[derive(Debug)]
pub struct RotateImage90Command {
    id: CommandId,
}

impl Command for RotateImage90Command {
    fn command_type(&self) -> CommandType {
        CommandType::Hybrid
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        let h = f64::from(ctx.image_size().h);
        for obj in ctx.objects_mut() {
            obj.map_points(|p| Point::new(h - p.y, p.x));
        }
        self.execute_raster(ctx);
    }

    fn execute_raster(&mut self, ctx: &mut dyn CommandContext) {
        let rotated = ctx.bitmap().rotated_90cw();
        ctx.set_bitmap(rotated);
    }

    // Runs while the image is still rotated; its width is the old height.
    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        let old_h = f64::from(ctx.image_size().w);
        for obj in ctx.objects_mut() {
            obj.map_points(|p| Point::new(p.y, old_h - p.x));
        }
    }

    fn name(&self) -> String {
        "Rotate Image 90°".to_string()
    }
}

pub fn rotate_image_90_command() -> Box<dyn Command> {
    Box::new(RotateImage90Command {
        id: CommandId::next(),
    })
}

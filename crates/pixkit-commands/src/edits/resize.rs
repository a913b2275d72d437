//! Resizing the image canvas.

use pixkit_core::{Color, GeometryError, IntRect, Point};

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;

/// Builder for [`ResizeCommand`].
#[derive(Debug, Clone)]
pub struct ResizeOptions {
    rect: IntRect,
    bg: Color,
    alt_rect: Option<IntRect>,
    alt_bg: Option<Color>,
    name: String,
}

impl ResizeOptions {
    /// Resize to `rect`, given in current image coordinates. Area outside
    /// the current image is filled with `bg`.
    pub fn new(rect: IntRect, bg: Color) -> Self {
        Self {
            rect,
            bg,
            alt_rect: None,
            alt_bg: None,
            name: "Resize Image".to_string(),
        }
    }

    /// An alternate rectangle offered through DWIM.
    pub fn alt_rect(mut self, rect: IntRect) -> Self {
        self.alt_rect = Some(rect);
        self
    }

    /// An alternate background colour offered through DWIM.
    pub fn alt_bg(mut self, bg: Color) -> Self {
        self.alt_bg = Some(bg);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> Result<ResizeCommand, GeometryError> {
        for rect in std::iter::once(self.rect).chain(self.alt_rect) {
            if rect.is_empty() {
                return Err(GeometryError::EmptyRect {
                    x: rect.x,
                    y: rect.y,
                    w: rect.w,
                    h: rect.h,
                });
            }
        }
        Ok(ResizeCommand {
            id: CommandId::next(),
            options: self,
        })
    }
}

/// Changes the canvas to a rectangle of the current image, moving objects
/// and the selection along with the new origin.
#[derive(Debug)]
pub struct ResizeCommand {
    id: CommandId,
    options: ResizeOptions,
}

impl ResizeCommand {
    pub fn rect(&self) -> IntRect {
        self.options.rect
    }

    pub fn bg(&self) -> Color {
        self.options.bg
    }
}

impl Command for ResizeCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Hybrid
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        self.execute_raster(ctx);
        ctx.offset_origin(-self.options.rect.top_left());
    }

    fn execute_raster(&mut self, ctx: &mut dyn CommandContext) {
        let rect = self.options.rect;
        let resized = ctx
            .bitmap()
            .placed(rect.size(), -rect.top_left(), self.options.bg);
        ctx.set_bitmap(resized);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        ctx.offset_origin(self.options.rect.top_left());
    }

    fn name(&self) -> String {
        self.options.name.clone()
    }

    fn has_dwim(&self) -> bool {
        self.options.alt_bg.is_some() || self.options.alt_rect.is_some()
    }

    fn dwim(&self) -> Box<dyn Command> {
        let current = &self.options;
        let mut options = ResizeOptions::new(current.rect, current.bg).name("Resize Image (DWIM)");
        if let Some(alt_bg) = current.alt_bg {
            options.bg = alt_bg;
            options.alt_bg = Some(current.bg);
        } else if let Some(alt_rect) = current.alt_rect {
            options.rect = alt_rect;
            options.alt_rect = Some(current.rect);
        } else {
            panic!("'{}' has no alternate form", current.name);
        }
        Box::new(ResizeCommand {
            id: CommandId::next(),
            options,
        })
    }

    fn translate(&self, p: Point) -> Point {
        p - self.options.rect.top_left().floated()
    }

    fn undo_translate(&self, p: Point) -> Point {
        p + self.options.rect.top_left().floated()
    }
}

/// A resize command for `rect`, or `None` if the rectangle is empty.
pub fn resize_command(rect: IntRect, bg: Color) -> Option<Box<dyn Command>> {
    let command = ResizeOptions::new(rect, bg).build().ok()?;
    Some(Box::new(command))
}

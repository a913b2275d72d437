//! Clearing a region of the image.

use pixkit_core::{Bitmap, Color, IntRect};

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;

/// Fills a rectangle with a background colour. If the pixels around the
/// rectangle share another colour, DWIM fills with that colour instead.
#[derive(Debug)]
pub struct DeleteRectCommand {
    id: CommandId,
    rect: IntRect,
    bg: Color,
    alt_bg: Option<Color>,
    dwim: bool,
}

impl DeleteRectCommand {
    pub fn new(rect: IntRect, bg: Color) -> Self {
        Self {
            id: CommandId::next(),
            rect,
            bg,
            alt_bg: None,
            dwim: false,
        }
    }

    pub fn with_alternate(mut self, alt_bg: Color) -> Self {
        self.alt_bg = Some(alt_bg);
        self
    }

    pub fn rect(&self) -> IntRect {
        self.rect
    }

    pub fn bg(&self) -> Color {
        self.bg
    }
}

impl Command for DeleteRectCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Raster
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        ctx.dc().fill_rect(self.rect, self.bg);
    }

    fn name(&self) -> String {
        if self.dwim {
            "Delete Region (DWIM)".to_string()
        } else {
            "Delete Region".to_string()
        }
    }

    fn has_dwim(&self) -> bool {
        self.alt_bg.is_some()
    }

    fn dwim(&self) -> Box<dyn Command> {
        let Some(alt_bg) = self.alt_bg else {
            panic!("'{}' has no alternate form", self.name());
        };
        Box::new(DeleteRectCommand {
            id: CommandId::next(),
            rect: self.rect,
            bg: alt_bg,
            alt_bg: Some(self.bg),
            dwim: !self.dwim,
        })
    }
}

/// A command clearing `rect` of `bitmap` to `bg`, offering the colour
/// surrounding the rectangle as the DWIM alternative. `None` if the
/// rectangle does not overlap the image.
pub fn delete_rect_command_for(bitmap: &Bitmap, rect: IntRect, bg: Color) -> Option<Box<dyn Command>> {
    let rect = rect.intersection(&bitmap.rect());
    if rect.is_empty() {
        return None;
    }
    let command = DeleteRectCommand::new(rect, bg);
    let command = match bitmap.edge_color(rect).filter(|c| *c != bg) {
        Some(edge) => command.with_alternate(edge),
        None => command,
    };
    Some(Box::new(command))
}

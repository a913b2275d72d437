//! Adding, removing and reordering frames, and changing frame properties.
//!
//! Frame commands address frames by their position in the frame list. They
//! are fully reversible and never touch pixels.

use pixkit_core::{Color, Frame, FrameId, IntPoint, IntSize};
use tracing::warn;

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;

/// Inserts a frame; undo takes it out again.
#[derive(Debug)]
struct AddFrameCommand {
    id: CommandId,
    frame: FrameId,
    /// `None` appends after the last frame.
    index: Option<usize>,
    /// Holds the frame while it is not in the document.
    pending: Option<Frame>,
}

impl Command for AddFrameCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Frame
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        if let Some(frame) = self.pending.take() {
            let index = self
                .index
                .map_or(ctx.frame_count(), |i| i.min(ctx.frame_count()));
            ctx.insert_frame(index, frame);
        }
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        match ctx.frame_position(self.frame) {
            Some(index) => self.pending = Some(ctx.remove_frame(index)),
            None => warn!(frame = %self.frame, "added frame is gone"),
        }
    }

    fn name(&self) -> String {
        "Add Frame".to_string()
    }
}

/// Appends a blank frame of `size`.
pub fn add_frame_command(size: IntSize, bg: Color) -> Box<dyn Command> {
    let frame = Frame::with_size(size, bg);
    Box::new(AddFrameCommand {
        id: CommandId::next(),
        frame: frame.id(),
        index: None,
        pending: Some(frame),
    })
}

/// Inserts `frame` before `index`.
pub fn insert_frame_command(frame: Frame, index: usize) -> Box<dyn Command> {
    Box::new(AddFrameCommand {
        id: CommandId::next(),
        frame: frame.id(),
        index: Some(index),
        pending: Some(frame),
    })
}

/// Removes the frame at an index. Undo puts the very same frame back, so
/// history entries bound to it stay valid.
#[derive(Debug)]
struct RemoveFrameCommand {
    id: CommandId,
    index: usize,
    removed: Option<Frame>,
}

impl Command for RemoveFrameCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Frame
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        if self.index >= ctx.frame_count() || ctx.frame_count() == 1 {
            warn!(index = self.index, frames = ctx.frame_count(), "cannot remove frame");
            return;
        }
        self.removed = Some(ctx.remove_frame(self.index));
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        if let Some(frame) = self.removed.take() {
            ctx.insert_frame(self.index, frame);
        }
    }

    fn name(&self) -> String {
        "Remove Frame".to_string()
    }
}

pub fn remove_frame_command(index: usize) -> Box<dyn Command> {
    Box::new(RemoveFrameCommand {
        id: CommandId::next(),
        index,
        removed: None,
    })
}

#[derive(Debug)]
struct SwapFramesCommand {
    id: CommandId,
    first: usize,
    second: usize,
}

impl SwapFramesCommand {
    fn swap(&self, ctx: &mut dyn CommandContext) {
        if self.second >= ctx.frame_count() {
            warn!(first = self.first, second = self.second, "swap of missing frames");
            return;
        }
        ctx.swap_frames(self.first, self.second);
    }
}

impl Command for SwapFramesCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Frame
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        self.swap(ctx);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        self.swap(ctx);
    }

    fn name(&self) -> String {
        "Swap Frames".to_string()
    }
}

pub fn swap_frames_command(a: usize, b: usize) -> Box<dyn Command> {
    Box::new(SwapFramesCommand {
        id: CommandId::next(),
        first: a.min(b),
        second: a.max(b),
    })
}

#[derive(Debug)]
struct ReorderFrameCommand {
    id: CommandId,
    new_index: usize,
    old_index: usize,
}

impl ReorderFrameCommand {
    fn reorder(ctx: &mut dyn CommandContext, to: usize, from: usize) {
        if to.max(from) >= ctx.frame_count() {
            warn!(to, from, "reorder of missing frame");
            return;
        }
        ctx.move_frame(to, from);
    }
}

impl Command for ReorderFrameCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Frame
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        Self::reorder(ctx, self.new_index, self.old_index);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        Self::reorder(ctx, self.old_index, self.new_index);
    }

    fn name(&self) -> String {
        "Reorder Frames".to_string()
    }
}

/// Moves the frame at `old_index` to `new_index`.
pub fn reorder_frame_command(new_index: usize, old_index: usize) -> Box<dyn Command> {
    Box::new(ReorderFrameCommand {
        id: CommandId::next(),
        new_index,
        old_index,
    })
}

/// Sets one property of the frame at an index, restoring the old value on
/// undo.
struct SetFramePropertyCommand<T> {
    id: CommandId,
    index: usize,
    new_value: T,
    old_value: T,
    field: fn(&mut Frame) -> &mut T,
    name: &'static str,
}

impl<T: std::fmt::Debug> std::fmt::Debug for SetFramePropertyCommand<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetFramePropertyCommand")
            .field("index", &self.index)
            .field("new_value", &self.new_value)
            .field("old_value", &self.old_value)
            .field("name", &self.name)
            .finish()
    }
}

fn delay_of(frame: &mut Frame) -> &mut u32 {
    &mut frame.delay_ms
}

fn hotspot_of(frame: &mut Frame) -> &mut IntPoint {
    &mut frame.hotspot
}

impl<T: Copy + 'static> SetFramePropertyCommand<T> {
    fn set(&self, ctx: &mut dyn CommandContext, value: T) {
        match ctx.frame_at_mut(self.index) {
            Some(frame) => *(self.field)(frame) = value,
            None => warn!(index = self.index, property = self.name, "no such frame"),
        }
    }
}

impl<T: Copy + 'static> Command for SetFramePropertyCommand<T> {
    fn command_type(&self) -> CommandType {
        CommandType::Frame
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        self.set(ctx, self.new_value);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        self.set(ctx, self.old_value);
    }

    fn name(&self) -> String {
        self.name.to_string()
    }
}

pub fn set_frame_delay_command(index: usize, delay_ms: u32, old_delay_ms: u32) -> Box<dyn Command> {
    Box::new(SetFramePropertyCommand {
        id: CommandId::next(),
        index,
        new_value: delay_ms,
        old_value: old_delay_ms,
        field: delay_of,
        name: "Set Frame Delay",
    })
}

pub fn set_frame_hotspot_command(index: usize, hotspot: IntPoint, old_hotspot: IntPoint) -> Box<dyn Command> {
    Box::new(SetFramePropertyCommand {
        id: CommandId::next(),
        index,
        new_value: hotspot,
        old_value: old_hotspot,
        field: hotspot_of,
        name: "Set Frame Hot Spot",
    })
}

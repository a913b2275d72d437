//! Raster selection commands.

use pixkit_core::{Bitmap, IntPoint, SelectionState};

use crate::bunch::command_bunch;
use crate::command::{AsAny, Command, CommandId, CommandType};
use crate::conditions::AppendIfMoveSelection;
use crate::context::CommandContext;

/// Changes the raster selection state.
#[derive(Debug)]
pub struct SetRasterSelectionCommand {
    id: CommandId,
    new_state: SelectionState,
    old_state: SelectionState,
    alt_state: Option<SelectionState>,
    name: String,
}

impl SetRasterSelectionCommand {
    pub fn new(new_state: SelectionState, old_state: SelectionState, name: impl Into<String>) -> Self {
        Self {
            id: CommandId::next(),
            new_state,
            old_state,
            alt_state: None,
            name: name.into(),
        }
    }

    /// Offers `alt_state` as the DWIM alternative to the new state.
    pub fn with_alternate(mut self, alt_state: SelectionState) -> Self {
        self.alt_state = Some(alt_state);
        self
    }
}

impl Command for SetRasterSelectionCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Selection
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        ctx.raster_selection_mut().set_state(self.new_state.clone());
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        ctx.raster_selection_mut().set_state(self.old_state.clone());
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn has_dwim(&self) -> bool {
        self.alt_state.is_some()
    }

    fn dwim(&self) -> Box<dyn Command> {
        let Some(alt_state) = &self.alt_state else {
            panic!("'{}' has no alternate form", self.name);
        };
        Box::new(
            SetRasterSelectionCommand::new(alt_state.clone(), self.old_state.clone(), self.name.clone())
                .with_alternate(self.new_state.clone()),
        )
    }

    // Floating pixels are image content; selecting a region is not.
    fn modifies_state(&self) -> bool {
        self.new_state.is_floating() || self.old_state.is_floating()
    }
}

/// Sets the raster selection to `new_state` from `old_state`.
pub fn set_raster_selection_command(
    new_state: SelectionState,
    old_state: SelectionState,
    name: impl Into<String>,
) -> Box<dyn Command> {
    Box::new(SetRasterSelectionCommand::new(new_state, old_state, name))
}

/// Like [`set_raster_selection_command`], but moves of the selection that
/// follow are appended to it, so placing and dragging undo as one step.
pub fn set_raster_selection_appending(
    new_state: SelectionState,
    old_state: SelectionState,
    name: impl Into<String>,
) -> Box<dyn Command> {
    let name = name.into();
    command_bunch(
        name.clone(),
        vec![set_raster_selection_command(new_state, old_state, name)],
        Some(Box::new(AppendIfMoveSelection)),
    )
}

/// Moves the selection; consecutive moves merge.
#[derive(Debug)]
pub struct MoveRasterSelectionCommand {
    id: CommandId,
    new_pos: IntPoint,
    old_pos: IntPoint,
}

impl Command for MoveRasterSelectionCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Selection
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        ctx.raster_selection_mut().move_to(self.new_pos);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        ctx.raster_selection_mut().move_to(self.old_pos);
    }

    fn name(&self) -> String {
        "Move Selected Content".to_string()
    }

    fn should_merge(&self, candidate: &dyn Command, same_frame: bool) -> bool {
        same_frame && candidate.as_any().is::<MoveRasterSelectionCommand>()
    }

    fn merge(&mut self, candidate: Box<dyn Command>) {
        match candidate.into_any().downcast::<MoveRasterSelectionCommand>() {
            Ok(other) => self.new_pos = other.new_pos,
            Err(_) => panic!("'Move Selected Content' merged with a foreign command"),
        }
    }
}

pub fn move_raster_selection_command(new_pos: IntPoint, old_pos: IntPoint) -> Box<dyn Command> {
    Box::new(MoveRasterSelectionCommand {
        id: CommandId::next(),
        new_pos,
        old_pos,
    })
}

/// Draws a copy of floating pixels onto the image at `top_left`.
#[derive(Debug)]
pub struct StampSelectionCommand {
    id: CommandId,
    bitmap: Bitmap,
    top_left: IntPoint,
}

impl Command for StampSelectionCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Raster
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        ctx.dc().blit(&self.bitmap, self.top_left);
    }

    fn name(&self) -> String {
        "Stamp Selection".to_string()
    }
}

/// Stamps the floating selection of `ctx` in place, or `None` if the
/// selection is not floating.
pub fn stamp_selection_command(ctx: &dyn CommandContext) -> Option<Box<dyn Command>> {
    let selection = ctx.raster_selection();
    let bitmap = selection.floating_bitmap()?.clone();
    let top_left = selection.top_left()?;
    Some(Box::new(StampSelectionCommand {
        id: CommandId::next(),
        bitmap,
        top_left,
    }))
}

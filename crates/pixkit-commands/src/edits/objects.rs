//! Adding and removing whole vector objects.

use pixkit_core::{ObjectId, VectorObject};
use tracing::warn;

use crate::command::{Command, CommandId, CommandType};
use crate::context::CommandContext;

/// Adds an object on top of the frame's objects.
#[derive(Debug)]
pub struct AddObjectCommand {
    id: CommandId,
    object: ObjectId,
    /// Holds the object while it is not in the frame.
    pending: Option<VectorObject>,
    name: String,
}

impl AddObjectCommand {
    pub fn new(object: VectorObject) -> Self {
        let name = format!("Add {}", object.kind);
        Self {
            id: CommandId::next(),
            object: object.id(),
            pending: Some(object),
            name,
        }
    }
}

impl Command for AddObjectCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Object
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        if let Some(object) = self.pending.take() {
            let top = ctx.objects().len();
            ctx.insert_object(top, object);
        }
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        self.pending = ctx.remove_object(self.object).map(|(_, obj)| obj);
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Removes an object, restoring it at its z-position on undo.
#[derive(Debug)]
pub struct DeleteObjectCommand {
    id: CommandId,
    object: ObjectId,
    removed: Option<(usize, VectorObject)>,
    name: String,
}

impl DeleteObjectCommand {
    pub fn new(object: &VectorObject) -> Self {
        Self {
            id: CommandId::next(),
            object: object.id(),
            removed: None,
            name: format!("Delete {}", object.kind),
        }
    }
}

impl Command for DeleteObjectCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Object
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        self.removed = ctx.remove_object(self.object);
        if self.removed.is_none() {
            warn!(object = %self.object, "delete of missing object");
        }
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        if let Some((index, object)) = self.removed.take() {
            ctx.insert_object(index, object);
        }
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

//! Point insertion and movement on vector objects.

use pixkit_core::{ObjectId, Point, VectorObject};
use tracing::warn;

use crate::bunch::command_bunch;
use crate::command::{AsAny, Command, CommandId, CommandType};
use crate::conditions::AppendOnceIfType;
use crate::context::CommandContext;

/// Inserts a control point into an object.
#[derive(Debug)]
pub struct AddPointCommand {
    id: CommandId,
    object: ObjectId,
    index: usize,
    point: Point,
}

impl AddPointCommand {
    pub fn new(object: &VectorObject, index: usize, point: Point) -> Self {
        Self {
            id: CommandId::next(),
            object: object.id(),
            index,
            point,
        }
    }
}

impl Command for AddPointCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Object
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        let inserted = ctx
            .object_mut(self.object)
            .is_some_and(|obj| obj.insert_point(self.index, self.point));
        if !inserted {
            warn!(object = %self.object, index = self.index, "could not insert point");
        }
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        if let Some(obj) = ctx.object_mut(self.object) {
            obj.remove_point(self.index);
        }
    }

    fn name(&self) -> String {
        "Add Point".to_string()
    }
}

/// Moves one control point of an object.
#[derive(Debug)]
pub struct MovePointCommand {
    id: CommandId,
    object: ObjectId,
    index: usize,
    new_pos: Point,
    old_pos: Point,
}

impl MovePointCommand {
    pub fn new(object: &VectorObject, index: usize, new_pos: Point) -> Self {
        let old_pos = object.points.get(index).copied().unwrap_or(new_pos);
        Self {
            id: CommandId::next(),
            object: object.id(),
            index,
            new_pos,
            old_pos,
        }
    }

    /// For a point that does not exist yet, e.g. one inserted by the same
    /// gesture, with `old_pos` as its starting position.
    pub fn with_old(object: ObjectId, index: usize, new_pos: Point, old_pos: Point) -> Self {
        Self {
            id: CommandId::next(),
            object,
            index,
            new_pos,
            old_pos,
        }
    }

    fn place(&self, ctx: &mut dyn CommandContext, pos: Point) {
        let moved = ctx
            .object_mut(self.object)
            .is_some_and(|obj| obj.set_point(self.index, pos));
        if !moved {
            warn!(object = %self.object, index = self.index, "could not move point");
        }
    }
}

impl Command for MovePointCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Object
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        self.place(ctx, self.new_pos);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        self.place(ctx, self.old_pos);
    }

    fn name(&self) -> String {
        "Move Point".to_string()
    }

    fn should_merge(&self, candidate: &dyn Command, same_frame: bool) -> bool {
        same_frame
            && candidate
                .as_any()
                .downcast_ref::<MovePointCommand>()
                .is_some_and(|other| other.object == self.object && other.index == self.index)
    }

    fn merge(&mut self, candidate: Box<dyn Command>) {
        match candidate.into_any().downcast::<MovePointCommand>() {
            Ok(other) => self.new_pos = other.new_pos,
            Err(_) => panic!("'Move Point' merged with a foreign command"),
        }
    }
}

/// Inserts a point into `object`, as the first step of a gesture that then
/// drags the new point. The first following [`MovePointCommand`] is
/// appended so inserting and placing the point undo together.
pub fn appending_insert_point_command(
    object: &VectorObject,
    index: usize,
    point: Point,
) -> Box<dyn Command> {
    let add: Box<dyn Command> = Box::new(AddPointCommand::new(object, index, point));
    command_bunch(
        "Add Point",
        vec![add],
        Some(Box::new(AppendOnceIfType::<MovePointCommand>::new())),
    )
}

//! Commands replacing the control points of vector objects.

use pixkit_core::{collective_name, ObjectId, Point, Scale, VectorObject};
use tracing::warn;

use crate::bunch::{command_bunch, perhaps_bunched};
use crate::command::{AsAny, Command, CommandId, CommandType};
use crate::conditions::MergeIfSameObjects;
use crate::context::CommandContext;

/// Whether a [`SetPointsCommand`] absorbs later point changes of the same
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    #[default]
    Solitary,
    /// Merges later sociable point changes of the same object, keeping the
    /// first old points and the last new points.
    Sociable,
}

#[derive(Debug)]
pub struct SetPointsCommand {
    id: CommandId,
    object: ObjectId,
    new_points: Vec<Point>,
    old_points: Vec<Point>,
    name: String,
    mode: MergeMode,
}

impl SetPointsCommand {
    pub fn object(&self) -> ObjectId {
        self.object
    }

    fn write(ctx: &mut dyn CommandContext, object: ObjectId, points: &[Point]) {
        match ctx.object_mut(object) {
            Some(obj) => obj.points = points.to_vec(),
            None => warn!(object = %object, "point change for missing object"),
        }
    }
}

impl Command for SetPointsCommand {
    fn command_type(&self) -> CommandType {
        CommandType::Object
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        Self::write(ctx, self.object, &self.new_points);
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        Self::write(ctx, self.object, &self.old_points);
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn should_merge(&self, candidate: &dyn Command, same_frame: bool) -> bool {
        if !same_frame || self.mode != MergeMode::Sociable {
            return false;
        }
        candidate
            .as_any()
            .downcast_ref::<SetPointsCommand>()
            .is_some_and(|other| other.mode == MergeMode::Sociable && other.object == self.object)
    }

    fn merge(&mut self, candidate: Box<dyn Command>) {
        match candidate.into_any().downcast::<SetPointsCommand>() {
            Ok(other) => self.new_points = other.new_points,
            Err(_) => panic!("'{}' merged with a foreign command", self.name),
        }
    }
}

/// Replaces the points of `object` with `new_points`.
pub fn set_points_command(
    object: &VectorObject,
    new_points: Vec<Point>,
    name: impl Into<String>,
    mode: MergeMode,
) -> Box<dyn Command> {
    Box::new(SetPointsCommand {
        id: CommandId::next(),
        object: object.id(),
        new_points,
        old_points: object.points.clone(),
        name: name.into(),
        mode,
    })
}

fn mapped(object: &VectorObject, f: impl Fn(Point) -> Point) -> Vec<Point> {
    object.points.iter().map(|p| f(*p)).collect()
}

/// Moves `objects` by `delta`. Repeated offsets of the same objects merge
/// into one step.
///
/// # Panics
///
/// If `objects` is empty.
pub fn offset_objects_command(objects: &[&VectorObject], delta: Point) -> Box<dyn Command> {
    let name = format!("Offset {}", collective_name(objects));
    let commands = objects
        .iter()
        .map(|obj| set_points_command(obj, mapped(obj, |p| p + delta), name.clone(), MergeMode::Sociable))
        .collect();
    let ids = objects.iter().map(|o| o.id()).collect();
    command_bunch(name, commands, Some(Box::new(MergeIfSameObjects::new(ids))))
}

/// Scales `objects` by `scale` around `origin`.
///
/// # Panics
///
/// If `objects` is empty.
pub fn scale_objects_command(
    objects: &[&VectorObject],
    scale: Scale,
    origin: Point,
) -> Box<dyn Command> {
    let name = format!("Scale {}", collective_name(objects));
    let commands = objects
        .iter()
        .map(|obj| {
            set_points_command(
                obj,
                mapped(obj, |p| p.scaled(scale, origin)),
                name.clone(),
                MergeMode::Solitary,
            )
        })
        .collect();
    perhaps_bunched(name, commands)
}

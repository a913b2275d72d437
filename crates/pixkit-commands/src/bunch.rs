//! Composite commands.

use pixkit_core::Point;

use crate::command::{collective_type, AsAny, Command, CommandId, CommandType};
use crate::context::CommandContext;

/// Decides whether a [`CommandBunch`] absorbs later commands.
pub trait MergeCondition: AsAny {
    /// Whether `candidate` should be appended to the bunch as a new child.
    fn should_append(&self, candidate: &dyn Command) -> bool;

    /// Whether a bunch carrying `other` may be merged child by child into
    /// the bunch carrying this condition.
    fn satisfied(&self, other: &dyn MergeCondition) -> bool;

    /// Whether the bunch takes the name of commands merged into it.
    fn assume_name(&self) -> bool;

    /// Called after a candidate was appended.
    fn notify_appended(&mut self);
}

/// A sequence of commands acting as one.
pub struct CommandBunch {
    id: CommandId,
    kind: CommandType,
    commands: Vec<Box<dyn Command>>,
    name: Option<String>,
    condition: Option<Box<dyn MergeCondition>>,
}

impl CommandBunch {
    /// # Panics
    ///
    /// If `commands` is empty.
    pub fn new(
        kind: CommandType,
        name: Option<String>,
        commands: Vec<Box<dyn Command>>,
        condition: Option<Box<dyn MergeCondition>>,
    ) -> Self {
        assert!(!commands.is_empty(), "a command bunch needs at least one command");
        Self {
            id: CommandId::next(),
            kind,
            commands,
            name: name.filter(|n| !n.is_empty()),
            condition,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    fn can_merge_children(&self, other: &CommandBunch) -> bool {
        let (Some(mine), Some(theirs)) = (&self.condition, &other.condition) else {
            return false;
        };
        self.commands.len() == other.commands.len()
            && mine.satisfied(theirs.as_ref())
            && theirs.satisfied(mine.as_ref())
            && self
                .commands
                .iter()
                .zip(&other.commands)
                .all(|(a, b)| a.should_merge(b.as_ref(), true))
    }

    fn takes_names(&self) -> bool {
        self.condition.as_ref().is_some_and(|c| c.assume_name())
    }
}

impl Command for CommandBunch {
    fn command_type(&self) -> CommandType {
        self.kind
    }

    fn id(&self) -> CommandId {
        self.id
    }

    fn execute(&mut self, ctx: &mut dyn CommandContext) {
        for cmd in &mut self.commands {
            cmd.execute(ctx);
        }
    }

    fn execute_raster(&mut self, ctx: &mut dyn CommandContext) {
        for cmd in &mut self.commands {
            cmd.execute_raster(ctx);
        }
    }

    fn undo(&mut self, ctx: &mut dyn CommandContext) {
        for cmd in self.commands.iter_mut().rev() {
            cmd.undo(ctx);
        }
    }

    fn name(&self) -> String {
        match (&self.name, self.commands.last()) {
            (Some(name), _) => name.clone(),
            (None, Some(last)) => last.name(),
            (None, None) => String::new(),
        }
    }

    fn should_merge(&self, candidate: &dyn Command, same_frame: bool) -> bool {
        if !same_frame {
            return false;
        }
        let Some(condition) = &self.condition else {
            return false;
        };
        if condition.should_append(candidate) {
            return true;
        }
        candidate
            .as_any()
            .downcast_ref::<CommandBunch>()
            .is_some_and(|other| self.can_merge_children(other))
    }

    fn merge(&mut self, candidate: Box<dyn Command>) {
        let append = self
            .condition
            .as_ref()
            .is_some_and(|c| c.should_append(candidate.as_ref()));
        if append {
            if self.takes_names() {
                self.name = Some(candidate.name());
            }
            self.commands.push(candidate);
            self.kind = collective_type(self.commands.iter().map(|c| c.command_type()));
            if let Some(condition) = &mut self.condition {
                condition.notify_appended();
            }
            return;
        }

        let other = match candidate.into_any().downcast::<CommandBunch>() {
            Ok(other) => *other,
            Err(_) => panic!("bunch '{}' merged with a command it does not accept", self.name()),
        };
        let other_name = other.name();
        for (mine, theirs) in self.commands.iter_mut().zip(other.commands) {
            mine.merge(theirs);
        }
        self.kind = collective_type(self.commands.iter().map(|c| c.command_type()));
        if self.takes_names() {
            self.name = Some(other_name);
        }
    }

    fn translate(&self, p: Point) -> Point {
        self.commands.iter().fold(p, |p, cmd| cmd.translate(p))
    }

    fn undo_translate(&self, p: Point) -> Point {
        self.commands
            .iter()
            .rev()
            .fold(p, |p, cmd| cmd.undo_translate(p))
    }
}

/// Wraps `commands` in a bunch typed after their collective type.
///
/// # Panics
///
/// If `commands` is empty.
pub fn command_bunch(
    name: impl Into<String>,
    commands: Vec<Box<dyn Command>>,
    condition: Option<Box<dyn MergeCondition>>,
) -> Box<dyn Command> {
    let kind = collective_type(commands.iter().map(|c| c.command_type()));
    Box::new(CommandBunch::new(kind, Some(name.into()), commands, condition))
}

/// Returns the single command unchanged, or a bunch of several.
///
/// # Panics
///
/// If `commands` is empty.
pub fn perhaps_bunched(
    name: impl Into<String>,
    mut commands: Vec<Box<dyn Command>>,
) -> Box<dyn Command> {
    if commands.len() == 1 {
        if let Some(only) = commands.pop() {
            return only;
        }
    }
    command_bunch(name, commands, None)
}

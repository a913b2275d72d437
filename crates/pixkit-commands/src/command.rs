//! The command contract.
//!
//! Every user-visible edit is a [`Command`]. Commands are classified by
//! [`CommandType`], which tells the history how a command can be undone:
//! object commands reverse themselves exactly, raster commands are undone by
//! reverting the frame to its stored original bitmap and replaying the raster
//! effect of every earlier command on that frame, and the hybrid and
//! selection kinds combine both.

use std::any::Any;
use std::fmt;

use pixkit_core::{sequential_id, Point};

use crate::context::CommandContext;

sequential_id!(
    /// Identity of a command, stable across merges into it.
    CommandId
);

/// How a command affects a frame and how it is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// Pure pixel edit, undone by revert-and-replay.
    Raster,
    /// Pure vector object edit, undone exactly.
    Object,
    /// Edits both objects and pixels.
    Hybrid,
    /// Edits the raster selection.
    Selection,
    /// Adds, removes or reorders frames, or changes frame properties.
    Frame,
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster => write!(f, "raster"),
            Self::Object => write!(f, "object"),
            Self::Hybrid => write!(f, "hybrid"),
            Self::Selection => write!(f, "selection"),
            Self::Frame => write!(f, "frame"),
        }
    }
}

/// True if `undo` alone restores the state before the command.
pub fn fully_reversible(kind: CommandType) -> bool {
    matches!(kind, CommandType::Object | CommandType::Frame)
}

/// True if the command has an `undo` with any effect at all.
pub fn somewhat_reversible(kind: CommandType) -> bool {
    kind != CommandType::Raster
}

/// True if the command changes pixels, so the history must store an
/// original bitmap for its frame before running it.
pub fn affects_raster(kind: CommandType) -> bool {
    matches!(kind, CommandType::Raster | CommandType::Hybrid)
}

/// The type describing a group of commands: the shared type if all agree,
/// otherwise [`CommandType::Hybrid`].
pub fn collective_type(kinds: impl IntoIterator<Item = CommandType>) -> CommandType {
    let mut kinds = kinds.into_iter();
    let Some(first) = kinds.next() else {
        return CommandType::Hybrid;
    };
    if kinds.all(|k| k == first) {
        first
    } else {
        CommandType::Hybrid
    }
}

/// Upcasting to [`Any`] for trait objects, used to recognize concrete
/// command and merge-condition types behind `dyn` pointers.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A reversible edit of a frame.
///
/// Implementors provide `command_type`, `id`, `execute` and `name`. The
/// defaults suit a command that never merges, has no alternate form and does
/// not move the image origin.
pub trait Command: AsAny {
    fn command_type(&self) -> CommandType;

    fn id(&self) -> CommandId;

    /// Performs the full effect of the command.
    fn execute(&mut self, ctx: &mut dyn CommandContext);

    /// Performs only the pixel effect. Called when replaying history after a
    /// raster undo, with the frame already reverted to its original.
    ///
    /// Raster commands replay `execute`; object, selection and frame
    /// commands have no pixel effect. Hybrid commands must override this.
    fn execute_raster(&mut self, ctx: &mut dyn CommandContext) {
        match self.command_type() {
            CommandType::Raster => self.execute(ctx),
            CommandType::Object | CommandType::Selection | CommandType::Frame => {}
            CommandType::Hybrid => panic!(
                "hybrid command '{}' does not implement execute_raster",
                self.name()
            ),
        }
    }

    /// Reverses the non-pixel effect of the command.
    fn undo(&mut self, _ctx: &mut dyn CommandContext) {}

    /// The name shown for the command in undo/redo menus.
    fn name(&self) -> String;

    /// Whether `candidate`, which has just been executed, can be folded into
    /// this command. `same_frame` tells if both target the same frame.
    fn should_merge(&self, _candidate: &dyn Command, _same_frame: bool) -> bool {
        false
    }

    /// Folds `candidate` into this command. Only called after
    /// `should_merge` accepted it.
    fn merge(&mut self, candidate: Box<dyn Command>) {
        panic!(
            "command '{}' cannot merge '{}'",
            self.name(),
            candidate.name()
        );
    }

    /// Whether an alternate interpretation is available through [`dwim`].
    ///
    /// [`dwim`]: Command::dwim
    fn has_dwim(&self) -> bool {
        false
    }

    /// The alternate interpretation of this command.
    fn dwim(&self) -> Box<dyn Command> {
        panic!("command '{}' has no alternate form", self.name());
    }

    /// False for commands that do not make the document dirty, e.g.
    /// selection changes.
    fn modifies_state(&self) -> bool {
        true
    }

    /// Maps a view point through the coordinate change caused by the command.
    fn translate(&self, p: Point) -> Point {
        p
    }

    /// Maps a view point back through the coordinate change of the command.
    fn undo_translate(&self, p: Point) -> Point {
        p
    }
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("type", &self.command_type())
            .field("id", &self.id())
            .finish()
    }
}

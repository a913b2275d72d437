//! Entries of the undo and redo lists.

use pixkit_core::FrameId;

use crate::command::Command;

/// A history entry: a group bracket or an executed command with the frame
/// it was applied to.
#[derive(Debug)]
pub enum OldCommand {
    OpenGroup,
    /// Closes a group, with the name to show for the whole group if given.
    CloseGroup(Option<String>),
    Normal {
        command: Box<dyn Command>,
        frame: FrameId,
    },
}

impl OldCommand {
    pub fn new(command: Box<dyn Command>, frame: FrameId) -> Self {
        OldCommand::Normal { command, frame }
    }

    pub fn is_open_group(&self) -> bool {
        matches!(self, OldCommand::OpenGroup)
    }

    pub fn is_close_group(&self) -> bool {
        matches!(self, OldCommand::CloseGroup(_))
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, OldCommand::Normal { .. })
    }

    pub fn command(&self) -> Option<&dyn Command> {
        match self {
            OldCommand::Normal { command, .. } => Some(command.as_ref()),
            _ => None,
        }
    }

    pub fn frame(&self) -> Option<FrameId> {
        match self {
            OldCommand::Normal { frame, .. } => Some(*frame),
            _ => None,
        }
    }

    /// Whether `candidate` can be merged into this entry.
    pub fn should_merge(&self, candidate: &OldCommand) -> bool {
        match (self, candidate) {
            (
                OldCommand::Normal { command, frame },
                OldCommand::Normal {
                    command: other,
                    frame: other_frame,
                },
            ) => frame == other_frame && command.should_merge(other.as_ref(), true),
            _ => false,
        }
    }

    /// Merges `candidate` into this entry if both are commands and the
    /// command accepts it, otherwise hands the candidate back.
    pub fn merge(&mut self, candidate: OldCommand) -> Result<(), OldCommand> {
        if !self.should_merge(&candidate) {
            return Err(candidate);
        }
        match (self, candidate) {
            (OldCommand::Normal { command, .. }, OldCommand::Normal { command: other, .. }) => {
                command.merge(other);
                Ok(())
            }
            (_, candidate) => Err(candidate),
        }
    }
}

//! # PixKit Commands
//!
//! The command engine of PixKit. Every edit of a document is a
//! [`Command`] applied through a [`CommandHistory`], which makes it
//! undoable, merges related edits into single steps and groups bundles of
//! edits.
//!
//! ## Modules
//! - `command`: the command contract and command types
//! - `context`: what a command may edit
//! - `bitmap_cmd`: bitmap operations and their frame adapters
//! - `bunch`: composite commands and merge conditions
//! - `history`: undo/redo lists with raster revert-and-replay
//! - `editor`: the editing session host
//! - `edits`: concrete edit commands

pub mod bitmap_cmd;
pub mod bunch;
pub mod command;
pub mod conditions;
pub mod context;
pub mod document;
pub mod editor;
pub mod edits;
pub mod history;
pub mod old_command;

pub use bitmap_cmd::{
    fill_command, function_command, target_floating_selection, target_full_image,
    target_rectangle, BitmapCommand,
};
pub use bunch::{command_bunch, perhaps_bunched, CommandBunch, MergeCondition};
pub use command::{
    affects_raster, collective_type, fully_reversible, somewhat_reversible, AsAny, Command,
    CommandId, CommandType,
};
pub use conditions::{AppendIfMoveSelection, AppendOnceIfType, AppendWhile, MergeIfSameObjects};
pub use context::CommandContext;
pub use document::Document;
pub use editor::Editor;
pub use history::{CommandHistory, HistoryConfig, StepOutcome};
pub use old_command::OldCommand;

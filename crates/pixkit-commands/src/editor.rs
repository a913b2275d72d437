//! The editing session: a document, its history and the view anchor.

use pixkit_core::{Color, FrameId, IntSize, Point, Result};
use tracing::info;

use crate::command::{Command, CommandId};
use crate::document::Document;
use crate::history::{CommandHistory, HistoryConfig, StepOutcome};

/// Runs commands against a document and keeps them undoable.
#[derive(Debug)]
pub struct Editor {
    document: Document,
    history: CommandHistory,
    /// A view point, e.g. the scroll position, kept stable across commands
    /// that move the image origin.
    view_anchor: Point,
    saved: Option<CommandId>,
}

impl Editor {
    pub fn new(document: Document, config: HistoryConfig) -> Self {
        Self {
            document,
            history: CommandHistory::new(config),
            view_anchor: Point::default(),
            saved: None,
        }
    }

    /// An editor on a blank single-frame document.
    pub fn blank(size: IntSize, bg: Color, config: HistoryConfig) -> Result<Self> {
        Ok(Self::new(Document::new(size, bg)?, config))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access for changes outside the history, such as
    /// adding frames or switching the active one.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Runs `command` on the active frame.
    pub fn run_command(&mut self, command: Box<dyn Command>) -> StepOutcome {
        let frame = self.document.active_id();
        self.apply(command, frame)
    }

    /// Runs `command` on `frame`, which need not be the active frame.
    pub fn run_command_on(&mut self, command: Box<dyn Command>, frame: FrameId) -> Result<StepOutcome> {
        self.document.set_target(frame)?;
        Ok(self.apply(command, frame))
    }

    fn apply(&mut self, command: Box<dyn Command>, frame: FrameId) -> StepOutcome {
        self.history.apply(&mut self.document, command, frame, &mut self.view_anchor)
    }

    pub fn open_undo_bundle(&mut self) {
        self.history.open_undo_bundle();
    }

    pub fn close_undo_bundle(&mut self, name: Option<String>) {
        self.history.close_undo_bundle(&mut self.document, name);
    }

    pub fn undo(&mut self) -> Option<StepOutcome> {
        self.history.undo(&mut self.document, &mut self.view_anchor)
    }

    pub fn redo(&mut self) -> Option<StepOutcome> {
        self.history.redo(&mut self.document, &mut self.view_anchor)
    }

    /// Replaces the newest command with its alternate interpretation.
    pub fn apply_dwim(&mut self) -> Option<StepOutcome> {
        let outcome = self.history.apply_dwim(&mut self.document, &mut self.view_anchor)?;
        info!(frame = %outcome.frame, "applied alternate command");
        Some(outcome)
    }

    /// Point of the active frame kept in view. Commands that resize the
    /// active frame move it along, including each command of a group.
    pub fn view_anchor(&self) -> Point {
        self.view_anchor
    }

    pub fn set_view_anchor(&mut self, anchor: Point) {
        self.view_anchor = anchor;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_name(&self) -> Option<String> {
        self.history.undo_name(&self.document)
    }

    pub fn redo_name(&self) -> Option<String> {
        self.history.redo_name(&self.document)
    }

    /// Records the current history position as saved.
    pub fn mark_saved(&mut self) {
        self.saved = self.history.last_modifying();
    }

    /// Whether the document changed since the last [`Editor::mark_saved`].
    ///
    /// A merged command keeps the id of the command it merged into, so
    /// merging into the saved command leaves the editor clean.
    pub fn is_dirty(&self) -> bool {
        self.history.last_modifying() != self.saved
    }
}

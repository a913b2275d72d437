//! Undo/redo history.
//!
//! Commands are applied through [`CommandHistory::apply`], which executes
//! them against a [`Document`], stores them in the undo list and merges them
//! into the previous entry when that entry accepts them.
//!
//! Raster effects cannot be reversed by the commands themselves. Before the
//! first pixel-changing command on a frame the history stores that frame's
//! bitmap as its original. Undoing a command that is not fully reversible
//! reverts the frame to its original and replays the pixel effect of every
//! remaining command on that frame, oldest first.
//!
//! Every step also carries a view anchor, a point in the active frame's
//! image coordinates. Commands that change the size of the active frame map
//! it through [`Command::translate`] when run and
//! [`Command::undo_translate`] when undone.

use pixkit_core::{FrameId, Point};
use tracing::{debug, trace, warn};

use crate::command::{
    affects_raster, fully_reversible, somewhat_reversible, Command, CommandId, CommandType,
};
use crate::context::CommandContext;
use crate::document::Document;
use crate::old_command::OldCommand;

/// Behaviour knobs of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of undo steps, `0` for no limit.
    pub undo_limit: usize,
    /// Whether new commands may merge into the previous one.
    pub merge_commands: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            undo_limit: 0,
            merge_commands: true,
        }
    }
}

/// What a history step did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// The frame the step was applied to.
    pub frame: FrameId,
    /// Whether the frame's image size changed.
    pub size_changed: bool,
    /// Whether the step was folded into the previous entry.
    pub merged: bool,
}

#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_list: Vec<OldCommand>,
    /// Top of the stack is the next entry to redo.
    redo_list: Vec<OldCommand>,
    bundle_open: bool,
    config: HistoryConfig,
}

impl CommandHistory {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Executes `command` on `frame` and records it. Clears the redo list.
    ///
    /// # Panics
    ///
    /// If `frame` is not part of `doc`.
    pub fn apply(
        &mut self,
        doc: &mut Document,
        mut command: Box<dyn Command>,
        frame: FrameId,
        anchor: &mut Point,
    ) -> StepOutcome {
        debug!(command = %command.name(), kind = %command.command_type(), frame = %frame, "apply");
        let size_changed = run(doc, command.as_mut(), frame, anchor);
        self.redo_list.clear();

        let entry = OldCommand::new(command, frame);
        let merged = if self.bundle_open || !self.config.merge_commands {
            self.undo_list.push(entry);
            false
        } else {
            self.push_or_merge(entry)
        };
        if !self.bundle_open {
            self.enforce_limit(doc);
        }
        StepOutcome {
            frame,
            size_changed,
            merged,
        }
    }

    fn push_or_merge(&mut self, entry: OldCommand) -> bool {
        let entry = match self.undo_list.last_mut() {
            Some(last) => match last.merge(entry) {
                Ok(()) => {
                    trace!("merged into previous entry");
                    return true;
                }
                Err(entry) => entry,
            },
            None => entry,
        };
        self.undo_list.push(entry);
        false
    }

    /// Starts grouping subsequent commands into one undo step.
    ///
    /// # Panics
    ///
    /// If a bundle is already open.
    pub fn open_undo_bundle(&mut self) {
        assert!(!self.bundle_open, "undo bundle is already open");
        self.undo_list.push(OldCommand::OpenGroup);
        self.bundle_open = true;
    }

    /// Ends the open bundle. An empty bundle leaves no trace and a bundle of
    /// one command is stored as that command alone.
    ///
    /// # Panics
    ///
    /// If no bundle is open.
    pub fn close_undo_bundle(&mut self, doc: &mut Document, name: Option<String>) {
        assert!(self.bundle_open, "no undo bundle to close");
        self.bundle_open = false;

        let len = self.undo_list.len();
        if self.undo_list.last().is_some_and(OldCommand::is_open_group) {
            self.undo_list.pop();
            return;
        }
        if len >= 2 && self.undo_list[len - 2].is_open_group() {
            if let Some(single) = self.undo_list.pop() {
                self.undo_list.pop();
                if self.config.merge_commands {
                    self.push_or_merge(single);
                } else {
                    self.undo_list.push(single);
                }
            }
        } else {
            self.undo_list.push(OldCommand::CloseGroup(name));
        }
        self.enforce_limit(doc);
    }

    pub fn bundle_open(&self) -> bool {
        self.bundle_open
    }

    pub fn can_undo(&self) -> bool {
        !self.bundle_open && self.undo_list.last().is_some_and(|e| !e.is_open_group())
    }

    pub fn can_redo(&self) -> bool {
        !self.bundle_open && !self.redo_list.is_empty()
    }

    /// Undoes the newest step, a single command or a whole group.
    pub fn undo(&mut self, doc: &mut Document, anchor: &mut Point) -> Option<StepOutcome> {
        if !self.can_undo() {
            return None;
        }
        let entry = self.undo_list.pop()?;
        if entry.is_normal() {
            let outcome = self.undo_entry(doc, entry, anchor);
            return Some(outcome);
        }

        self.redo_list.push(entry);
        let mut last = None;
        let mut size_changed = false;
        while let Some(entry) = self.undo_list.pop() {
            if entry.is_open_group() {
                self.redo_list.push(entry);
                break;
            }
            if entry.is_normal() {
                let outcome = self.undo_entry(doc, entry, anchor);
                size_changed |= outcome.size_changed;
                last = Some(outcome.frame);
            } else {
                warn!("nested undo group");
                self.redo_list.push(entry);
            }
        }
        last.map(|frame| StepOutcome {
            frame,
            size_changed,
            merged: false,
        })
    }

    /// Undoes a popped normal entry and moves it to the redo list.
    fn undo_entry(&mut self, doc: &mut Document, entry: OldCommand, anchor: &mut Point) -> StepOutcome {
        let OldCommand::Normal { mut command, frame } = entry else {
            unreachable!("only command entries are undone individually");
        };
        debug!(command = %command.name(), frame = %frame, "undo");
        let kind = command.command_type();
        target_for(doc, kind, frame);
        let old_size = doc.image_size();
        if somewhat_reversible(kind) {
            command.undo(doc);
        }
        if !fully_reversible(kind) {
            replay_raster(doc, frame, &mut self.undo_list);
        }
        let size_changed = kind != CommandType::Frame && old_size != doc.image_size();
        if size_changed {
            clip_selection(doc);
            if frame == doc.active_id() {
                *anchor = command.undo_translate(*anchor);
            }
        }
        self.redo_list.push(OldCommand::Normal { command, frame });
        StepOutcome {
            frame,
            size_changed,
            merged: false,
        }
    }

    /// Redoes the next step. Redone commands never merge.
    pub fn redo(&mut self, doc: &mut Document, anchor: &mut Point) -> Option<StepOutcome> {
        if !self.can_redo() {
            return None;
        }
        let entry = self.redo_list.pop()?;
        match entry {
            OldCommand::Normal { .. } => Some(self.redo_entry(doc, entry, anchor)),
            OldCommand::OpenGroup => {
                self.undo_list.push(entry);
                let mut last = None;
                let mut size_changed = false;
                while let Some(entry) = self.redo_list.pop() {
                    if entry.is_normal() {
                        let outcome = self.redo_entry(doc, entry, anchor);
                        size_changed |= outcome.size_changed;
                        last = Some(outcome.frame);
                    } else {
                        let closing = entry.is_close_group();
                        self.undo_list.push(entry);
                        if closing {
                            break;
                        }
                    }
                }
                last.map(|frame| StepOutcome {
                    frame,
                    size_changed,
                    merged: false,
                })
            }
            OldCommand::CloseGroup(_) => {
                warn!("redo list starts with a group end");
                self.undo_list.push(entry);
                None
            }
        }
    }

    fn redo_entry(&mut self, doc: &mut Document, entry: OldCommand, anchor: &mut Point) -> StepOutcome {
        let OldCommand::Normal { mut command, frame } = entry else {
            unreachable!("only command entries are redone individually");
        };
        debug!(command = %command.name(), frame = %frame, "redo");
        let size_changed = run(doc, command.as_mut(), frame, anchor);
        self.undo_list.push(OldCommand::Normal { command, frame });
        StepOutcome {
            frame,
            size_changed,
            merged: false,
        }
    }

    /// Replaces the newest command with its alternate interpretation, on the
    /// same frame. Returns `None` if the newest entry has none.
    pub fn apply_dwim(&mut self, doc: &mut Document, anchor: &mut Point) -> Option<StepOutcome> {
        if self.bundle_open {
            return None;
        }
        let (alternate, frame) = match self.undo_list.last() {
            Some(OldCommand::Normal { command, frame }) if command.has_dwim() => {
                (command.dwim(), *frame)
            }
            _ => return None,
        };
        self.undo(doc, anchor)?;
        Some(self.apply(doc, alternate, frame, anchor))
    }

    /// Drops all entries, e.g. after loading a new document.
    pub fn clear(&mut self) {
        self.undo_list.clear();
        self.redo_list.clear();
        self.bundle_open = false;
    }

    /// The newest command that modified the document, used to decide if the
    /// document has unsaved changes.
    pub fn last_modifying(&self) -> Option<CommandId> {
        self.undo_list
            .iter()
            .rev()
            .filter_map(OldCommand::command)
            .find(|c| c.modifies_state())
            .map(|c| c.id())
    }

    /// The command that would be undone next, if it is a single command.
    pub fn next_undo_command(&self) -> Option<&dyn Command> {
        self.undo_list.last().and_then(OldCommand::command)
    }

    /// The command that was undone last, if it was a single command.
    pub fn next_redo_command(&self) -> Option<&dyn Command> {
        self.redo_list.last().and_then(OldCommand::command)
    }

    /// Number of raw entries, group brackets included.
    pub fn len(&self) -> usize {
        self.undo_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_list.is_empty()
    }

    /// Number of undoable steps, each group counting once.
    pub fn undo_depth(&self) -> usize {
        count_steps(self.undo_list.iter())
    }

    pub fn redo_depth(&self) -> usize {
        count_steps(self.redo_list.iter().rev())
    }

    /// Menu name of the next undo step.
    pub fn undo_name(&self, doc: &Document) -> Option<String> {
        if self.bundle_open {
            return None;
        }
        match self.undo_list.last()? {
            OldCommand::OpenGroup => None,
            OldCommand::CloseGroup(Some(name)) => Some(name.clone()),
            OldCommand::CloseGroup(None) => {
                let count = self
                    .undo_list
                    .iter()
                    .rev()
                    .skip(1)
                    .take_while(|e| !e.is_open_group())
                    .filter(|e| e.is_normal())
                    .count();
                Some(group_name(count))
            }
            OldCommand::Normal { command, frame } => Some(command_name(doc, command.as_ref(), *frame)),
        }
    }

    /// Menu name of the next redo step.
    pub fn redo_name(&self, doc: &Document) -> Option<String> {
        if self.bundle_open {
            return None;
        }
        match self.redo_list.last()? {
            OldCommand::OpenGroup => {
                let rest = self.redo_list.iter().rev().skip(1);
                let mut count = 0;
                for entry in rest {
                    match entry {
                        OldCommand::CloseGroup(Some(name)) => return Some(name.clone()),
                        OldCommand::CloseGroup(None) => break,
                        OldCommand::Normal { .. } => count += 1,
                        OldCommand::OpenGroup => {}
                    }
                }
                Some(group_name(count))
            }
            OldCommand::CloseGroup(_) => None,
            OldCommand::Normal { command, frame } => Some(command_name(doc, command.as_ref(), *frame)),
        }
    }

    /// Evicts the oldest steps beyond the undo limit. The pixel effect of an
    /// evicted command is baked into its frame's original so later replays
    /// still start from the right bitmap.
    fn enforce_limit(&mut self, doc: &mut Document) {
        let limit = self.config.undo_limit;
        if limit == 0 {
            return;
        }
        while self.undo_depth() > limit {
            let first = self.undo_list.remove(0);
            if first.is_open_group() {
                while !self.undo_list.is_empty() {
                    let entry = self.undo_list.remove(0);
                    if entry.is_close_group() {
                        break;
                    }
                    bake(doc, entry);
                }
            } else {
                bake(doc, first);
            }
        }
    }
}

/// Executes `command` on `frame`, storing the frame's original first if the
/// command changes pixels. Returns whether the image size changed.
fn run(doc: &mut Document, command: &mut dyn Command, frame: FrameId, anchor: &mut Point) -> bool {
    let kind = command.command_type();
    target_for(doc, kind, frame);
    if kind == CommandType::Frame {
        command.execute(doc);
        return false;
    }
    if affects_raster(kind) && !doc.target_frame().has_stored_original() {
        doc.target_frame_mut().store_as_original();
    }
    let old_size = doc.image_size();
    command.execute(doc);
    let size_changed = old_size != doc.image_size();
    if size_changed {
        clip_selection(doc);
        if frame == doc.active_id() {
            *anchor = command.translate(*anchor);
        }
    }
    size_changed
}

fn target(doc: &mut Document, frame: FrameId) {
    if let Err(err) = doc.set_target(frame) {
        panic!("history refers to a frame missing from the document: {err}");
    }
}

/// Like [`target`], but frame commands may outlive the frame they were run
/// on, e.g. when they removed it. They address frames by index, so the
/// active frame serves as target then.
fn target_for(doc: &mut Document, kind: CommandType, frame: FrameId) {
    if kind == CommandType::Frame && doc.frame_index(frame).is_none() {
        let active = doc.active_id();
        target(doc, active);
    } else {
        target(doc, frame);
    }
}

fn clip_selection(doc: &mut Document) {
    let bounds = doc.target_frame().rect();
    doc.raster_selection_mut().clip(bounds);
}

/// Reverts `frame` to its original and reapplies the pixel effects of the
/// commands in `entries` that target it.
fn replay_raster(doc: &mut Document, frame: FrameId, entries: &mut [OldCommand]) {
    target(doc, frame);
    if !doc.target_frame_mut().revert() {
        return;
    }
    for entry in entries.iter_mut() {
        if let OldCommand::Normal {
            command,
            frame: entry_frame,
        } = entry
        {
            if *entry_frame == frame {
                trace!(command = %command.name(), "replay");
                command.execute_raster(doc);
            }
        }
    }
}

/// Folds the pixel effect of an evicted entry into its frame's original.
fn bake(doc: &mut Document, entry: OldCommand) {
    let OldCommand::Normal { mut command, frame } = entry else {
        return;
    };
    if !affects_raster(command.command_type()) {
        return;
    }
    if doc.frame_index(frame).is_none() {
        warn!(command = %command.name(), frame = %frame, "evicted command's frame was removed");
        return;
    }
    target(doc, frame);
    let current = doc.bitmap().clone();
    if !doc.target_frame_mut().revert() {
        return;
    }
    command.execute_raster(doc);
    doc.target_frame_mut().store_as_original();
    doc.set_bitmap(current);
    debug!(command = %command.name(), frame = %frame, "evicted from history");
}

fn count_steps<'a>(entries: impl Iterator<Item = &'a OldCommand>) -> usize {
    let mut steps = 0;
    let mut depth = 0usize;
    for entry in entries {
        match entry {
            OldCommand::OpenGroup => depth += 1,
            OldCommand::CloseGroup(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    steps += 1;
                }
            }
            OldCommand::Normal { .. } if depth == 0 => steps += 1,
            OldCommand::Normal { .. } => {}
        }
    }
    steps
}

fn group_name(count: usize) -> String {
    format!("Grouped Commands ({count})")
}

fn command_name(doc: &Document, command: &dyn Command, frame: FrameId) -> String {
    if frame == doc.active_id() || command.command_type() == CommandType::Frame {
        return command.name();
    }
    match doc.frame_index(frame) {
        Some(index) => format!("{} (Frame: {})", command.name(), index + 1),
        None => command.name(),
    }
}


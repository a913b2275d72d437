//! Merge conditions for [`CommandBunch`](crate::bunch::CommandBunch).

use std::any::Any;
use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;

use pixkit_core::ObjectId;

use crate::bunch::MergeCondition;
use crate::command::{AsAny, Command};
use crate::edits::selection::MoveRasterSelectionCommand;

/// Appends every candidate while a shared flag is set, e.g. while the
/// mouse button is held during a brush stroke.
pub struct AppendWhile {
    active: Rc<Cell<bool>>,
    appended: usize,
}

impl AppendWhile {
    pub fn new(active: Rc<Cell<bool>>) -> Self {
        Self {
            active,
            appended: 0,
        }
    }

    /// Number of commands appended so far.
    pub fn appended(&self) -> usize {
        self.appended
    }
}

impl MergeCondition for AppendWhile {
    fn should_append(&self, _candidate: &dyn Command) -> bool {
        self.active.get()
    }

    fn satisfied(&self, _other: &dyn MergeCondition) -> bool {
        false
    }

    fn assume_name(&self) -> bool {
        false
    }

    fn notify_appended(&mut self) {
        self.appended += 1;
    }
}

/// Appends exactly one command of type `T`, then nothing more.
pub struct AppendOnceIfType<T> {
    appended: bool,
    marker: PhantomData<fn() -> T>,
}

impl<T: Any> AppendOnceIfType<T> {
    pub fn new() -> Self {
        Self {
            appended: false,
            marker: PhantomData,
        }
    }
}

impl<T: Any> Default for AppendOnceIfType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Any> MergeCondition for AppendOnceIfType<T> {
    fn should_append(&self, candidate: &dyn Command) -> bool {
        !self.appended && candidate.as_any().is::<T>()
    }

    fn satisfied(&self, _other: &dyn MergeCondition) -> bool {
        false
    }

    fn assume_name(&self) -> bool {
        false
    }

    fn notify_appended(&mut self) {
        self.appended = true;
    }
}

/// Merges bunches that act on the same objects, so that e.g. repeated
/// nudges of one selection collapse into a single step.
pub struct MergeIfSameObjects {
    objects: Vec<ObjectId>,
}

impl MergeIfSameObjects {
    pub fn new(objects: Vec<ObjectId>) -> Self {
        Self { objects }
    }
}

impl MergeCondition for MergeIfSameObjects {
    fn should_append(&self, _candidate: &dyn Command) -> bool {
        false
    }

    fn satisfied(&self, other: &dyn MergeCondition) -> bool {
        other
            .as_any()
            .downcast_ref::<MergeIfSameObjects>()
            .is_some_and(|other| other.objects == self.objects)
    }

    fn assume_name(&self) -> bool {
        false
    }

    fn notify_appended(&mut self) {}
}

/// Appends moves of the raster selection, so placing a selection and then
/// dragging it undoes as one step.
#[derive(Default)]
pub struct AppendIfMoveSelection;

impl MergeCondition for AppendIfMoveSelection {
    fn should_append(&self, candidate: &dyn Command) -> bool {
        candidate.as_any().is::<MoveRasterSelectionCommand>()
    }

    fn satisfied(&self, _other: &dyn MergeCondition) -> bool {
        false
    }

    fn assume_name(&self) -> bool {
        true
    }

    fn notify_appended(&mut self) {}
}

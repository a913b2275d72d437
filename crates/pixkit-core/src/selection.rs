//! Raster selection state.

use crate::bitmap::Bitmap;
use crate::geo::{IntPoint, IntRect};

/// The states a raster selection can be in.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    Empty,
    /// A region of the image is selected in place.
    Rectangle(IntRect),
    /// Selected pixels lifted into a movable buffer.
    Floating {
        bitmap: Bitmap,
        top_left: IntPoint,
        /// The region the pixels were lifted from, if they came from the
        /// image rather than being pasted.
        source: Option<IntRect>,
    },
}

impl SelectionState {
    pub fn floating(bitmap: Bitmap, top_left: IntPoint) -> Self {
        SelectionState::Floating {
            bitmap,
            top_left,
            source: None,
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, SelectionState::Floating { .. })
    }
}

/// The raster selection of a frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterSelection {
    state: SelectionState,
}

impl RasterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn set_state(&mut self, state: SelectionState) {
        self.state = state;
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, SelectionState::Empty)
    }

    pub fn is_floating(&self) -> bool {
        self.state.is_floating()
    }

    /// The selected rectangle; for floating selections the area currently
    /// covered by the floating pixels.
    pub fn rect(&self) -> Option<IntRect> {
        match &self.state {
            SelectionState::Empty => None,
            SelectionState::Rectangle(r) => Some(*r),
            SelectionState::Floating {
                bitmap, top_left, ..
            } => Some(IntRect::from_parts(*top_left, bitmap.size())),
        }
    }

    pub fn top_left(&self) -> Option<IntPoint> {
        self.rect().map(|r| r.top_left())
    }

    pub fn floating_bitmap(&self) -> Option<&Bitmap> {
        match &self.state {
            SelectionState::Floating { bitmap, .. } => Some(bitmap),
            _ => None,
        }
    }

    /// Replaces the floating pixels, keeping the source region. Turns any
    /// other state into a floating selection without a source.
    pub fn set_floating_bitmap(&mut self, bitmap: Bitmap, top_left: IntPoint) {
        let source = match &self.state {
            SelectionState::Floating { source, .. } => *source,
            _ => None,
        };
        self.state = SelectionState::Floating {
            bitmap,
            top_left,
            source,
        };
    }

    /// Moves the selection so its top left corner is at `pos`.
    pub fn move_to(&mut self, pos: IntPoint) {
        match &mut self.state {
            SelectionState::Empty => {}
            SelectionState::Rectangle(r) => {
                r.x = pos.x;
                r.y = pos.y;
            }
            SelectionState::Floating { top_left, .. } => *top_left = pos,
        }
    }

    pub fn offset(&mut self, delta: IntPoint) {
        if let Some(pos) = self.top_left() {
            self.move_to(pos + delta);
        }
        if let SelectionState::Floating {
            source: Some(src), ..
        } = &mut self.state
        {
            *src = src.translated(delta);
        }
    }

    /// Clips an in-place selection to `bounds`, deselecting if nothing
    /// remains. Floating selections may extend past the image and are left
    /// untouched.
    pub fn clip(&mut self, bounds: IntRect) {
        if let SelectionState::Rectangle(r) = self.state {
            let clipped = r.intersection(&bounds);
            self.state = if clipped.is_empty() {
                SelectionState::Empty
            } else {
                SelectionState::Rectangle(clipped)
            };
        }
    }
}

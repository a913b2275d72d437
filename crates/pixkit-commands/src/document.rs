//! A multi-frame document and its command context.

use pixkit_core::{
    Bitmap, Color, DrawingSurface, Error, Frame, FrameId, IntPoint, IntSize, ObjectId,
    RasterSelection, Result, VectorObject, DEFAULT_MAX_PIXELS,
};

use crate::context::CommandContext;

/// The frames of an image, one of them active, and the frame commands are
/// currently applied to.
#[derive(Debug, Clone)]
pub struct Document {
    frames: Vec<Frame>,
    active: usize,
    target: usize,
}

impl Document {
    /// A single-frame document filled with `bg`.
    pub fn new(size: IntSize, bg: Color) -> Result<Self> {
        Self::with_limit(size, bg, DEFAULT_MAX_PIXELS)
    }

    /// Like [`Document::new`] with an explicit limit on the bitmap size.
    pub fn with_limit(size: IntSize, bg: Color, max_pixels: u64) -> Result<Self> {
        let bitmap = Bitmap::try_new(size, bg, max_pixels)?;
        Ok(Self::from_frame(Frame::new(bitmap)))
    }

    pub fn from_frame(frame: Frame) -> Self {
        Self {
            frames: vec![frame],
            active: 0,
            target: 0,
        }
    }

    /// Appends a frame, returning its id.
    pub fn add_frame(&mut self, frame: Frame) -> FrameId {
        let id = frame.id();
        self.frames.push(frame);
        id
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_index(&self, id: FrameId) -> Option<usize> {
        self.frames.iter().position(|f| f.id() == id)
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id() == id)
    }

    pub fn frame_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id() == id)
    }

    pub fn active_frame(&self) -> &Frame {
        &self.frames[self.active]
    }

    pub fn active_id(&self) -> FrameId {
        self.active_frame().id()
    }

    pub fn set_active(&mut self, id: FrameId) -> Result<()> {
        self.active = self
            .frame_index(id)
            .ok_or(Error::UnknownFrame(id.raw()))?;
        Ok(())
    }

    /// Points the command context at frame `id`.
    pub fn set_target(&mut self, id: FrameId) -> Result<()> {
        self.target = self
            .frame_index(id)
            .ok_or(Error::UnknownFrame(id.raw()))?;
        Ok(())
    }

    pub fn target_frame(&self) -> &Frame {
        &self.frames[self.target]
    }

    pub fn target_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.target]
    }

    /// Runs `f` on the frame list, keeping the active and target indices on
    /// the frames they named. If one of those frames is gone, the index is
    /// clamped to the new list.
    fn rearrange<R>(&mut self, f: impl FnOnce(&mut Vec<Frame>) -> R) -> R {
        let active = self.active_id();
        let target = self.target_frame().id();
        let result = f(&mut self.frames);
        let last = self.frames.len().saturating_sub(1);
        self.active = self.frame_index(active).unwrap_or(self.active.min(last));
        self.target = self.frame_index(target).unwrap_or(self.target.min(last));
        result
    }
}

impl CommandContext for Document {
    fn bitmap(&self) -> &Bitmap {
        self.target_frame().bitmap()
    }

    fn raw_bitmap(&mut self) -> &mut Bitmap {
        self.target_frame_mut().bitmap_mut()
    }

    fn set_bitmap(&mut self, bitmap: Bitmap) {
        self.target_frame_mut().set_bitmap(bitmap);
    }

    fn dc(&mut self) -> DrawingSurface<'_> {
        DrawingSurface::new(self.target_frame_mut().bitmap_mut())
    }

    fn raster_selection(&self) -> &RasterSelection {
        self.target_frame().selection()
    }

    fn raster_selection_mut(&mut self) -> &mut RasterSelection {
        self.target_frame_mut().selection_mut()
    }

    fn objects(&self) -> &[VectorObject] {
        self.target_frame().objects()
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut VectorObject> {
        self.target_frame_mut().object_mut(id)
    }

    fn objects_mut(&mut self) -> &mut [VectorObject] {
        self.target_frame_mut().objects_mut()
    }

    fn insert_object(&mut self, index: usize, object: VectorObject) {
        self.target_frame_mut().insert_object(index, object);
    }

    fn remove_object(&mut self, id: ObjectId) -> Option<(usize, VectorObject)> {
        self.target_frame_mut().remove_object(id)
    }

    fn offset_origin(&mut self, delta: IntPoint) {
        self.target_frame_mut().offset_origin(delta);
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame_at(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    fn frame_at_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    fn frame_position(&self, id: FrameId) -> Option<usize> {
        self.frame_index(id)
    }

    fn insert_frame(&mut self, index: usize, frame: Frame) {
        assert!(
            index <= self.frames.len(),
            "frame index {index} out of range for {} frames",
            self.frames.len()
        );
        self.rearrange(|frames| frames.insert(index, frame));
    }

    fn remove_frame(&mut self, index: usize) -> Frame {
        assert!(self.frames.len() > 1, "cannot remove the only frame");
        assert!(
            index < self.frames.len(),
            "frame index {index} out of range for {} frames",
            self.frames.len()
        );
        self.rearrange(|frames| frames.remove(index))
    }

    fn move_frame(&mut self, new_index: usize, old_index: usize) {
        let len = self.frames.len();
        assert!(
            new_index < len && old_index < len,
            "cannot move frame {old_index} to {new_index} among {len} frames"
        );
        self.rearrange(|frames| {
            let frame = frames.remove(old_index);
            frames.insert(new_index, frame);
        });
    }

    fn swap_frames(&mut self, a: usize, b: usize) {
        self.rearrange(|frames| frames.swap(a, b));
    }
}

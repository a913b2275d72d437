//! The editable surface a command sees.

use pixkit_core::{
    Bitmap, DrawingSurface, Frame, FrameId, IntPoint, IntSize, ObjectId, RasterSelection,
    VectorObject,
};

/// Access to the frame a command is applied to.
///
/// The history points the context at the right frame before every call into
/// a command, so commands never name frames themselves. Frame commands are
/// the exception: they address the frame list by index.
pub trait CommandContext {
    /// The current bitmap of the target frame.
    fn bitmap(&self) -> &Bitmap;

    /// Mutable access to the bitmap, bypassing any drawing bookkeeping.
    fn raw_bitmap(&mut self) -> &mut Bitmap;

    /// Replaces the bitmap, possibly with one of another size.
    fn set_bitmap(&mut self, bitmap: Bitmap);

    /// A drawing surface on the bitmap.
    fn dc(&mut self) -> DrawingSurface<'_>;

    fn image_size(&self) -> IntSize {
        self.bitmap().size()
    }

    fn raster_selection(&self) -> &RasterSelection;

    fn raster_selection_mut(&mut self) -> &mut RasterSelection;

    fn has_objects(&self) -> bool {
        !self.objects().is_empty()
    }

    /// Objects in z-order, bottom first.
    fn objects(&self) -> &[VectorObject];

    fn object(&self, id: ObjectId) -> Option<&VectorObject> {
        self.objects().iter().find(|o| o.id() == id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut VectorObject>;

    fn objects_mut(&mut self) -> &mut [VectorObject];

    fn insert_object(&mut self, index: usize, object: VectorObject);

    /// Removes an object, returning it and its former z-position.
    fn remove_object(&mut self, id: ObjectId) -> Option<(usize, VectorObject)>;

    /// Shifts objects, the raster selection and the hot spot by `delta`,
    /// used when the image origin moves.
    fn offset_origin(&mut self, delta: IntPoint);

    fn frame_count(&self) -> usize;

    fn frame_at(&self, index: usize) -> Option<&Frame>;

    fn frame_at_mut(&mut self, index: usize) -> Option<&mut Frame>;

    fn frame_position(&self, id: FrameId) -> Option<usize> {
        (0..self.frame_count()).find(|&i| self.frame_at(i).is_some_and(|f| f.id() == id))
    }

    /// Inserts `frame` before `index`; `index == frame_count()` appends.
    fn insert_frame(&mut self, index: usize, frame: Frame);

    /// Removes and returns the frame at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of range or it is the only frame.
    fn remove_frame(&mut self, index: usize) -> Frame;

    /// Moves the frame at `old_index` so that it ends up at `new_index`.
    fn move_frame(&mut self, new_index: usize, old_index: usize);

    fn swap_frames(&mut self, a: usize, b: usize);
}

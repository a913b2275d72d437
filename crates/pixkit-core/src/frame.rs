//! Animation frames.
//!
//! A frame owns everything a command edits: the raster bitmap, the vector
//! objects in z-order and the raster selection. It also keeps the bitmap as
//! it was before the first raster edit, which the history reverts to when a
//! raster edit is undone.

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::geo::{IntPoint, IntRect, IntSize};
use crate::ids::{FrameId, ObjectId};
use crate::objects::VectorObject;
use crate::selection::RasterSelection;

/// One frame of a document.
#[derive(Debug, Clone)]
pub struct Frame {
    id: FrameId,
    bitmap: Bitmap,
    original: Option<Bitmap>,
    objects: Vec<VectorObject>,
    selection: RasterSelection,
    /// Display time in milliseconds for animations.
    pub delay_ms: u32,
    /// Cursor hot spot, for frames used as cursors.
    pub hotspot: IntPoint,
}

impl Frame {
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            id: FrameId::next(),
            bitmap,
            original: None,
            objects: Vec::new(),
            selection: RasterSelection::new(),
            delay_ms: 0,
            hotspot: IntPoint::default(),
        }
    }

    pub fn with_size(size: IntSize, bg: Color) -> Self {
        Self::new(Bitmap::new(size, bg))
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    pub fn set_bitmap(&mut self, bitmap: Bitmap) {
        self.bitmap = bitmap;
    }

    pub fn size(&self) -> IntSize {
        self.bitmap.size()
    }

    pub fn rect(&self) -> IntRect {
        self.bitmap.rect()
    }

    pub fn has_stored_original(&self) -> bool {
        self.original.is_some()
    }

    /// Remembers the current bitmap as the state raster undo reverts to.
    pub fn store_as_original(&mut self) {
        self.original = Some(self.bitmap.clone());
    }

    pub fn original(&self) -> Option<&Bitmap> {
        self.original.as_ref()
    }

    pub fn set_original(&mut self, bitmap: Bitmap) {
        self.original = Some(bitmap);
    }

    /// Restores the stored original bitmap. Returns false if none is stored.
    pub fn revert(&mut self) -> bool {
        match &self.original {
            Some(original) => {
                self.bitmap = original.clone();
                true
            }
            None => false,
        }
    }

    pub fn objects(&self) -> &[VectorObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [VectorObject] {
        &mut self.objects
    }

    /// Adds an object on top of the others, returning its id.
    pub fn add_object(&mut self, object: VectorObject) -> ObjectId {
        let id = object.id();
        self.objects.push(object);
        id
    }

    /// Inserts an object at z-position `index`, clamped to the top.
    pub fn insert_object(&mut self, index: usize, object: VectorObject) {
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
    }

    /// Removes an object, returning it together with its z-position.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<(usize, VectorObject)> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        Some((index, self.objects.remove(index)))
    }

    pub fn object(&self, id: ObjectId) -> Option<&VectorObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut VectorObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn selection(&self) -> &RasterSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut RasterSelection {
        &mut self.selection
    }

    /// Moves objects, the selection and the hot spot by `delta`, e.g.
    /// after the image origin moved because of a resize.
    pub fn offset_origin(&mut self, delta: IntPoint) {
        for obj in &mut self.objects {
            obj.offset(delta.floated());
        }
        self.selection.offset(delta);
        self.hotspot = self.hotspot + delta;
    }
}

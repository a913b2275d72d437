//! Drawing surface handed out by a command context.

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::geo::{IntPoint, IntRect};

/// A drawing surface borrowing the bitmap it paints on.
///
/// Obtained from a command context when a command composites results back
/// onto the image. The borrow ends when the surface is dropped.
#[derive(Debug)]
pub struct DrawingSurface<'a> {
    target: &'a mut Bitmap,
}

impl<'a> DrawingSurface<'a> {
    pub fn new(target: &'a mut Bitmap) -> Self {
        Self { target }
    }

    /// Copies `src` onto the surface with its top left corner at `top_left`.
    pub fn blit(&mut self, src: &Bitmap, top_left: IntPoint) {
        self.target.blit(src, top_left);
    }

    pub fn fill_rect(&mut self, rect: IntRect, color: Color) {
        self.target.fill_rect(rect, color);
    }

    pub fn set_pixel(&mut self, p: IntPoint, color: Color) {
        self.target.set(p, color);
    }

    pub fn bounds(&self) -> IntRect {
        self.target.rect()
    }
}

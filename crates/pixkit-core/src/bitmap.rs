//! In-memory RGBA bitmaps.
//!
//! `Bitmap` wraps an [`image::RgbaImage`] and offers the pixel operations the
//! command layer needs: sub-bitmap extraction, clipped blitting, filling,
//! scaling, flipping and rotation. All coordinate arguments are clipped to
//! the bitmap, so callers may pass rectangles that extend past the edges.

use crate::color::Color;
use crate::error::BitmapError;
use crate::geo::{Axis, IntPoint, IntRect, IntSize};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Resampling quality used when rescaling bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleQuality {
    /// Nearest neighbour, keeps hard pixel edges
    Nearest,
    /// Bilinear filtering
    #[default]
    Bilinear,
}

impl ScaleQuality {
    fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
        }
    }
}

/// An RGBA bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pixels: RgbaImage,
}

fn extent(v: i32) -> u32 {
    v.max(0) as u32
}

impl Bitmap {
    /// Creates a bitmap filled with `color`. Negative extents give an empty
    /// bitmap.
    pub fn new(size: IntSize, color: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(extent(size.w), extent(size.h), color.to_rgba()),
        }
    }

    /// Creates a bitmap after checking it is non-empty and within
    /// `max_pixels`.
    pub fn try_new(size: IntSize, color: Color, max_pixels: u64) -> Result<Self, BitmapError> {
        if size.is_empty() {
            return Err(BitmapError::EmptySize {
                w: size.w,
                h: size.h,
            });
        }
        let pixels = size.area();
        if pixels > max_pixels {
            return Err(BitmapError::TooLarge {
                pixels,
                limit: max_pixels,
            });
        }
        Ok(Self::new(size, color))
    }

    pub fn from_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    pub fn size(&self) -> IntSize {
        IntSize::new(self.pixels.width() as i32, self.pixels.height() as i32)
    }

    pub fn rect(&self) -> IntRect {
        IntRect::from_size(self.size())
    }

    pub fn get(&self, p: IntPoint) -> Option<Color> {
        if self.rect().contains(p) {
            Some(Color::from(*self.pixels.get_pixel(p.x as u32, p.y as u32)))
        } else {
            None
        }
    }

    /// Sets a single pixel, ignoring positions outside the bitmap.
    pub fn set(&mut self, p: IntPoint, color: Color) {
        if self.rect().contains(p) {
            self.pixels.put_pixel(p.x as u32, p.y as u32, color.to_rgba());
        }
    }

    pub fn fill(&mut self, color: Color) {
        let px = color.to_rgba();
        for pixel in self.pixels.pixels_mut() {
            *pixel = px;
        }
    }

    /// Fills the part of `rect` that lies inside the bitmap.
    pub fn fill_rect(&mut self, rect: IntRect, color: Color) {
        let clipped = rect.intersection(&self.rect());
        if clipped.is_empty() {
            return;
        }
        let px = color.to_rgba();
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.pixels.put_pixel(x as u32, y as u32, px);
            }
        }
    }

    /// Copies out the region `rect`. The result always has the size of
    /// `rect`; parts outside this bitmap are transparent.
    pub fn subbitmap(&self, rect: IntRect) -> Bitmap {
        let mut out = Bitmap::new(rect.size(), Color::TRANSPARENT);
        out.blit(self, -rect.top_left());
        out
    }

    /// Replaces the pixels under `src` placed at `top_left`, clipped to this
    /// bitmap. No alpha blending is performed.
    pub fn blit(&mut self, src: &Bitmap, top_left: IntPoint) {
        imageops::replace(
            &mut self.pixels,
            &src.pixels,
            i64::from(top_left.x),
            i64::from(top_left.y),
        );
    }

    /// A copy of this bitmap placed at `offset` on a new canvas of `size`
    /// filled with `bg`.
    pub fn placed(&self, size: IntSize, offset: IntPoint, bg: Color) -> Bitmap {
        let mut out = Bitmap::new(size, bg);
        out.blit(self, offset);
        out
    }

    pub fn scaled(&self, size: IntSize, quality: ScaleQuality) -> Bitmap {
        if size.is_empty() || self.size().is_empty() {
            return Bitmap::new(size, Color::TRANSPARENT);
        }
        Bitmap::from_image(imageops::resize(
            &self.pixels,
            extent(size.w),
            extent(size.h),
            quality.filter(),
        ))
    }

    pub fn flipped(&self, axis: Axis) -> Bitmap {
        match axis {
            Axis::Horizontal => Bitmap::from_image(imageops::flip_horizontal(&self.pixels)),
            Axis::Vertical => Bitmap::from_image(imageops::flip_vertical(&self.pixels)),
        }
    }

    /// Rotates the bitmap 90 degrees clockwise; width and height swap.
    pub fn rotated_90cw(&self) -> Bitmap {
        Bitmap::from_image(imageops::rotate90(&self.pixels))
    }

    /// The colour shared by every in-bounds pixel bordering `rect` on the
    /// outside, or `None` when the border is mixed or lies entirely outside
    /// the bitmap.
    pub fn edge_color(&self, rect: IntRect) -> Option<Color> {
        let outer = IntRect::new(rect.x - 1, rect.y - 1, rect.w + 2, rect.h + 2);
        let mut shared: Option<Color> = None;
        for y in outer.y..outer.bottom() {
            for x in outer.x..outer.right() {
                let p = IntPoint::new(x, y);
                if rect.contains(p) {
                    continue;
                }
                let Some(color) = self.get(p) else {
                    continue;
                };
                match shared {
                    None => shared = Some(color),
                    Some(c) if c == color => {}
                    Some(_) => return None,
                }
            }
        }
        shared
    }
}

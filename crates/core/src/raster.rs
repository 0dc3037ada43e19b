//! Fixed-size raster buffer of [`Rgb`] colors.
//!
//! Pixels are stored row-major: `(x, y)` lives at offset `y * width + x`.
//! The buffer is allocated once, filled with a background color, mutated
//! in place by an engine and read by the exporter. It is an ordinary owned
//! value; callers lend it out by reference.

use crate::color::Rgb;
use crate::error::EngineError;
use crate::geometry::Point;

/// A dense `width * height` grid of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<Rgb>,
}

/// Number of pixels in a `width` x `height` raster.
///
/// Returns `EngineError::InvalidDimensions` if either dimension is zero, if
/// the pixel count overflows `usize`, or if the pixel buffer would exceed
/// `isize::MAX` bytes.
pub fn pixel_count(width: usize, height: usize) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    let len = width
        .checked_mul(height)
        .ok_or(EngineError::InvalidDimensions)?;
    len.checked_mul(std::mem::size_of::<Rgb>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .ok_or(EngineError::InvalidDimensions)?;
    Ok(len)
}

impl Raster {
    /// Allocates a raster with every pixel set to `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` when [`pixel_count`] rejects
    /// the size or the allocator cannot provide the buffer.
    pub fn new(width: usize, height: usize, background: Rgb) -> Result<Self, EngineError> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| EngineError::InvalidDimensions)?;
        pixels.resize(len, background);
        Ok(Self {
            width,
            height,
            background,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The color the raster was filled with at construction.
    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Read-only access to the row-major pixel data.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, Rgb> {
        self.pixels.chunks(self.width)
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// The color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the raster.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside raster");
        self.pixels[self.offset(x, y)]
    }

    /// Stores `color` at `(x, y)`.
    ///
    /// No bounds validation beyond the slice index: the caller checks
    /// coordinates first (see [`Raster::pixel_for`]). An `x >= width` inside
    /// the total length silently lands on the next row, so engines must
    /// never skip that check.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is past the end of the buffer.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        let idx = self.offset(x, y);
        self.pixels[idx] = color;
    }

    /// Maps a real-valued point to the pixel it falls in.
    ///
    /// The range test runs on the real coordinates before truncation, so
    /// `x = -0.5` is outside even though it would truncate to column 0.
    /// Non-finite coordinates are outside.
    pub fn pixel_for(&self, p: Point) -> Option<(usize, usize)> {
        let inside = p.x >= 0.0
            && p.x < self.width as f64
            && p.y >= 0.0
            && p.y < self.height as f64;
        inside.then(|| (p.x as usize, p.y as usize))
    }

    /// Writes `color` at the pixel under `p` if it is inside the raster.
    ///
    /// Returns whether a pixel was written.
    pub fn plot(&mut self, p: Point, color: Rgb) -> bool {
        match self.pixel_for(p) {
            Some((x, y)) => {
                self.set_pixel(x, y, color);
                true
            }
            None => false,
        }
    }

    /// Number of pixels whose color differs from `color`.
    pub fn count_not(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&c| c != color).count()
    }
}

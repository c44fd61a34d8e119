/// Read side of a pixel surface.
///
/// Implemented by : `PixelGrid`, `ImageSurface`.
///
/// Filters only ever read from the source, so the trait exposes no setter.
/// `Sync` lets order-independent filters read rows from several threads.
///
/// # Example
/// ```
/// use dc_core::surface::PixelSource;
///
/// struct Flat;
/// impl PixelSource for Flat {
///     fn width(&self) -> usize { 4 }
///     fn height(&self) -> usize { 4 }
///     fn pixel(&self, _x: usize, _y: usize) -> u32 { 0x808080 }
/// }
/// assert_eq!(Flat.pixel(1, 1), 0x808080);
/// ```
pub trait PixelSource: Sync {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Packed `0xRRGGBB` colour at (x, y).
    ///
    /// CONTRACT: `x < width()` and `y < height()`. Implementations panic otherwise.
    fn pixel(&self, x: usize, y: usize) -> u32;
}

/// Write side of a pixel surface.
///
/// # Example
/// ```
/// use dc_core::surface::{PixelGrid, PixelSink};
/// let mut grid = PixelGrid::new(2, 2);
/// grid.set_pixel(1, 0, 0xFFFFFF);
/// assert_eq!(grid.get(1, 0), 0xFFFFFF);
/// ```
pub trait PixelSink {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Store a packed colour at (x, y).
    ///
    /// CONTRACT: same bounds as [`PixelSource::pixel`].
    fn set_pixel(&mut self, x: usize, y: usize, color: u32);
}

/// In-memory packed-colour grid, row-major. Never resized after construction.
///
/// # Example
/// ```
/// use dc_core::surface::PixelGrid;
/// let grid = PixelGrid::new(10, 5);
/// assert_eq!(grid.data().len(), 50);
/// assert_eq!(grid.get(9, 4), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Vec<u32>,
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Zero-filled grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    /// Grid with every pixel set to `color`.
    #[must_use]
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self {
            data: vec![color; width * height],
            width,
            height,
        }
    }

    /// Grid whose pixels are produced by `f(x, y)`.
    ///
    /// # Example
    /// ```
    /// use dc_core::surface::PixelGrid;
    /// let grid = PixelGrid::from_fn(3, 2, |x, y| (x + y * 3) as u32);
    /// assert_eq!(grid.get(2, 1), 5);
    /// ```
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u32) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw row-major pixels.
    #[must_use]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Packed colour at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[self.index(x, y)]
    }
}

impl PixelSource for PixelGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn pixel(&self, x: usize, y: usize) -> u32 {
        self.get(x, y)
    }
}

impl PixelSink for PixelGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        let idx = self.index(x, y);
        self.data[idx] = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let grid = PixelGrid::from_fn(4, 3, |x, y| (y * 10 + x) as u32);
        assert_eq!(grid.data()[5], 11);
        assert_eq!(grid.pixel(3, 2), 23);
    }

    #[test]
    fn set_pixel_roundtrips_through_source() {
        let mut grid = PixelGrid::filled(3, 3, 7);
        grid.set_pixel(2, 1, 0xAA0000);
        assert_eq!(grid.pixel(2, 1), 0xAA0000);
        assert_eq!(grid.pixel(1, 2), 7);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_read_panics() {
        let grid = PixelGrid::new(2, 2);
        let _ = grid.pixel(2, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_write_panics() {
        let mut grid = PixelGrid::new(2, 2);
        grid.set_pixel(0, 2, 0);
    }

    #[test]
    fn empty_grid_has_no_pixels() {
        let grid = PixelGrid::new(0, 5);
        assert!(grid.data().is_empty());
        assert_eq!(PixelSource::height(&grid), 5);
    }
}

use std::path::Path;

use anyhow::{Context, Result};
use dc_core::color::{pack_rgb, unpack_rgb};
use dc_core::error::CoreError;
use dc_core::surface::{PixelSink, PixelSource};
use image::{ImageFormat, ImageReader, Rgb, RgbImage};

/// Pixel surface backed by a decoded RGB image. Reads and writes go straight
/// through to the image buffer.
///
/// # Example
/// ```
/// use dc_source::ImageSurface;
/// use dc_core::surface::{PixelSink, PixelSource};
/// let mut surface = ImageSurface::blank(4, 2);
/// surface.set_pixel(3, 1, 0xAA0000);
/// assert_eq!(surface.pixel(3, 1), 0xAA0000);
/// assert_eq!(surface.pixel(0, 0), 0);
/// ```
#[derive(Clone, Debug)]
pub struct ImageSurface {
    image: RgbImage,
}

impl ImageSurface {
    /// Decode an image file. Alpha is dropped, palettes are expanded.
    ///
    /// The format is sniffed from the file contents, falling back to the
    /// extension.
    ///
    /// # Errors
    /// Returns `FileNotFound` for a missing file, `UnsupportedFormat` when
    /// neither contents nor extension name a known format, and a decode error
    /// otherwise.
    ///
    /// # Example
    /// ```no_run
    /// use dc_source::ImageSurface;
    /// use std::path::Path;
    /// let surface = ImageSurface::open(Path::new("photo.png")).unwrap();
    /// ```
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let reader = ImageReader::open(path)
            .and_then(ImageReader::with_guessed_format)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        let Some(format) = reader.format() else {
            return Err(CoreError::UnsupportedFormat {
                format: path
                    .extension()
                    .map_or_else(|| "unknown".to_string(), |e| e.to_string_lossy().into_owned()),
            }
            .into());
        };
        let img = reader
            .decode()
            .with_context(|| format!("File is not a valid image: {}", path.display()))?;
        let image = img.to_rgb8();
        log::trace!("{} detected as {format:?}", path.display());
        log::debug!(
            "decoded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    /// Zero-filled (black) surface, used as a filter destination.
    #[must_use]
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    /// Destination with the same dimensions as `source`.
    #[must_use]
    pub fn blank_like(source: &dyn PixelSource) -> Self {
        Self::blank(source.width() as u32, source.height() as u32)
    }

    /// Wrap an already decoded image.
    #[must_use]
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    /// Underlying image buffer.
    #[must_use]
    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    /// Encode as PNG.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("Unable to write {}", path.display()))
    }

    #[inline(always)]
    fn coords(&self, x: usize, y: usize) -> (u32, u32) {
        assert!(
            x < self.image.width() as usize && y < self.image.height() as usize,
            "pixel ({x}, {y}) out of bounds for {}x{} image",
            self.image.width(),
            self.image.height()
        );
        (x as u32, y as u32)
    }
}

impl PixelSource for ImageSurface {
    fn width(&self) -> usize {
        self.image.width() as usize
    }

    fn height(&self) -> usize {
        self.image.height() as usize
    }

    fn pixel(&self, x: usize, y: usize) -> u32 {
        let (x, y) = self.coords(x, y);
        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        pack_rgb(r, g, b)
    }
}

impl PixelSink for ImageSurface {
    fn width(&self) -> usize {
        self.image.width() as usize
    }

    fn height(&self) -> usize {
        self.image.height() as usize
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        let (x, y) = self.coords(x, y);
        let (r, g, b) = unpack_rgb(color);
        self.image.put_pixel(x, y, Rgb([r, g, b]));
    }
}

/// Convenience for tests and one-shot callers.
///
/// # Errors
/// Returns an error if the image cannot be loaded.
pub fn load_image(path: &str) -> Result<ImageSurface> {
    ImageSurface::open(Path::new(path))
}

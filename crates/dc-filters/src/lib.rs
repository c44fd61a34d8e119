//! Dithering filter engine for DitherCL.
//!
//! Every filter turns a [`PixelSource`] into black/white pixels on a
//! [`PixelSink`]. Filters are looked up by label through [`registry`].

pub mod diffusion;
pub mod job;
pub mod ordered;
pub mod registry;
pub mod simple;

use dc_core::color::{BLACK, WHITE};
use dc_core::config::FilterConfig;
use dc_core::surface::{PixelSink, PixelSource};
use rayon::prelude::*;

pub use job::{ConfiguredFilter, FilterJob};
pub use registry::{available_labels, find, get};

/// One pixel-transformation algorithm.
///
/// Implemented by : `OrderedFilter`, `DiffusionFilter`, `ThresholdFilter`,
/// `RandomFilter`, `LeftToRightFilter`, `ErrorFilter`.
///
/// # Example
/// ```
/// use dc_core::config::FilterConfig;
/// use dc_core::surface::{PixelGrid, PixelSink, PixelSource};
/// use dc_filters::Filter;
///
/// struct Invert;
/// impl Filter for Invert {
///     fn label(&self) -> &'static str { "Invert" }
///     fn apply(&self, source: &dyn PixelSource, destination: &mut dyn PixelSink,
///              _config: &FilterConfig) {
///         for y in 0..source.height() {
///             for x in 0..source.width() {
///                 destination.set_pixel(x, y, !source.pixel(x, y) & 0xFFFFFF);
///             }
///         }
///     }
/// }
/// let mut out = PixelGrid::new(1, 1);
/// Invert.apply(&PixelGrid::new(1, 1), &mut out, &FilterConfig::default());
/// assert_eq!(out.get(0, 0), 0xFFFFFF);
/// ```
pub trait Filter: Send + Sync {
    /// Registry label, also shown in help text.
    fn label(&self) -> &'static str;

    /// Run the transform to completion.
    ///
    /// CONTRACT: `destination` has the same dimensions as `source`. Pixels the
    /// filter does not visit are left untouched.
    fn apply(&self, source: &dyn PixelSource, destination: &mut dyn PixelSink, config: &FilterConfig);
}

impl dyn Filter {
    /// Attach a threshold, keeping the other parameters at their defaults.
    ///
    /// # Example
    /// ```
    /// let configured = dc_filters::get("Threshold").threshold(100);
    /// assert_eq!(configured.config().threshold, 100);
    /// ```
    #[must_use]
    pub fn threshold(&'static self, value: i32) -> ConfiguredFilter {
        self.configure(FilterConfig::default().with_threshold(value))
    }

    /// Attach a full parameter set.
    #[must_use]
    pub fn configure(&'static self, config: FilterConfig) -> ConfiguredFilter {
        ConfiguredFilter::new(self, config)
    }
}

/// Two-level quantization shared by every filter.
#[inline(always)]
#[must_use]
pub fn quantize(level: i32, threshold: i32) -> u32 {
    if level < threshold { BLACK } else { WHITE }
}

/// Fill every row of `destination` from `row(y)`.
///
/// Only for order-independent filters: with `parallel` the rows are computed
/// on the rayon pool, then written back in order.
pub(crate) fn write_rows<F>(destination: &mut dyn PixelSink, height: usize, parallel: bool, row: F)
where
    F: Fn(usize) -> Vec<u32> + Sync + Send,
{
    if parallel {
        let rows: Vec<Vec<u32>> = (0..height).into_par_iter().map(&row).collect();
        for (y, colors) in rows.iter().enumerate() {
            for (x, &color) in colors.iter().enumerate() {
                destination.set_pixel(x, y, color);
            }
        }
    } else {
        for y in 0..height {
            for (x, color) in row(y).into_iter().enumerate() {
                destination.set_pixel(x, y, color);
            }
        }
    }
}

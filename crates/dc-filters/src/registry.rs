//! Label → filter lookup, fixed at compile time.

use crate::Filter;
use crate::diffusion::{
    ATKINSON, BURKES, FALSE_FLOYD_STEINBERG, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, SIERRA,
    SIERRA_LITE, STUCKI, TWO_ROW_SIERRA,
};
use crate::ordered::{BAYER_2X2, BAYER_3X3, BAYER_4X4, BAYER_5X3, BAYER_8X8, NEWSPAPER_HALFTONE};
use crate::simple::{ErrorFilter, LeftToRightFilter, RandomFilter, ThresholdFilter};

/// Number of registered filters.
pub const FILTER_COUNT: usize = 18;

/// Canonical label order, used for validation and help text.
pub const LABELS: [&str; FILTER_COUNT] = [
    "Atkinson",
    "2x2Bayer",
    "3x3Bayer",
    "4x4Bayer",
    "8x8Bayer",
    "5x3Bayer",
    "Burkes",
    "FalseFloydSteinberg",
    "FloydSteinberg",
    "JarvisJudiceNinke",
    "LeftToRightErrorDiffusion",
    "NewspaperHalftone",
    "Random",
    "Sierra",
    "SierraLite",
    "Stucki",
    "Threshold",
    "TwoRowSierra",
];

static FILTERS: [&dyn Filter; FILTER_COUNT] = [
    &ATKINSON,
    &BAYER_2X2,
    &BAYER_3X3,
    &BAYER_4X4,
    &BAYER_8X8,
    &BAYER_5X3,
    &BURKES,
    &FALSE_FLOYD_STEINBERG,
    &FLOYD_STEINBERG,
    &JARVIS_JUDICE_NINKE,
    &LeftToRightFilter,
    &NEWSPAPER_HALFTONE,
    &RandomFilter,
    &SIERRA,
    &SIERRA_LITE,
    &STUCKI,
    &ThresholdFilter,
    &TWO_ROW_SIERRA,
];

static ERROR_FILTER: ErrorFilter = ErrorFilter;

/// Every available label, in canonical order.
///
/// # Example
/// ```
/// let labels = dc_filters::available_labels();
/// assert_eq!(labels.len(), 18);
/// assert_eq!(labels[0], "Atkinson");
/// ```
#[must_use]
pub fn available_labels() -> &'static [&'static str] {
    &LABELS
}

/// Exact, case-sensitive lookup.
///
/// # Example
/// ```
/// assert!(dc_filters::find("Stucki").is_some());
/// assert!(dc_filters::find("stucki").is_none());
/// ```
#[must_use]
pub fn find(label: &str) -> Option<&'static dyn Filter> {
    FILTERS.iter().copied().find(|f| f.label() == label)
}

/// Total lookup: unknown labels resolve to a filter that writes nothing.
///
/// Callers should validate with [`find`] first, the fallback silently leaves
/// the destination as allocated.
///
/// # Example
/// ```
/// assert_eq!(dc_filters::get("FloydSteinberg").label(), "FloydSteinberg");
/// assert_eq!(dc_filters::get("Nope").label(), "Error");
/// ```
#[must_use]
pub fn get(label: &str) -> &'static dyn Filter {
    find(label).unwrap_or_else(|| {
        log::warn!("filter name not recognised: {label}");
        &ERROR_FILTER
    })
}

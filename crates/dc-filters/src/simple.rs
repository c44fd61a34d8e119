//! Neighbourhood-free filters, the 1D left-to-right diffusion, and the no-op
//! filter returned for unknown labels.

use dc_core::color::{BLACK, WHITE, gray};
use dc_core::config::FilterConfig;
use dc_core::surface::{PixelSink, PixelSource};

use crate::{Filter, quantize, write_rows};

/// Plain comparison against the threshold.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThresholdFilter;

impl Filter for ThresholdFilter {
    fn label(&self) -> &'static str {
        "Threshold"
    }

    fn apply(&self, source: &dyn PixelSource, destination: &mut dyn PixelSink, config: &FilterConfig) {
        let width = source.width();
        let threshold = config.threshold;
        write_rows(destination, source.height(), config.parallel, |y| {
            (0..width)
                .map(|x| quantize(gray(source.pixel(x, y)), threshold))
                .collect()
        });
    }
}

/// Fresh uniform threshold in [0, 256) for every pixel. The configured
/// threshold is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomFilter;

impl RandomFilter {
    /// Row streams are keyed on (seed, y) through a multiplicative mix, so
    /// neighbouring seeds do not share rows.
    fn row_rng(seed: Option<u64>, y: usize) -> fastrand::Rng {
        match seed {
            Some(seed) => {
                fastrand::Rng::with_seed(seed ^ (y as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            }
            None => fastrand::Rng::new(),
        }
    }
}

impl Filter for RandomFilter {
    fn label(&self) -> &'static str {
        "Random"
    }

    fn apply(&self, source: &dyn PixelSource, destination: &mut dyn PixelSink, config: &FilterConfig) {
        let width = source.width();
        let seed = config.seed;
        write_rows(destination, source.height(), config.parallel, |y| {
            let mut rng = Self::row_rng(seed, y);
            (0..width)
                .map(|x| quantize(gray(source.pixel(x, y)), rng.i32(0..256)))
                .collect()
        });
    }
}

/// Below this magnitude a row's error delta is dropped.
pub const NOISE_GATE: i32 = 10;

/// One-dimensional diffusion: a single running error per row.
///
/// The delta added to the running error is computed from the raw gray level,
/// not the error-adjusted one.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeftToRightFilter;

impl Filter for LeftToRightFilter {
    fn label(&self) -> &'static str {
        "LeftToRightErrorDiffusion"
    }

    fn apply(&self, source: &dyn PixelSource, destination: &mut dyn PixelSink, config: &FilterConfig) {
        for y in 0..source.height() {
            let mut error = 0;

            for x in 0..source.width() {
                let level = gray(source.pixel(x, y));

                let mut delta = if level + error < config.threshold {
                    destination.set_pixel(x, y, BLACK);
                    level
                } else {
                    destination.set_pixel(x, y, WHITE);
                    level - 255
                };

                if delta.abs() < NOISE_GATE {
                    delta = 0;
                }
                error += delta;
            }
        }
    }
}

/// Stand-in for labels missing from the registry: writes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorFilter;

impl Filter for ErrorFilter {
    fn label(&self) -> &'static str {
        "Error"
    }

    fn apply(&self, source: &dyn PixelSource, _destination: &mut dyn PixelSink, _config: &FilterConfig) {
        log::debug!(
            "error filter invoked on {}x{} surface, nothing written",
            source.width(),
            source.height()
        );
    }
}

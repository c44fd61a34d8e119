//! Error-diffusion dithering.
//!
//! Pixels are visited in strict raster order. Each quantized pixel pushes its
//! error forward to not-yet-visited neighbours through a fixed kernel, so the
//! pass is inherently sequential.
//!
//! Every kernel carries its own iteration margins. They are kept exactly as
//! tuned per filter rather than derived from the kernel reach: pixels outside
//! the visited window are never written.

use dc_core::color::{BLACK, WHITE, gray};
use dc_core::config::FilterConfig;
use dc_core::surface::{PixelSink, PixelSource};

use crate::Filter;

/// One kernel entry: receives `weight * error / divisor` at (x + dx, y + dy).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tap {
    pub dx: isize,
    pub dy: usize,
    pub weight: i32,
}

const fn tap(dx: isize, dy: usize, weight: i32) -> Tap {
    Tap { dx, dy, weight }
}

/// Signed error accumulator, one cell per pixel. Private to one invocation.
pub struct ErrorBuffer {
    cells: Vec<i32>,
    width: usize,
    height: usize,
}

impl ErrorBuffer {
    /// Zero-filled buffer.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "error cell ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Accumulated error at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.cells[self.index(x, y)]
    }

    #[inline(always)]
    pub fn add(&mut self, x: usize, y: usize, amount: i32) {
        let idx = self.index(x, y);
        self.cells[idx] += amount;
    }
}

/// A diffusion kernel plus its iteration window.
///
/// Visited pixels: `y` in `0..height - y_end_margin`, `x` in
/// `x_start..width - x_end_margin`, both advancing by `step`.
#[derive(Clone, Copy, Debug)]
pub struct DiffusionFilter {
    label: &'static str,
    taps: &'static [Tap],
    divisor: i32,
    x_start: usize,
    x_end_margin: usize,
    y_end_margin: usize,
    step: usize,
}

impl DiffusionFilter {
    /// Kernel entries.
    #[must_use]
    pub fn taps(&self) -> &'static [Tap] {
        self.taps
    }

    /// Kernel divisor.
    #[must_use]
    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    /// Iterator over the x coordinates visited on a surface of `width`.
    pub fn columns(&self, width: usize) -> impl Iterator<Item = usize> + use<> {
        (self.x_start..width.saturating_sub(self.x_end_margin)).step_by(self.step)
    }

    /// Iterator over the y coordinates visited on a surface of `height`.
    pub fn rows(&self, height: usize) -> impl Iterator<Item = usize> + use<> {
        (0..height.saturating_sub(self.y_end_margin)).step_by(self.step)
    }

    /// Quantize one pixel and spread its error.
    #[inline(always)]
    fn diffuse(&self, errors: &mut ErrorBuffer, x: usize, y: usize, level: i32, threshold: i32) -> u32 {
        let effective = level + errors.get(x, y);
        let (color, error) = if effective < threshold {
            (BLACK, effective)
        } else {
            (WHITE, effective - 255)
        };
        for t in self.taps {
            errors.add(x.wrapping_add_signed(t.dx), y + t.dy, t.weight * error / self.divisor);
        }
        color
    }
}

impl Filter for DiffusionFilter {
    fn label(&self) -> &'static str {
        self.label
    }

    fn apply(&self, source: &dyn PixelSource, destination: &mut dyn PixelSink, config: &FilterConfig) {
        let (width, height) = (source.width(), source.height());
        let mut errors = ErrorBuffer::new(width, height);

        for y in self.rows(height) {
            for x in self.columns(width) {
                let color = self.diffuse(&mut errors, x, y, gray(source.pixel(x, y)), config.threshold);
                destination.set_pixel(x, y, color);
            }
        }
    }
}

/// Floyd-Steinberg, /16.
pub const FLOYD_STEINBERG: DiffusionFilter = DiffusionFilter {
    label: "FloydSteinberg",
    taps: &[tap(1, 0, 7), tap(-1, 1, 3), tap(0, 1, 5), tap(1, 1, 1)],
    divisor: 16,
    x_start: 1,
    x_end_margin: 1,
    y_end_margin: 1,
    step: 1,
};

/// "False" Floyd-Steinberg, three taps, /8.
pub const FALSE_FLOYD_STEINBERG: DiffusionFilter = DiffusionFilter {
    label: "FalseFloydSteinberg",
    taps: &[tap(1, 0, 3), tap(0, 1, 3), tap(1, 1, 2)],
    divisor: 8,
    x_start: 1,
    x_end_margin: 1,
    y_end_margin: 1,
    step: 1,
};

/// Jarvis, Judice & Ninke, /48.
pub const JARVIS_JUDICE_NINKE: DiffusionFilter = DiffusionFilter {
    label: "JarvisJudiceNinke",
    taps: &[
        tap(1, 0, 7),
        tap(2, 0, 5),
        tap(-2, 1, 3),
        tap(-1, 1, 5),
        tap(0, 1, 7),
        tap(1, 1, 5),
        tap(2, 1, 3),
        tap(-2, 2, 1),
        tap(-1, 2, 3),
        tap(0, 2, 5),
        tap(1, 2, 3),
        tap(2, 2, 1),
    ],
    divisor: 48,
    x_start: 2,
    x_end_margin: 2,
    y_end_margin: 2,
    step: 1,
};

/// Sierra (three rows), /32.
pub const SIERRA: DiffusionFilter = DiffusionFilter {
    label: "Sierra",
    taps: &[
        tap(1, 0, 5),
        tap(2, 0, 3),
        tap(-2, 1, 2),
        tap(-1, 1, 4),
        tap(0, 1, 5),
        tap(1, 1, 4),
        tap(2, 1, 2),
        tap(-1, 2, 2),
        tap(0, 2, 3),
        tap(1, 2, 2),
    ],
    divisor: 32,
    x_start: 2,
    x_end_margin: 2,
    y_end_margin: 2,
    step: 1,
};

/// Two-row Sierra, /16.
pub const TWO_ROW_SIERRA: DiffusionFilter = DiffusionFilter {
    label: "TwoRowSierra",
    taps: &[
        tap(1, 0, 4),
        tap(2, 0, 3),
        tap(-2, 1, 1),
        tap(-1, 1, 2),
        tap(0, 1, 3),
        tap(1, 1, 2),
        tap(2, 1, 1),
    ],
    divisor: 16,
    x_start: 2,
    x_end_margin: 2,
    y_end_margin: 1,
    step: 1,
};

/// Sierra Lite, /4. Visits every other pixel on both axes.
pub const SIERRA_LITE: DiffusionFilter = DiffusionFilter {
    label: "SierraLite",
    taps: &[tap(1, 0, 2), tap(-1, 1, 1), tap(0, 1, 1)],
    divisor: 4,
    x_start: 1,
    x_end_margin: 1,
    y_end_margin: 1,
    step: 2,
};

/// Atkinson: six taps of 1/8, only 3/4 of the error is propagated.
pub const ATKINSON: DiffusionFilter = DiffusionFilter {
    label: "Atkinson",
    taps: &[
        tap(1, 0, 1),
        tap(2, 0, 1),
        tap(-1, 1, 1),
        tap(0, 1, 1),
        tap(1, 1, 1),
        tap(0, 2, 1),
    ],
    divisor: 8,
    x_start: 1,
    x_end_margin: 2,
    y_end_margin: 2,
    step: 1,
};

/// Stucki, /42.
pub const STUCKI: DiffusionFilter = DiffusionFilter {
    label: "Stucki",
    taps: &[
        tap(1, 0, 8),
        tap(2, 0, 4),
        tap(-2, 1, 2),
        tap(-1, 1, 4),
        tap(0, 1, 8),
        tap(1, 1, 4),
        tap(2, 1, 2),
        tap(-2, 2, 1),
        tap(-1, 2, 2),
        tap(0, 2, 4),
        tap(1, 2, 2),
        tap(2, 2, 1),
    ],
    divisor: 42,
    x_start: 2,
    x_end_margin: 2,
    y_end_margin: 2,
    step: 1,
};

/// Burkes, /32.
pub const BURKES: DiffusionFilter = DiffusionFilter {
    label: "Burkes",
    taps: &[
        tap(1, 0, 8),
        tap(2, 0, 4),
        tap(-2, 1, 2),
        tap(-1, 1, 4),
        tap(0, 1, 8),
        tap(1, 1, 4),
        tap(2, 1, 2),
    ],
    divisor: 32,
    x_start: 2,
    x_end_margin: 2,
    y_end_margin: 1,
    step: 1,
};

/// All error-diffusion kernels.
pub const ALL: [DiffusionFilter; 9] = [
    FLOYD_STEINBERG,
    FALSE_FLOYD_STEINBERG,
    JARVIS_JUDICE_NINKE,
    SIERRA,
    TWO_ROW_SIERRA,
    SIERRA_LITE,
    ATKINSON,
    STUCKI,
    BURKES,
];

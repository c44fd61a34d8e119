//! Ordered (matrix) dithering.
//!
//! Each pixel's gray level is boosted by a position-dependent fraction of
//! itself before being compared against the threshold:
//!
//! ```text
//! adjusted = gray + gray * M[x % R][y % C] / D
//! ```
//!
//! No state is carried between pixels, so rows can be processed in any order.

use dc_core::color::gray;
use dc_core::config::FilterConfig;
use dc_core::surface::{PixelSink, PixelSource};

use crate::{Filter, quantize, write_rows};

/// A periodic threshold matrix and its divisor.
///
/// `matrix` is indexed `[x % rows][y % columns]`.
#[derive(Clone, Copy, Debug)]
pub struct OrderedFilter {
    label: &'static str,
    matrix: &'static [&'static [i32]],
    divisor: i32,
}

impl OrderedFilter {
    /// Adjusted gray level for a pixel at (x, y).
    ///
    /// # Example
    /// ```
    /// use dc_filters::ordered::BAYER_2X2;
    /// // M[1][0] = 4, 100 + 100 * 4 / 5 = 180
    /// assert_eq!(BAYER_2X2.adjust(100, 1, 0), 180);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn adjust(&self, level: i32, x: usize, y: usize) -> i32 {
        let row = self.matrix[x % self.matrix.len()];
        level + level * row[y % row.len()] / self.divisor
    }

    /// Matrix period along x (rows of the matrix).
    #[must_use]
    pub fn period_x(&self) -> usize {
        self.matrix.len()
    }

    /// Matrix period along y (columns of the matrix).
    #[must_use]
    pub fn period_y(&self) -> usize {
        self.matrix[0].len()
    }
}

impl Filter for OrderedFilter {
    fn label(&self) -> &'static str {
        self.label
    }

    fn apply(&self, source: &dyn PixelSource, destination: &mut dyn PixelSink, config: &FilterConfig) {
        let width = source.width();
        let threshold = config.threshold;
        write_rows(destination, source.height(), config.parallel, |y| {
            (0..width)
                .map(|x| quantize(self.adjust(gray(source.pixel(x, y)), x, y), threshold))
                .collect()
        });
    }
}

/// Bayer 2x2.
pub const BAYER_2X2: OrderedFilter = OrderedFilter {
    label: "2x2Bayer",
    matrix: &[&[1, 3], &[4, 2]],
    divisor: 5,
};

/// Bayer 3x3.
pub const BAYER_3X3: OrderedFilter = OrderedFilter {
    label: "3x3Bayer",
    matrix: &[&[3, 7, 4], &[6, 1, 9], &[2, 8, 5]],
    divisor: 10,
};

/// Bayer 4x4.
pub const BAYER_4X4: OrderedFilter = OrderedFilter {
    label: "4x4Bayer",
    matrix: &[
        &[1, 9, 3, 11],
        &[13, 5, 15, 7],
        &[4, 12, 2, 10],
        &[16, 8, 14, 6],
    ],
    divisor: 17,
};

/// Bayer 8x8, values 1..=64.
pub const BAYER_8X8: OrderedFilter = OrderedFilter {
    label: "8x8Bayer",
    matrix: &[
        &[1, 49, 13, 61, 4, 52, 16, 64],
        &[33, 17, 45, 29, 36, 20, 48, 32],
        &[9, 57, 5, 53, 12, 60, 8, 56],
        &[41, 25, 37, 21, 44, 28, 40, 24],
        &[3, 51, 15, 63, 2, 50, 14, 62],
        &[35, 19, 47, 31, 34, 18, 46, 30],
        &[11, 59, 7, 55, 10, 58, 6, 54],
        &[43, 27, 39, 23, 42, 26, 38, 22],
    ],
    divisor: 65,
};

/// 5x3 horizontal line screen: three rows of five, indexed `[x % 3][y % 5]`.
pub const BAYER_5X3: OrderedFilter = OrderedFilter {
    label: "5x3Bayer",
    matrix: &[
        &[9, 3, 0, 6, 12],
        &[10, 4, 1, 7, 13],
        &[11, 5, 2, 8, 14],
    ],
    divisor: 16,
};

/// Clustered-dot 8x8 screen.
pub const NEWSPAPER_HALFTONE: OrderedFilter = OrderedFilter {
    label: "NewspaperHalftone",
    matrix: &[
        &[24, 10, 12, 26, 35, 47, 49, 37],
        &[8, 0, 2, 14, 45, 59, 61, 51],
        &[22, 6, 4, 16, 43, 57, 63, 53],
        &[30, 20, 18, 28, 33, 41, 55, 39],
        &[34, 46, 48, 36, 25, 11, 13, 27],
        &[44, 58, 60, 50, 9, 1, 3, 15],
        &[42, 56, 62, 52, 23, 7, 5, 17],
        &[32, 40, 54, 38, 31, 21, 19, 29],
    ],
    divisor: 65,
};

/// All ordered filters.
pub const ALL: [OrderedFilter; 6] = [
    BAYER_2X2,
    BAYER_3X3,
    BAYER_4X4,
    BAYER_8X8,
    BAYER_5X3,
    NEWSPAPER_HALFTONE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::noise_surface;
    use dc_core::color::{BLACK, WHITE, gray_pixel};
    use dc_core::surface::PixelGrid;
    use std::collections::HashMap;

    fn run(filter: &OrderedFilter, source: &PixelGrid, config: FilterConfig) -> PixelGrid {
        let mut out = PixelGrid::new(source.width(), source.height());
        filter.apply(source, &mut out, &config);
        out
    }

    #[test]
    fn matrices_are_rectangular() {
        for filter in ALL {
            let columns = filter.period_y();
            assert!(filter.matrix.iter().all(|row| row.len() == columns), "{}", filter.label);
        }
        assert_eq!((BAYER_5X3.period_x(), BAYER_5X3.period_y()), (3, 5));
        assert_eq!((BAYER_8X8.period_x(), BAYER_8X8.period_y()), (8, 8));
    }

    #[test]
    fn every_pixel_is_bitonal() {
        let source = noise_surface(19, 13, 1);
        for filter in ALL {
            let out = run(&filter, &source, FilterConfig::default());
            assert!(
                out.data().iter().all(|&c| c == BLACK || c == WHITE),
                "{} wrote a non-bitonal pixel",
                filter.label
            );
        }
    }

    #[test]
    fn output_depends_only_on_gray_and_phase() {
        for seed in 0..4 {
            let source = noise_surface(24, 20, seed);
            for filter in ALL {
                let out = run(&filter, &source, FilterConfig::default().with_threshold(150));
                let mut seen: HashMap<(u32, usize, usize), u32> = HashMap::new();
                for y in 0..source.height() {
                    for x in 0..source.width() {
                        let key = (
                            source.get(x, y) >> 16,
                            x % filter.period_x(),
                            y % filter.period_y(),
                        );
                        let color = out.get(x, y);
                        let previous = *seen.entry(key).or_insert(color);
                        assert_eq!(previous, color, "{} at ({x}, {y})", filter.label);
                    }
                }
            }
        }
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let source = noise_surface(33, 17, 9);
        for filter in ALL {
            let seq = run(&filter, &source, FilterConfig::default().with_parallel(false));
            let par = run(&filter, &source, FilterConfig::default().with_parallel(true));
            assert_eq!(seq, par, "{}", filter.label);
        }
    }

    #[test]
    fn reference_pixels() {
        // 2x2: M[1][1] = 2, 100 + 200 / 5 = 140
        assert_eq!(BAYER_2X2.adjust(100, 3, 5), 140);
        // 3x3: M[2][0] = 2, 50 + 100 / 10 = 60
        assert_eq!(BAYER_3X3.adjust(50, 5, 3), 60);
        // 4x4: M[3][0] = 16, 85 + 1360 / 17 = 165
        assert_eq!(BAYER_4X4.adjust(85, 7, 4), 165);
        // 8x8: M[0][7] = 64, 100 + 6400 / 65 = 198
        assert_eq!(BAYER_8X8.adjust(100, 0, 7), 198);
        // 5x3: M[0][2] = 0, no boost; M[2][4] = 14, 64 + 896 / 16 = 120
        assert_eq!(BAYER_5X3.adjust(64, 3, 2), 64);
        assert_eq!(BAYER_5X3.adjust(64, 5, 9), 120);
        // newspaper: M[1][1] = 0; M[2][6] = 63, 65 + 4095 / 65 = 128
        assert_eq!(NEWSPAPER_HALFTONE.adjust(65, 9, 9), 65);
        assert_eq!(NEWSPAPER_HALFTONE.adjust(65, 2, 6), 128);
    }

    #[test]
    fn boosted_pixel_crosses_threshold() {
        // gray 100 at (1, 0): 2x2 boost gives 180 >= 128 -> white, (0, 0) gives 120 -> black
        let source = PixelGrid::filled(2, 1, gray_pixel(100));
        let out = run(&BAYER_2X2, &source, FilterConfig::default());
        assert_eq!(out.get(0, 0), BLACK);
        assert_eq!(out.get(1, 0), WHITE);
    }

    #[test]
    fn black_source_is_always_black_white_source_always_white() {
        for filter in ALL {
            let out = run(&filter, &PixelGrid::filled(9, 9, 0), FilterConfig::default());
            assert!(out.data().iter().all(|&c| c == BLACK), "{}", filter.label);
            let out = run(&filter, &PixelGrid::filled(9, 9, WHITE), FilterConfig::default());
            assert!(out.data().iter().all(|&c| c == WHITE), "{}", filter.label);
        }
    }
}

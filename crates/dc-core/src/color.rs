//! Packed `0xRRGGBB` colour helpers.

/// Output colour for pixels quantized to "dark". Not pure black, kept as-is.
pub const BLACK: u32 = 0x00AA_0000;

/// Output colour for pixels quantized to "light".
pub const WHITE: u32 = 0x00FF_FFFF;

/// Gray level of a packed pixel, taken from the red channel only.
///
/// # Example
/// ```
/// use dc_core::color::gray;
/// assert_eq!(gray(0x0080_1020), 0x80);
/// assert_eq!(gray(0xFF12_3456), 0x12);
/// ```
#[inline(always)]
#[must_use]
pub fn gray(pixel: u32) -> i32 {
    ((pixel >> 16) & 0xFF) as i32
}

/// Pack 8-bit channels into `0xRRGGBB`.
///
/// # Example
/// ```
/// use dc_core::color::pack_rgb;
/// assert_eq!(pack_rgb(0xAA, 0, 0), dc_core::BLACK);
/// ```
#[inline(always)]
#[must_use]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Split a packed colour into its (r, g, b) channels. Bits 24-31 are ignored.
#[inline(always)]
#[must_use]
pub fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Packed gray pixel with all three channels set to `level`.
#[inline]
#[must_use]
pub fn gray_pixel(level: u8) -> u32 {
    pack_rgb(level, level, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_reads_red_channel_only() {
        assert_eq!(gray(pack_rgb(10, 200, 250)), 10);
        assert_eq!(gray(pack_rgb(255, 0, 0)), 255);
        assert_eq!(gray(pack_rgb(0, 255, 255)), 0);
    }

    #[test]
    fn pack_unpack_keeps_channels() {
        for r in (0..=255u8).step_by(51) {
            for b in (0..=255u8).step_by(85) {
                assert_eq!(unpack_rgb(pack_rgb(r, 7, b)), (r, 7, b));
            }
        }
    }

    #[test]
    fn output_colours_are_exact() {
        assert_eq!(BLACK, 0xAA0000);
        assert_eq!(WHITE, 0xFFFFFF);
        assert_eq!(unpack_rgb(BLACK), (0xAA, 0, 0));
    }
}

//! Image-backed pixel surfaces for DitherCL: decode, wrap, encode.

pub mod image;

pub use crate::image::{ImageSurface, load_image};

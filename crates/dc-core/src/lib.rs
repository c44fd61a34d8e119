//! Shared types, surface traits and configuration for DitherCL.
//!
//! This crate contains the pixel surface abstraction every filter is written
//! against, the packed colour helpers and the TOML configuration layer.

pub mod color;
pub mod config;
pub mod error;
pub mod surface;

pub use color::{BLACK, WHITE};
pub use config::{DitherConfig, FilterConfig};
pub use error::CoreError;
pub use surface::{PixelGrid, PixelSink, PixelSource};

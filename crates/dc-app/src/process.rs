use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dc_core::config::DitherConfig;
use dc_core::error::CoreError;
use dc_core::surface::PixelSource;
use dc_filters::Filter;
use dc_source::ImageSurface;

/// Print the help block with every available filter.
pub fn print_help() {
    println!("DitherCL - Help");
    println!("Usage: dithercl pathToImage filterName [threshold]");
    print_filters();
}

/// Print "Available filters:" followed by one label per line.
pub fn print_filters() {
    println!("Available filters:");
    for label in dc_filters::available_labels() {
        println!("{label}");
    }
}

/// Validating lookup; unknown labels are an error here, never the no-op fallback.
///
/// # Errors
/// Returns `UnknownFilter` if `label` is not registered.
pub fn resolve_filter(label: &str) -> Result<&'static dyn Filter, CoreError> {
    dc_filters::find(label).ok_or_else(|| CoreError::UnknownFilter {
        label: label.to_string(),
    })
}

/// `<dir>/<source stem>_<label>.png`
#[must_use]
pub fn export_path(source: &Path, label: &str, output_dir: Option<&Path>) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let name = format!("{stem}_{label}.png");
    match output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Check the source exists, then the label, announcing each as it passes.
/// An unknown label is reported together with the filter list.
///
/// # Errors
/// Returns `FileNotFound` before the label is looked at, then `UnknownFilter`.
pub fn validate(source: &Path, label: &str) -> Result<&'static dyn Filter, CoreError> {
    if !source.exists() {
        return Err(CoreError::FileNotFound {
            path: source.display().to_string(),
        });
    }
    println!("Source: {}", source.display());

    match resolve_filter(label) {
        Ok(filter) => {
            println!("Filter: {label}");
            Ok(filter)
        }
        Err(err) => {
            println!("{err}");
            print_filters();
            Err(err)
        }
    }
}

/// Validate, decode, dither on a worker, wait for it, encode.
///
/// Returns the path of the written PNG.
///
/// # Errors
/// Returns an error for a missing source, an unknown filter, an undecodable
/// source, or a failed write, checked in that order.
pub fn run(source: &Path, label: &str, config: &DitherConfig) -> Result<PathBuf> {
    let filter = validate(source, label)?;
    let input = ImageSurface::open(source)?;

    let destination = ImageSurface::blank_like(&input);
    log::info!(
        "{label}: {}x{} threshold {}",
        input.width(),
        input.height(),
        config.threshold
    );

    let job = filter.configure(config.filter_config()).spawn(input, destination)?;
    let (_, processed) = job.join()?;

    let output_dir = config.output_dir.as_deref();
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Unable to create {}", dir.display()))?;
    }
    let path = export_path(source, label, output_dir);
    processed.save_png(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_gradient(dir: &Path) -> PathBuf {
        let path = dir.join("ramp.png");
        let img = RgbImage::from_fn(24, 6, |x, _| {
            let v = (x * 11) as u8;
            Rgb([v, v, v])
        });
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn export_path_uses_stem_and_label() {
        assert_eq!(
            export_path(Path::new("dir/photo.jpeg"), "Sierra", None),
            PathBuf::from("photo_Sierra.png")
        );
        assert_eq!(
            export_path(Path::new("photo.png"), "2x2Bayer", Some(Path::new("out"))),
            PathBuf::from("out/photo_2x2Bayer.png")
        );
    }

    #[test]
    fn unknown_filter_is_rejected_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"not an image").unwrap();
        let err = run(&garbage, "Nope", &DitherConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::UnknownFilter { label }) if label == "Nope"
        ));
        assert_eq!(err.to_string(), "Nope is not a valid filter");
    }

    #[test]
    fn missing_source_is_reported_before_unknown_filter() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        for label in ["Threshold", "Nope"] {
            let err = validate(&missing, label).err();
            assert!(
                matches!(err, Some(CoreError::FileNotFound { .. })),
                "{label}: {err:?}"
            );
        }
        let err = run(&missing, "Nope", &DitherConfig::default()).unwrap_err();
        assert!(err.to_string().ends_with("does not exist"));
    }

    #[test]
    fn validate_accepts_existing_source_and_known_label() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_gradient(dir.path());
        let filter = validate(&source, "Stucki").unwrap();
        assert_eq!(filter.label(), "Stucki");
    }

    #[test]
    fn writes_bitonal_png_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_gradient(dir.path());
        let config = DitherConfig {
            output_dir: Some(dir.path().join("out")),
            ..DitherConfig::default()
        };

        let path = run(&source, "Threshold", &config).unwrap();
        assert_eq!(path, dir.path().join("out").join("ramp_Threshold.png"));

        let written = image::open(&path).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (24, 6));
        for (x, _, px) in written.enumerate_pixels() {
            let want = if x * 11 < 128 { [0xAA, 0, 0] } else { [0xFF, 0xFF, 0xFF] };
            assert_eq!(px.0, want, "column {x}");
        }
    }

    #[test]
    fn every_filter_runs_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_gradient(dir.path());
        let config = DitherConfig {
            output_dir: Some(dir.path().to_path_buf()),
            seed: Some(1),
            ..DitherConfig::default()
        };
        for label in dc_filters::available_labels() {
            let path = run(&source, label, &config).unwrap();
            assert!(path.exists(), "{label}");
        }
    }
}

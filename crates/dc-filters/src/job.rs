//! Running a filter with its parameters, in place or on a worker thread.

use std::thread;

use anyhow::{Context, Result};
use dc_core::config::FilterConfig;
use dc_core::error::CoreError;
use dc_core::surface::{PixelGrid, PixelSink, PixelSource};

use crate::Filter;

/// A registry filter bound to the parameters of one invocation.
///
/// # Example
/// ```
/// use dc_core::surface::PixelGrid;
/// let source = PixelGrid::filled(4, 4, 0x303030);
/// let out = dc_filters::get("Threshold").threshold(128).run(&source);
/// assert!(out.data().iter().all(|&c| c == dc_core::BLACK));
/// ```
#[derive(Clone, Copy)]
pub struct ConfiguredFilter {
    filter: &'static dyn Filter,
    config: FilterConfig,
}

impl std::fmt::Debug for ConfiguredFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredFilter")
            .field("filter", &self.filter.label())
            .field("config", &self.config)
            .finish()
    }
}

fn check_dimensions(source: &dyn PixelSource, destination: &dyn PixelSink) -> Result<(), CoreError> {
    if source.width() == destination.width() && source.height() == destination.height() {
        Ok(())
    } else {
        Err(CoreError::InvalidDimensions {
            width: destination.width(),
            height: destination.height(),
        })
    }
}

impl ConfiguredFilter {
    #[must_use]
    pub fn new(filter: &'static dyn Filter, config: FilterConfig) -> Self {
        Self { filter, config }
    }

    /// Label of the wrapped filter.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.filter.label()
    }

    /// Parameters used for every run of this value.
    #[must_use]
    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Transform `source` into `destination`. All writes are done when this returns.
    ///
    /// # Errors
    /// Returns `InvalidDimensions` if the two surfaces differ in size.
    pub fn process(
        &self,
        source: &dyn PixelSource,
        destination: &mut dyn PixelSink,
    ) -> Result<(), CoreError> {
        check_dimensions(source, destination)?;
        log::debug!(
            "{}: {}x{} threshold {}",
            self.label(),
            source.width(),
            source.height(),
            self.config.threshold
        );
        self.filter.apply(source, destination, &self.config);
        Ok(())
    }

    /// Transform into a freshly allocated, zero-filled grid.
    #[must_use]
    pub fn run(&self, source: &dyn PixelSource) -> PixelGrid {
        let mut destination = PixelGrid::new(source.width(), source.height());
        self.filter.apply(source, &mut destination, &self.config);
        destination
    }

    /// Start the transform on a dedicated worker thread.
    ///
    /// Both surfaces move into the worker and come back from [`FilterJob::join`].
    ///
    /// # Errors
    /// Returns an error if the surfaces differ in size or the thread cannot be spawned.
    pub fn spawn<S, D>(self, source: S, mut destination: D) -> Result<FilterJob<S, D>>
    where
        S: PixelSource + Send + 'static,
        D: PixelSink + Send + 'static,
    {
        check_dimensions(&source, &destination)?;
        let label = self.label();
        let handle = thread::Builder::new()
            .name(format!("dc-filter-{label}"))
            .spawn(move || {
                self.filter.apply(&source, &mut destination, &self.config);
                (source, destination)
            })
            .with_context(|| format!("Unable to spawn worker for {label}"))?;
        Ok(FilterJob { label, handle })
    }
}

/// Handle on a transform running on its own worker.
///
/// The destination is only reachable through [`FilterJob::join`], so it can
/// never be read before every write has landed.
pub struct FilterJob<S, D> {
    label: &'static str,
    handle: thread::JoinHandle<(S, D)>,
}

impl<S, D> FilterJob<S, D> {
    /// Label of the running filter.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Block until the worker completes and take back `(source, destination)`.
    ///
    /// # Errors
    /// Returns `WorkerPanicked` if the transform panicked.
    pub fn join(self) -> Result<(S, D), CoreError> {
        let label = self.label;
        self.handle
            .join()
            .map_err(|_| CoreError::WorkerPanicked { label })
    }
}

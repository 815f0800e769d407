// src/sink.rs

//! Image sinks: where finished strips go.
//!
//! The pipeline hands each strip to an `ImageSink` together with a destination
//! path picked by `OutputTarget`. The sink owns the encoding.

use crate::compositor::StripImage;
use crate::config::OutputConfig;
use crate::error::{RenderError, Result};
use image::ImageFormat;
use log::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub trait ImageSink {
    /// Persist `strip` at `destination`.
    fn write(&mut self, strip: &StripImage, destination: &Path) -> Result<()>;
}

/// Picks the destination path for each strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    path: PathBuf,
    numbered: bool,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>, numbered: bool) -> Self {
        Self {
            path: path.into(),
            numbered,
        }
    }

    /// Destination for the strip with sequence index `index`.
    ///
    /// Without numbering every strip goes to the same path.
    pub fn destination(&self, index: usize) -> PathBuf {
        if !self.numbered {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string());
        let name = match self.path.extension() {
            Some(ext) => format!("{}-{:04}.{}", stem, index, ext.to_string_lossy()),
            None => format!("{}-{:04}", stem, index),
        };
        self.path.with_file_name(name)
    }
}

impl From<&OutputConfig> for OutputTarget {
    fn from(config: &OutputConfig) -> Self {
        OutputTarget::new(config.path.clone(), config.numbered)
    }
}

/// Encodes strips as PNG files.
#[derive(Debug, Default)]
pub struct PngSink;

impl PngSink {
    pub fn new() -> Self {
        Self
    }
}

impl ImageSink for PngSink {
    fn write(&mut self, strip: &StripImage, destination: &Path) -> Result<()> {
        let io_err = |source| RenderError::SinkIo {
            target: destination.to_path_buf(),
            source,
        };

        let file = File::create(destination).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        strip
            .image()
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|source| RenderError::Sink {
                target: destination.to_path_buf(),
                source,
            })?;
        writer.flush().map_err(io_err)?;

        info!("Wrote {} OK.", destination.display());
        Ok(())
    }
}

/// Keeps every strip in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    strips: Vec<(PathBuf, StripImage)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strips(&self) -> impl Iterator<Item = &StripImage> {
        self.strips.iter().map(|(_, strip)| strip)
    }

    pub fn destinations(&self) -> impl Iterator<Item = &Path> {
        self.strips.iter().map(|(path, _)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }
}

impl ImageSink for MemorySink {
    fn write(&mut self, strip: &StripImage, destination: &Path) -> Result<()> {
        self.strips.push((destination.to_path_buf(), strip.clone()));
        Ok(())
    }
}

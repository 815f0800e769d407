// src/config.rs

//! Run configuration.
//!
//! `Config` is resolved once, before the pipeline starts, and then passed by
//! reference. It can be deserialized from a JSON file; any field missing from
//! the file takes its default. Command-line flags are layered on top by the
//! binary.

use crate::color::ColorMode;
use crate::error::{RenderError, Result};
use crate::rasterizer::context::Hinting;
use crate::splitter::SplitPolicy;
use log::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything the pipeline needs to know before it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Font settings.
    pub font: FontConfig,
    /// Cell and color settings.
    pub image: ImageConfig,
    /// Splitting and pacing.
    pub pipeline: PipelineConfig,
    /// Where strips are written.
    pub output: OutputConfig,
    /// Text to render. `None` renders the built-in poem.
    pub text: Option<String>,
}

impl Config {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RenderError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&contents).map_err(|source| RenderError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Config: Loaded from '{}'", path.display());
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.font.dpi.is_finite() && self.font.dpi > 0.0) {
            return Err(RenderError::Config(format!(
                "dpi must be positive, got {}",
                self.font.dpi
            )));
        }
        if !(self.font.pts.is_finite() && self.font.pts > 0.0) {
            return Err(RenderError::Config(format!(
                "point size must be positive, got {}",
                self.font.pts
            )));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(RenderError::Config("output path must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pipeline.pacing_ms)
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::from_light_flag(self.image.light)
    }
}

/// Font file and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a .ttf/.otf file.
    pub file: PathBuf,
    /// Screen resolution in dots per inch.
    pub dpi: f32,
    /// Font size in points.
    pub pts: f32,
    pub hinting: Hinting,
    /// Glyph whose advance sets the cell width when `image.width` is 0.
    pub reference_glyph: char,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            file: PathBuf::from("./sample.ttf"),
            dpi: 72.0,
            pts: 20.0,
            hinting: Hinting::Full,
            reference_glyph: '$',
        }
    }
}

/// Glyph cell size and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ImageConfig {
    /// Cell width in pixels. 0 derives it from the reference glyph.
    pub width: u32,
    /// Cell height in pixels. 0 derives it from ascent + descent.
    pub height: u32,
    /// Black on white instead of white on black.
    pub light: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub split: SplitPolicy,
    /// Delay after each emitted strip, in milliseconds.
    pub pacing_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            split: SplitPolicy::Words,
            pacing_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination image. Overwritten by every strip unless `numbered`.
    pub path: PathBuf,
    /// Write `<stem>-0000.<ext>`, `<stem>-0001.<ext>`, ... instead.
    pub numbered: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from("out.png"),
            numbered: false,
        }
    }
}

// src/error.rs

//! Error taxonomy for the strip rendering pipeline.
//!
//! Every variant is fatal to the run. Variants carry the operation that failed
//! (path, stage or target) plus the underlying cause as `source`, so the binary
//! can print a full chain without re-running anything.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    // --- Configuration ---
    #[error("failed to read font file '{}'", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse font file '{}'", path.display())]
    FontParse {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },

    #[error("failed to read config file '{}'", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file '{}'", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    // --- Geometry ---
    #[error("could not get an advance width for reference glyph '{reference}'")]
    Geometry { reference: char },

    #[error("font does not report units per em; cannot scale to {pts}pt at {dpi} dpi")]
    InvalidScale { pts: f32, dpi: f32 },

    // --- Composition ---
    #[error("strip composition requires at least one glyph image")]
    EmptyStrip,

    #[error("glyph {index} is {found}px tall, strip expects {expected}px")]
    MismatchedGlyphHeight {
        index: usize,
        expected: u32,
        found: u32,
    },

    // --- Sink ---
    #[error("failed to encode image for '{}'", target.display())]
    Sink {
        target: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image to '{}'", target.display())]
    SinkIo {
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    // --- Pipeline infrastructure ---
    #[error("failed to spawn {stage} thread")]
    Spawn {
        stage: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{stage} thread panicked")]
    StagePanicked { stage: &'static str },
}

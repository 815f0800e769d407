// src/lib.rs

//! Renders text to strip images, one strip per word (or per character).
//!
//! A splitter thread feeds text units to a rasterizer thread, which draws each
//! character into its own cell with a font face, composes the cells of a unit
//! into one horizontal strip, and hands the strip to the caller at a paced
//! rate. See [`pipeline`] for the threading model.

pub mod app;
pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod rasterizer;
pub mod sink;
pub mod splitter;
pub mod text;

pub use compositor::StripImage;
pub use config::Config;
pub use error::{RenderError, Result};
pub use pipeline::{Pipeline, PipelineHandle, RunSummary};
pub use rasterizer::font_face::FontFace;
pub use rasterizer::headless_face::HeadlessFace;
pub use rasterizer::truetype_face::TrueTypeFace;
pub use sink::{ImageSink, MemorySink, PngSink};
pub use splitter::{SplitPolicy, TextUnit};

// src/pipeline/mod.rs

//! Pipeline driver: splitter → rasterizer/compositor → sink.
//!
//! ```text
//!  [splitter thread] --TextUnit--> [strip-render thread] --StripImage--> caller
//!        sync_channel(0)                 sync_channel(0)
//! ```
//!
//! Both channels are rendezvous channels, so strips come out in the order
//! their units went in and no stage ever runs more than one item ahead. The
//! font face is the only shared value, and it is read-only.
//!
//! Shutdown is channel-driven. The splitter drops its sender when the text
//! runs out; the strip stage sees the disconnect and drops its own sender; the
//! caller's receive loop ends. A fatal error in the strip stage ends that
//! thread early, which closes both channels the same way, and the error comes
//! back from `PipelineHandle::finish`.

pub mod splitter_stage;
pub mod strip_stage;

use crate::color::Palette;
use crate::compositor::StripImage;
use crate::config::Config;
use crate::error::{RenderError, Result};
use crate::rasterizer::context::ContextParams;
use crate::rasterizer::font_face::FontFace;
use crate::rasterizer::{CellGeometry, GlyphRasterizer};
use crate::sink::{ImageSink, OutputTarget};
use crate::splitter::SplitPolicy;
use log::*;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

pub use splitter_stage::spawn_splitter;
pub use strip_stage::spawn_strip_stage;

/// Join handle for one named pipeline thread.
#[derive(Debug)]
pub struct StageHandle<T> {
    stage: &'static str,
    handle: JoinHandle<T>,
}

impl<T> StageHandle<T> {
    pub(crate) fn new(stage: &'static str, handle: JoinHandle<T>) -> Self {
        Self { stage, handle }
    }

    /// Wait for the thread to exit.
    pub fn join(self) -> Result<T> {
        self.handle
            .join()
            .map_err(|_| RenderError::StagePanicked { stage: self.stage })
    }
}

/// Counts reported by the two stages once they have exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub units_split: usize,
    pub strips_emitted: usize,
}

/// A running pipeline.
pub struct PipelineHandle {
    strips: Receiver<StripImage>,
    splitter: StageHandle<usize>,
    renderer: StageHandle<Result<usize>>,
}

impl PipelineHandle {
    /// Block until the next strip arrives. `None` once the pipeline has closed.
    pub fn recv(&self) -> Option<StripImage> {
        self.strips.recv().ok()
    }

    /// Hang up and wait for both stages.
    ///
    /// Safe to call before every strip has been received: dropping the strip
    /// receiver makes the pending sends fail and the stages wind down.
    ///
    /// # Errors
    /// The strip stage's fatal error, if it had one, or `StagePanicked`.
    pub fn finish(self) -> Result<PipelineStats> {
        let PipelineHandle {
            strips,
            splitter,
            renderer,
        } = self;
        drop(strips);

        let rendered = renderer.join();
        let units_split = splitter.join()?;
        let strips_emitted = rendered??;

        Ok(PipelineStats {
            units_split,
            strips_emitted,
        })
    }
}

/// What a completed `Pipeline::run` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub strips_written: usize,
    pub destinations: Vec<PathBuf>,
}

/// Everything resolved up front: geometry, colors, pacing, output naming.
///
/// Building a `Pipeline` performs the geometry checks, so a face that cannot
/// size its cells fails here, before any thread starts.
pub struct Pipeline<F: FontFace + ?Sized> {
    face: Arc<F>,
    geometry: CellGeometry,
    params: ContextParams,
    policy: SplitPolicy,
    pacing: Duration,
    target: OutputTarget,
}

impl<F: FontFace + ?Sized + 'static> Pipeline<F> {
    pub fn new(face: Arc<F>, config: &Config) -> Result<Self> {
        config.validate()?;

        let geometry = CellGeometry::resolve(
            face.as_ref(),
            config.image.width,
            config.image.height,
            config.font.reference_glyph,
        )?;
        let params = ContextParams {
            palette: Palette::for_mode(config.color_mode()),
            dpi: config.font.dpi,
            pts: config.font.pts,
            hinting: config.font.hinting,
        };

        info!(
            "Pipeline: {} split, {:?} mode, {} hinting, pacing {:?}",
            config.pipeline.split,
            config.color_mode(),
            params.hinting,
            config.pacing()
        );

        Ok(Self {
            face,
            geometry,
            params,
            policy: config.pipeline.split,
            pacing: config.pacing(),
            target: OutputTarget::from(&config.output),
        })
    }

    pub fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    /// Start both stages on `text`.
    pub fn spawn(&self, text: impl Into<String>) -> Result<PipelineHandle> {
        let rasterizer = GlyphRasterizer::new(self.face.clone(), self.geometry, self.params);

        let (units, splitter) = spawn_splitter(text.into(), self.policy)?;
        let (strips, renderer) = spawn_strip_stage(rasterizer, self.pacing, units)?;

        Ok(PipelineHandle {
            strips,
            splitter,
            renderer,
        })
    }

    /// Render `text` and write every strip to `sink`.
    ///
    /// Stops at the first sink error; the stages are shut down and joined
    /// before the error is returned.
    pub fn run<S: ImageSink + ?Sized>(&self, text: impl Into<String>, sink: &mut S) -> Result<RunSummary> {
        let handle = self.spawn(text)?;
        let mut destinations = Vec::new();

        while let Some(strip) = handle.recv() {
            let destination = self.target.destination(strip.index());
            debug!(
                "Pipeline: Writing strip {} '{}' to {}",
                strip.index(),
                strip.text(),
                destination.display()
            );
            if let Err(e) = sink.write(&strip, &destination) {
                error!("Pipeline: Sink failed on strip {}: {}", strip.index(), e);
                if let Err(stage_err) = handle.finish() {
                    warn!("Pipeline: Stage error during shutdown: {}", stage_err);
                }
                return Err(e);
            }
            destinations.push(destination);
        }

        let stats = handle.finish()?;
        info!(
            "Pipeline: Finished, {} units split, {} strips written",
            stats.units_split,
            destinations.len()
        );

        Ok(RunSummary {
            strips_written: destinations.len(),
            destinations,
        })
    }
}

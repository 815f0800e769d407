// src/pipeline/strip_stage.rs
//! StripStage - dedicated thread that turns text units into strip images.
//!
//! Per unit: rasterize every character, compose once, hand the strip to the
//! driver, then sleep for the pacing interval before taking the next unit.
//!
//! Threading model:
//! - Owns: GlyphRasterizer (with a shared, read-only font face)
//! - Both channels are rendezvous channels: max 1 unit and 1 strip in flight
//! - A failed unit ends the thread; returning drops both channel ends

use super::StageHandle;
use crate::compositor::{compose, StripImage};
use crate::error::{RenderError, Result};
use crate::rasterizer::font_face::FontFace;
use crate::rasterizer::GlyphRasterizer;
use crate::splitter::TextUnit;
use log::*;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread;
use std::time::Duration;

pub(crate) const STAGE_NAME: &str = "strip-render";

struct StripActor<F: FontFace + ?Sized> {
    rasterizer: GlyphRasterizer<F>,
    pacing: Duration,
}

impl<F: FontFace + ?Sized> StripActor<F> {
    fn new(rasterizer: GlyphRasterizer<F>, pacing: Duration) -> Self {
        Self { rasterizer, pacing }
    }

    fn render_unit(&self, unit: TextUnit) -> Result<StripImage> {
        let glyphs = self.rasterizer.rasterize_unit(&unit);
        let index = unit.index();
        compose(index, unit.into_text(), glyphs)
    }

    /// Receive units until upstream closes, or downstream stops listening.
    fn run(self, unit_rx: Receiver<TextUnit>, strip_tx: SyncSender<StripImage>) -> Result<usize> {
        info!("StripStage: Thread started (pacing {:?})", self.pacing);
        let mut emitted = 0;

        loop {
            let unit = match unit_rx.recv() {
                Ok(unit) => unit,
                Err(_) => {
                    info!("StripStage: Unit channel closed, exiting");
                    break;
                }
            };
            trace!("StripStage: Received unit {}", unit.index());

            let strip = match self.render_unit(unit) {
                Ok(strip) => strip,
                Err(e) => {
                    error!("StripStage: Aborting after {} strips: {}", emitted, e);
                    return Err(e);
                }
            };

            if let Err(e) = strip_tx.send(strip) {
                warn!(
                    "StripStage: Failed to send strip {} (driver closed)",
                    e.0.index()
                );
                break;
            }
            emitted += 1;
            trace!("StripStage: Sent strip, sleeping {:?}", self.pacing);
            thread::sleep(self.pacing);
        }

        info!("StripStage: Thread stopped after {} strips", emitted);
        Ok(emitted)
    }
}

/// Spawn the strip thread, consuming `units`, and return the strip receiver.
pub fn spawn_strip_stage<F>(
    rasterizer: GlyphRasterizer<F>,
    pacing: Duration,
    units: Receiver<TextUnit>,
) -> Result<(Receiver<StripImage>, StageHandle<Result<usize>>)>
where
    F: FontFace + ?Sized + 'static,
{
    let (strip_tx, strip_rx) = sync_channel(0);

    let handle = thread::Builder::new()
        .name(STAGE_NAME.to_string())
        .spawn(move || StripActor::new(rasterizer, pacing).run(units, strip_tx))
        .map_err(|source| RenderError::Spawn {
            stage: STAGE_NAME,
            source,
        })?;

    Ok((strip_rx, StageHandle::new(STAGE_NAME, handle)))
}

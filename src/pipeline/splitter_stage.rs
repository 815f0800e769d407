// src/pipeline/splitter_stage.rs
//! Stage 1 - runs the unit splitter on its own thread.
//!
//! Units are handed over a rendezvous channel (capacity 0), so at most one
//! unit is in flight and the thread blocks until the strip stage takes it.

use super::StageHandle;
use crate::error::{RenderError, Result};
use crate::splitter::{SplitPolicy, TextUnit, Units};
use log::*;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread;

pub(crate) const STAGE_NAME: &str = "splitter";

fn run(text: String, policy: SplitPolicy, unit_tx: SyncSender<TextUnit>) -> usize {
    info!("Splitter: Thread started ({} policy)", policy);

    let mut sent = 0;
    for unit in Units::new(&text, policy) {
        trace!("Splitter: Handing off unit {} '{}'", unit.index(), unit.text());
        if unit_tx.send(unit).is_err() {
            warn!("Splitter: Downstream closed after {} units, stopping", sent);
            return sent;
        }
        sent += 1;
    }

    info!("Splitter: Text exhausted after {} units, closing channel", sent);
    sent
}

/// Spawn the splitter thread and return the receiving end of its channel.
///
/// The sender is dropped when the text is exhausted (closing the channel), or
/// early if the receiver goes away.
pub fn spawn_splitter(
    text: String,
    policy: SplitPolicy,
) -> Result<(Receiver<TextUnit>, StageHandle<usize>)> {
    let (unit_tx, unit_rx) = sync_channel(0);

    let handle = thread::Builder::new()
        .name(STAGE_NAME.to_string())
        .spawn(move || run(text, policy, unit_tx))
        .map_err(|source| RenderError::Spawn {
            stage: STAGE_NAME,
            source,
        })?;

    Ok((unit_rx, StageHandle::new(STAGE_NAME, handle)))
}

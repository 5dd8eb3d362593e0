//! Fire-and-forget save queue
//!
//! Finished games are placed on an outbound channel and written by a
//! dedicated worker thread that owns the store. The game loop never waits on
//! a write and never sees its result; failures are logged and counted.

use super::{GameRecord, RecordStore, StoreError};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Counts reported by the worker when the queue shuts down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub saved: usize,
    pub failed: usize,
}

/// Outbound queue of finished games
pub struct SaveQueue<S: RecordStore + Send + 'static> {
    sender: Option<Sender<GameRecord>>,
    worker: Option<JoinHandle<(S, SaveSummary)>>,
}

impl<S: RecordStore + Send + 'static> SaveQueue<S> {
    /// Move the store onto a worker thread and start accepting records
    ///
    /// # Panics
    /// Panics if the OS refuses to spawn a thread.
    #[must_use]
    pub fn spawn(store: S) -> Self {
        let (sender, receiver) = mpsc::channel::<GameRecord>();

        let worker = thread::Builder::new()
            .name("save-queue".to_string())
            .spawn(move || {
                let mut store = store;
                let mut summary = SaveSummary::default();

                for record in receiver {
                    let player = record.player.clone();
                    match store.insert(record) {
                        Ok(saved) => {
                            summary.saved += 1;
                            info!(id = saved.id, player = %saved.player, xp = saved.xp_gained, "game saved");
                        }
                        Err(err) => {
                            summary.failed += 1;
                            warn!(%player, error = %err, "failed to save game");
                        }
                    }
                }

                debug!(?summary, "save worker stopped");
                (store, summary)
            })
            .expect("failed to spawn save worker");

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Hand a record to the worker without waiting for the write
    pub fn submit(&self, record: GameRecord) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(record).is_err() {
            warn!("save worker is gone, dropping game record");
        }
    }

    /// Stop accepting records, drain the queue and return the store
    ///
    /// # Errors
    /// Returns `StoreError::WorkerPanicked` if the worker thread panicked.
    pub fn shutdown(mut self) -> Result<(S, SaveSummary), StoreError> {
        self.sender.take();
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| StoreError::WorkerPanicked),
            None => Err(StoreError::WorkerPanicked),
        }
    }
}

impl<S: RecordStore + Send + 'static> Drop for SaveQueue<S> {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("save worker panicked");
        }
    }
}

//! Background dataset loading.
//!
//! Reads run on a worker thread and report back over a channel. Every request
//! gets a [`LoadToken`]; only the outcome of the most recent request is ever
//! handed out, so a slow early load cannot overwrite a fast later one.

use super::{CsvReader, Dataset};
use crate::error::Result;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Identifier of one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

/// Result of a finished load, tagged with the request it answers.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The request this outcome belongs to.
    pub token: LoadToken,
    /// Path that was requested.
    pub path: PathBuf,
    /// The loaded dataset or the reason it could not be produced.
    pub result: Result<Dataset>,
}

/// Runs CSV reads off the UI thread.
#[derive(Debug)]
pub struct Loader {
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
    next_token: u64,
    latest: Option<LoadToken>,
    pending: bool,
}

impl Loader {
    /// Create an idle loader.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            next_token: 0,
            latest: None,
            pending: false,
        }
    }

    /// Start loading `path`. Any load still in flight becomes stale.
    pub fn start(&mut self, path: PathBuf) -> LoadToken {
        self.next_token += 1;
        let token = LoadToken(self.next_token);
        self.latest = Some(token);
        self.pending = true;

        tracing::info!("Load {:?} started for {}", token, path.display());

        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = CsvReader::read_path(&path);
            // The receiver is gone when the app has quit; nothing left to report to.
            let _ = tx.send(LoadOutcome {
                token,
                path,
                result,
            });
        });

        token
    }

    /// Whether the latest request has not reported back yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Token of the latest request, if any.
    pub fn latest(&self) -> Option<LoadToken> {
        self.latest
    }

    /// Collect the latest outcome without blocking. Stale outcomes are dropped.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let mut current = None;
        loop {
            match self.rx.try_recv() {
                Ok(outcome) => {
                    if let Some(outcome) = self.accept(outcome) {
                        current = Some(outcome);
                    }
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        current
    }

    /// Block until the latest request reports back or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<LoadOutcome> {
        if !self.pending {
            return None;
        }
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(outcome) => {
                    if let Some(outcome) = self.accept(outcome) {
                        return Some(outcome);
                    }
                },
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                },
            }
        }
    }

    fn accept(&mut self, outcome: LoadOutcome) -> Option<LoadOutcome> {
        if Some(outcome.token) != self.latest {
            tracing::debug!(
                "Discarding stale load {:?} for {} (latest is {:?})",
                outcome.token,
                outcome.path.display(),
                self.latest
            );
            return None;
        }
        self.pending = false;
        Some(outcome)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

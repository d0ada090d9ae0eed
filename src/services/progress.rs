//! Progress reporter for batch uploads.
//!
//! Counts bytes handed to the transport against the batch total and emits
//! `UploadProgress` events over a tokio channel. Emitted fractions are clamped
//! to `[0, 1]` and never decrease.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;

use crate::models::upload::UploadProgress;

#[derive(Debug, Default)]
struct Emitted {
    last_fraction: f64,
    any: bool,
}

#[derive(Debug)]
pub struct ProgressReporter {
    total_bytes: u64,
    bytes_sent: AtomicU64,
    emitted: Mutex<Emitted>,
    tx: Option<UnboundedSender<UploadProgress>>,
}

impl ProgressReporter {
    pub fn new(total_bytes: u64, tx: Option<UnboundedSender<UploadProgress>>) -> Self {
        Self {
            total_bytes,
            bytes_sent: AtomicU64::new(0),
            emitted: Mutex::new(Emitted::default()),
            tx,
        }
    }

    /// Reporter that counts bytes but emits nothing.
    pub fn silent(total_bytes: u64) -> Self {
        Self::new(total_bytes, None)
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Fraction of the batch sent so far, clamped to `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        fraction_of(self.bytes_sent(), self.total_bytes)
    }

    /// Emit the initial `0.0` event.
    pub fn start(&self) {
        self.emit(0.0);
    }

    /// Record `bytes` more handed to the transport.
    pub fn advance(&self, bytes: u64) {
        let sent = self.bytes_sent.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.emit(fraction_of(sent, self.total_bytes));
    }

    /// Emit the final `1.0` event once the server has accepted the batch.
    pub fn complete(&self) {
        self.emit(1.0);
    }

    fn emit(&self, fraction: f64) {
        let mut emitted = self
            .emitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if emitted.any && fraction <= emitted.last_fraction {
            return;
        }
        emitted.any = true;
        emitted.last_fraction = fraction;

        if let Some(tx) = &self.tx {
            // Receiver may already be gone (view detached); that is not an error.
            let _ = tx.send(UploadProgress {
                bytes_sent: self.bytes_sent().min(self.total_bytes),
                total_bytes: self.total_bytes,
                fraction,
            });
        }
    }
}

fn fraction_of(sent: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (sent as f64 / total as f64).min(1.0)
}

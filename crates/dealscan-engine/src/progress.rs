//! Progress reporter: a time-based approximation of per-file completion.
//!
//! The counter is deliberately not derived from the real submission — exact
//! per-file server-side progress is not observable by the client, so a
//! fixed-cadence estimate stands in for it. The ticker task is canceled when
//! the reporter is dropped, regardless of whether the real request finished.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Pure saturating counter over a fixed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressGauge {
    total_files: usize,
    files_processed: usize,
}

impl ProgressGauge {
    /// An empty batch is treated as one file so percent() never divides by
    /// zero.
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files: total_files.max(1),
            files_processed: 0,
        }
    }

    /// Advance by one file, saturating at the total.
    pub fn advance(&mut self) {
        if self.files_processed < self.total_files {
            self.files_processed += 1;
        }
    }

    pub fn files_processed(&self) -> usize {
        self.files_processed
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn is_complete(&self) -> bool {
        self.files_processed >= self.total_files
    }

    pub fn percent(&self) -> f64 {
        100.0 * self.files_processed as f64 / self.total_files as f64
    }
}

/// Spawned ticker that advances a [`ProgressGauge`] on a wall-clock interval
/// and publishes the count over a watch channel. Once the gauge saturates the
/// task exits and the reporter is inert.
pub struct ProgressReporter {
    total_files: usize,
    rx: watch::Receiver<usize>,
    ticker: JoinHandle<()>,
}

impl ProgressReporter {
    pub fn spawn(total_files: usize, tick: Duration) -> Self {
        let mut gauge = ProgressGauge::new(total_files);
        let total = gauge.total_files();
        let (tx, rx) = watch::channel(0usize);

        let ticker = tokio::spawn(async move {
            while !gauge.is_complete() {
                tokio::time::sleep(tick).await;
                gauge.advance();
                if tx.send(gauge.files_processed()).is_err() {
                    break;
                }
            }
        });

        Self {
            total_files: total,
            rx,
            ticker,
        }
    }

    pub fn files_processed(&self) -> usize {
        *self.rx.borrow()
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn percent(&self) -> f64 {
        100.0 * self.files_processed() as f64 / self.total_files as f64
    }

    /// Wait until the published count changes, returning the new value.
    /// Returns None once the ticker has finished and no change is coming.
    pub async fn changed(&mut self) -> Option<usize> {
        match self.rx.changed().await {
            Ok(()) => Some(*self.rx.borrow()),
            Err(_) => None,
        }
    }

    /// Stop the ticker. Idempotent; dropping the reporter has the same
    /// effect.
    pub fn cancel(&self) {
        self.ticker.abort();
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

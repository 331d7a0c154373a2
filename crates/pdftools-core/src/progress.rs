//! Per-page progress reporting and cooperative cancellation

use crate::error::{PdfToolsError, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A single progress event, emitted once per processed page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub current: u32,
    pub total: u32,
    /// 0-100, rounded
    pub percentage: u8,
    pub status: String,
}

impl Progress {
    pub fn new(current: u32, total: u32, status: impl Into<String>) -> Self {
        let percentage = if total == 0 {
            100
        } else {
            ((current.min(total) as f64 * 100.0) / total as f64).round() as u8
        };

        Self {
            current,
            total,
            percentage,
            status: status.into(),
        }
    }
}

/// Receiver of progress events
///
/// Events arrive synchronously between page iterations, in page order.
/// Pass `()` to ignore progress, or any `FnMut(&Progress)` closure.
pub trait ProgressSink {
    fn report(&mut self, progress: &Progress);
}

impl ProgressSink for () {
    fn report(&mut self, _progress: &Progress) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&Progress),
{
    fn report(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Cooperative cancellation flag checked between pages
///
/// Clones share the same flag, so one clone can be handed to the caller
/// while the pipeline holds another. The default token never fires.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(PdfToolsError::Cancelled)
        } else {
            Ok(())
        }
    }
}

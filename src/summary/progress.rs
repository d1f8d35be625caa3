//! Advisory progress reporting for a surrounding presentation layer

use tokio::sync::mpsc::UnboundedSender;

/// One discrete step of a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// 1-based step that has just been reached
    pub step: usize,
    pub total: usize,
    pub label: String,
}

impl ProgressUpdate {
    pub fn new(step: usize, total: usize, label: impl Into<String>) -> Self {
        Self {
            step,
            total,
            label: label.into(),
        }
    }

    /// Completed fraction in `0.0..=1.0`
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.step.min(self.total) as f32) / (self.total as f32)
    }
}

/// Receives progress updates. Implementations must not fail the pipeline.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, update: ProgressUpdate);
}

/// Discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&self, _update: ProgressUpdate) {}
}

/// Emits updates as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&self, update: ProgressUpdate) {
        tracing::info!(
            step = update.step,
            total = update.total,
            fraction = update.fraction(),
            "{}",
            update.label
        );
    }
}

/// Forwards updates over a channel, e.g. to a task drawing a progress bar
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: UnboundedSender<ProgressUpdate>,
}

impl ChannelProgress {
    pub fn new(sender: UnboundedSender<ProgressUpdate>) -> Self {
        Self { sender }
    }
}

impl ProgressObserver for ChannelProgress {
    fn on_progress(&self, update: ProgressUpdate) {
        // receiver gone: nobody is watching anymore
        if let Err(e) = self.sender.send(update) {
            tracing::debug!("progress receiver dropped: {:?}", e.0.label);
        }
    }
}

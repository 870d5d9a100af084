//! Batch progress reporting.

/// Trait for receiving progress updates from a batch procedure.
pub trait ImportProgress {
    /// Called after each record (owned game, article, catalog entry) is processed.
    fn on_item(&self, current: usize, total: usize, name: &str);

    /// Called when a phase starts (e.g., "Fetching IGN").
    fn on_phase(&self, message: &str);

    /// Called when the procedure is complete.
    fn on_complete(&self, message: &str);
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_item(&self, current: usize, total: usize, name: &str) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, name);
        } else {
            log::debug!("  [{}/{}] {}", current, total, name);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}

//! Spinner shown while a batch procedure waits on the network.

use std::io::IsTerminal;
use std::time::Duration;

use gamerhub_import::{ImportProgress, LogProgress};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress reporter backed by a single indicatif spinner.
///
/// Phase and item updates replace the spinner message; the completion
/// message is logged once the spinner is cleared.
pub(crate) struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    /// When `quiet` is true the spinner is never drawn.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("/-\\|");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }
}

impl ImportProgress for SpinnerProgress {
    fn on_item(&self, current: usize, total: usize, name: &str) {
        self.pb.set_message(format!("[{current}/{total}] {name}"));
    }

    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{message}");
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

/// Progress reporter for a batch command: a spinner on an interactive
/// terminal, plain log lines when verbose or redirected.
pub(crate) fn batch_progress(quiet: bool, verbose: bool) -> Box<dyn ImportProgress> {
    if verbose || !std::io::stderr().is_terminal() {
        Box::new(LogProgress)
    } else {
        Box::new(SpinnerProgress::new(quiet))
    }
}

use dirpatch_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI progress reporter using indicatif.
///
/// - Scan phase: spinner with a live file count (total unknown upfront)
/// - Reconcile: instantaneous, completion line only
/// - Write phase: spinner
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }

    fn spinner(message: &'static str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self) {
        self.set_bar(Self::spinner("Scanning trees..."));
    }

    fn on_scan_progress(&self, files_found: usize, _current_path: &str) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_message(format!("Scanning... {} files hashed", files_found));
        }
    }

    fn on_scan_complete(&self, total_files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} files in {:.2}s",
            total_files, duration_secs
        );
    }

    fn on_reconcile_complete(&self, unchanged: usize, conflicts: usize, duration_secs: f64) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Reconcile complete: {} unchanged, {} conflicting in {:.2}s",
            unchanged, conflicts, duration_secs
        );
    }

    fn on_write_start(&self) {
        self.set_bar(Self::spinner("Writing report..."));
    }

    fn on_write_complete(&self, destination: &str, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Report written to {} in {:.2}s",
            destination, duration_secs
        );
    }
}

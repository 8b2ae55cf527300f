/// Trait for reporting diff progress.
///
/// CLI implements with tracing/indicatif; tests use [`SilentReporter`].
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self) {}
    fn on_scan_progress(&self, _files_found: usize, _current_path: &str) {}
    fn on_scan_complete(&self, _total_files: usize, _duration_secs: f64) {}
    fn on_reconcile_complete(&self, _unchanged: usize, _conflicts: usize, _duration_secs: f64) {}
    fn on_write_start(&self) {}
    fn on_write_complete(&self, _destination: &str, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

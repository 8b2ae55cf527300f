use crate::error::Error;
use crate::hasher::HashAlgorithm;
use crate::model::{Operation, ReconcileResult};
use crate::progress::ProgressReporter;
use crate::reconcile;
use crate::report;
use crate::scanner;
use chrono::Local;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Resolved inputs for one comparison run. The CLI layer guarantees the
/// algorithm name was recognized before this is built; the roots are
/// validated by the scanners themselves.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub root_a: PathBuf,
    pub root_b: PathBuf,
    pub algorithm: HashAlgorithm,
    pub ignore_unchanged: bool,
    pub ignore_patterns: Vec<String>,
    pub destination: PathBuf,
}

#[derive(Debug)]
pub struct DiffSummary {
    pub scan_duration: Duration,
    pub reconcile_duration: Duration,
    pub write_duration: Duration,
    pub files_a: usize,
    pub files_b: usize,
    pub added_a: usize,
    pub added_b: usize,
    pub unchanged: usize,
    pub conflicts: usize,
    pub destination: PathBuf,
}

pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Run the full compare pipeline:
    /// 1. Scan both roots concurrently, hashing files across a shared pool
    /// 2. Reconcile the two scans into a symmetric patch pair
    /// 3. Write the patch report
    ///
    /// Both scans are awaited before either error propagates; on a scan
    /// failure no report is written. In-flight file hashes are not aborted
    /// when the sibling scan fails.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<DiffSummary, Error> {
        let options = &self.options;

        // One pool shared by both scans and all per-file hashing, sized at
        // twice the available parallelism.
        let workers = 2 * thread::available_parallelism().map(|n| n.get()).unwrap_or(2);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| Error::Other(format!("Failed to build worker pool: {}", e)))?;

        info!(
            "Scanning '{}' and '{}'...",
            options.root_a.display(),
            options.root_b.display()
        );
        reporter.on_scan_start();
        let scan_start = Instant::now();
        let files_seen = AtomicUsize::new(0);

        let (result_a, result_b) = pool.install(|| {
            rayon::join(
                || {
                    scanner::scan_directory(
                        &options.root_a,
                        options.algorithm,
                        &options.ignore_patterns,
                        reporter,
                        &files_seen,
                    )
                },
                || {
                    scanner::scan_directory(
                        &options.root_b,
                        options.algorithm,
                        &options.ignore_patterns,
                        reporter,
                        &files_seen,
                    )
                },
            )
        });
        let scan_a = result_a?;
        let scan_b = result_b?;

        let scan_duration = scan_start.elapsed();
        let files_a = scan_a.len();
        let files_b = scan_b.len();
        reporter.on_scan_complete(files_a + files_b, scan_duration.as_secs_f64());
        debug!(
            "Scan completed in {:.2}s — {} files on A, {} files on B",
            scan_duration.as_secs_f64(),
            files_a,
            files_b,
        );

        info!("Reconciling scans...");
        let reconcile_start = Instant::now();
        let result = reconcile::reconcile(&scan_a, &scan_b);
        let reconcile_duration = reconcile_start.elapsed();
        let unchanged = result.patch_a.count(Operation::Unchanged);
        let conflicts = result.patch_a.count(Operation::Conflict);
        reporter.on_reconcile_complete(unchanged, conflicts, reconcile_duration.as_secs_f64());
        debug!(
            "Reconcile completed in {:.2}s — {} unchanged, {} conflicting",
            reconcile_duration.as_secs_f64(),
            unchanged,
            conflicts,
        );

        info!("Writing report to '{}'...", options.destination.display());
        reporter.on_write_start();
        let write_start = Instant::now();
        self.write_report(&result)?;
        let write_duration = write_start.elapsed();
        reporter.on_write_complete(
            &options.destination.display().to_string(),
            write_duration.as_secs_f64(),
        );
        debug!("Report written in {:.2}s", write_duration.as_secs_f64());

        Ok(DiffSummary {
            scan_duration,
            reconcile_duration,
            write_duration,
            files_a,
            files_b,
            added_a: result.patch_a.count(Operation::Add),
            added_b: result.patch_b.count(Operation::Add),
            unchanged,
            conflicts,
            destination: options.destination.clone(),
        })
    }

    fn write_report(&self, result: &ReconcileResult) -> Result<(), Error> {
        let options = &self.options;
        report::write_patch_file(
            &options.destination,
            &options.root_a.display().to_string(),
            &options.root_b.display().to_string(),
            result,
            options.ignore_unchanged,
            Local::now(),
        )
    }
}

pub mod config;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod model;
pub mod progress;
pub mod reconcile;
pub mod report;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{DiffEngine, DiffOptions, DiffSummary};
pub use error::Error;
pub use hasher::HashAlgorithm;
pub use model::{FileRecord, Operation, PatchResult, ReconcileResult, ScanResult};
pub use progress::{ProgressReporter, SilentReporter};

use crate::error::Error;
use crate::hasher::{self, HashAlgorithm};
use crate::model::{FileRecord, ScanResult};
use crate::progress::ProgressReporter;
use glob::Pattern;
use rayon::prelude::*;
use std::fs::{self, DirEntry};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::error;

/// Recursively scan one root, hashing every regular file it contains.
///
/// Per-file failures (unreadable file, permission denied) are logged and the
/// file is dropped from the result; the scan keeps going. Only a root that
/// does not exist or is not a readable directory fails the whole scan.
/// Traversal order is unspecified; per-file work fans out over the ambient
/// rayon pool.
pub fn scan_directory(
    root: &Path,
    algorithm: HashAlgorithm,
    ignore_globs: &[String],
    reporter: &dyn ProgressReporter,
    files_seen: &AtomicUsize,
) -> Result<ScanResult, Error> {
    let metadata = fs::metadata(root).map_err(|source| Error::Scan {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let results = ScanResult::new();

    let entries = fs::read_dir(root).map_err(|source| Error::Scan {
        path: root.to_path_buf(),
        source,
    })?;

    entries.par_bridge().for_each(|entry_result| {
        handle_entry(
            entry_result,
            root,
            root,
            algorithm,
            &ignore_patterns,
            &results,
            reporter,
            files_seen,
        );
    });

    Ok(results)
}

/// Subdirectory traversal below the root. Unlike the root itself, an
/// unreadable subdirectory is logged and skipped rather than failing the scan.
fn visit_dir(
    dir: &Path,
    root: &Path,
    algorithm: HashAlgorithm,
    ignore_patterns: &[Pattern],
    results: &ScanResult,
    reporter: &dyn ProgressReporter,
    files_seen: &AtomicUsize,
) {
    if ignore_patterns
        .iter()
        .any(|pattern| pattern.matches_path(dir))
    {
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            error!("Error reading directory {}: {}", dir.display(), err);
            return;
        }
    };

    entries.par_bridge().for_each(|entry_result| {
        handle_entry(
            entry_result,
            dir,
            root,
            algorithm,
            ignore_patterns,
            results,
            reporter,
            files_seen,
        );
    });
}

fn handle_entry(
    entry_result: std::io::Result<DirEntry>,
    parent: &Path,
    root: &Path,
    algorithm: HashAlgorithm,
    ignore_patterns: &[Pattern],
    results: &ScanResult,
    reporter: &dyn ProgressReporter,
    files_seen: &AtomicUsize,
) {
    let entry = match entry_result {
        Ok(entry) => entry,
        Err(err) => {
            error!(
                "Error reading directory entry under {}: {}",
                parent.display(),
                err
            );
            return;
        }
    };

    let path = entry.path();
    let file_type = match entry.file_type() {
        Ok(file_type) => file_type,
        Err(err) => {
            error!("Error reading file type for {}: {}", path.display(), err);
            return;
        }
    };

    // file_type() does not traverse symlinks, so links, sockets and devices
    // all fall through both arms and are left out of the scan.
    if file_type.is_dir() {
        visit_dir(
            &path,
            root,
            algorithm,
            ignore_patterns,
            results,
            reporter,
            files_seen,
        );
    } else if file_type.is_file() {
        if ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(&path))
        {
            return;
        }

        match process_file(&entry, root, algorithm) {
            Ok(record) => {
                let found = files_seen.fetch_add(1, Ordering::Relaxed) + 1;
                reporter.on_scan_progress(found, &record.path);
                results.insert(record.path.clone(), record);
            }
            Err(err) => {
                error!("Skipping file '{}': {}", path.display(), err);
            }
        }
    }
}

fn process_file(entry: &DirEntry, root: &Path, algorithm: HashAlgorithm) -> Result<FileRecord, Error> {
    let path = entry.path();
    let unreadable = |source: std::io::Error| Error::UnreadableFile {
        path: path.clone(),
        source,
    };

    let metadata = entry.metadata().map_err(unreadable)?;
    let modified = metadata.modified().map_err(unreadable)?;
    let digest = hasher::digest_file(&path, algorithm)?;

    Ok(FileRecord {
        path: relative_path(root, &path),
        digest,
        size: metadata.len(),
        modified,
    })
}

/// Root-relative path with `/` separators regardless of platform.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

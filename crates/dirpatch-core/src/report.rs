//! Patch report serialization.
//!
//! The layout is a committed interface:
//!
//! ```text
//! # dirpatch report generated at 2024-03-01 09:15:00
//! # comparing 'left/root' with 'right/root'
//!
//! --- left/root
//! + <digest>  <size>  <path>
//! = <digest>  <size>  <path>
//! ! <digest>  <size>  <path>
//!
//! --- right/root
//! ...
//! ```
//!
//! Lines within a block are sorted lexicographically by path, which is the
//! only ordering guarantee in the whole system. The caller supplies the
//! timestamp, so serializing the same reconcile result twice yields
//! identical bytes.

use crate::error::Error;
use crate::model::{FileRecord, Operation, PatchResult, ReconcileResult};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn write_patch<W: Write>(
    out: &mut W,
    label_a: &str,
    label_b: &str,
    result: &ReconcileResult,
    ignore_unchanged: bool,
    generated_at: DateTime<Local>,
) -> io::Result<()> {
    writeln!(
        out,
        "# dirpatch report generated at {}",
        generated_at.format(TIMESTAMP_FORMAT)
    )?;
    writeln!(out, "# comparing '{}' with '{}'", label_a, label_b)?;
    writeln!(out)?;

    write_patch_block(out, label_a, &result.patch_a, ignore_unchanged)?;
    writeln!(out)?;
    write_patch_block(out, label_b, &result.patch_b, ignore_unchanged)?;

    Ok(())
}

/// Write the report to a file, creating the parent directory if needed.
pub fn write_patch_file(
    destination: &Path,
    label_a: &str,
    label_b: &str,
    result: &ReconcileResult,
    ignore_unchanged: bool,
    generated_at: DateTime<Local>,
) -> Result<(), Error> {
    let write_error = |source: io::Error| Error::Write {
        path: destination.to_path_buf(),
        source,
    };

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
    }

    let file = File::create(destination).map_err(write_error)?;
    let mut out = BufWriter::new(file);
    write_patch(
        &mut out,
        label_a,
        label_b,
        result,
        ignore_unchanged,
        generated_at,
    )
    .map_err(write_error)?;
    out.flush().map_err(write_error)?;

    Ok(())
}

fn write_patch_block<W: Write>(
    out: &mut W,
    label: &str,
    patch: &PatchResult,
    ignore_unchanged: bool,
) -> io::Result<()> {
    let mut lines: Vec<(Operation, &FileRecord)> = Vec::new();
    for operation in Operation::ALL {
        if ignore_unchanged && operation == Operation::Unchanged {
            continue;
        }
        lines.extend(patch.records(operation).iter().map(|r| (operation, r)));
    }
    lines.sort_by(|(_, left), (_, right)| left.path.cmp(&right.path));

    writeln!(out, "--- {}", label)?;
    for (operation, record) in lines {
        writeln!(out, "{} {}", operation, record)?;
    }

    Ok(())
}

use clap::{Args, Parser, Subcommand};
use dirpatch_core::HashAlgorithm;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dirpatch")]
#[command(about = "Checksum-based reconciliation report between two directory trees", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare two directory trees and write a patch report
    Diff(DiffArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// First directory to scan (side A)
    pub dir_a: PathBuf,

    /// Second directory to scan (side B)
    pub dir_b: PathBuf,

    /// Content hash algorithm: md5, sha1, sha256 or blake3
    #[arg(long = "hash", value_parser = HashAlgorithm::from_name)]
    pub hash: Option<HashAlgorithm>,

    /// Leave unchanged files out of the report
    #[arg(short = 'u', long)]
    pub ignore_unchanged: bool,

    /// Report destination (defaults to a timestamped file in the report directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

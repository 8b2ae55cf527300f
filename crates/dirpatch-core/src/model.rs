use dashmap::DashMap;
use std::fmt;
use std::time::SystemTime;

/// One file observed during a scan of a single root.
///
/// `path` is root-relative and uses `/` separators on every platform, so the
/// same tree scanned on different machines keys identically. Two records
/// describe the same content exactly when their digests are equal; `size` and
/// `modified` are carried for reporting only.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: String,
    pub digest: String,
    pub size: u64,
    pub modified: SystemTime,
}

impl FileRecord {
    pub fn same_content(&self, other: &FileRecord) -> bool {
        self.digest == other.digest
    }
}

impl fmt::Display for FileRecord {
    /// Committed report layout: `<digest>  <size>  <path>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  {}", self.digest, self.size, self.path)
    }
}

/// Relative path → record, produced by one scan over one root.
///
/// Many workers insert during a scan, but each path is produced by exactly
/// one worker, so concurrent insertion never contends on a key.
pub type ScanResult = DashMap<String, FileRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Unchanged,
    Conflict,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Unchanged, Operation::Conflict];

    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Unchanged => '=',
            Operation::Conflict => '!',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One side's classification of every relevant path, bucketed by operation.
///
/// All records are that side's own, so a conflict line reports the size and
/// mtime seen on that side. Bucket order is unspecified; the report writer
/// owns ordering.
#[derive(Debug, Clone, Default)]
pub struct PatchResult {
    added: Vec<FileRecord>,
    unchanged: Vec<FileRecord>,
    conflicting: Vec<FileRecord>,
}

impl PatchResult {
    pub fn push(&mut self, operation: Operation, record: FileRecord) {
        match operation {
            Operation::Add => self.added.push(record),
            Operation::Unchanged => self.unchanged.push(record),
            Operation::Conflict => self.conflicting.push(record),
        }
    }

    pub fn records(&self, operation: Operation) -> &[FileRecord] {
        match operation {
            Operation::Add => &self.added,
            Operation::Unchanged => &self.unchanged,
            Operation::Conflict => &self.conflicting,
        }
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.records(operation).len()
    }

    pub fn contains(&self, operation: Operation, path: &str) -> bool {
        self.records(operation).iter().any(|r| r.path == path)
    }
}

/// Symmetric pair of patches: `patch_a` describes the comparison from A's
/// point of view, `patch_b` from B's.
#[derive(Debug, Clone, Default)]
pub struct ReconcileResult {
    pub patch_a: PatchResult,
    pub patch_b: PatchResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn record(path: &str, digest: &str) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            digest: digest.to_string(),
            size: 11,
            modified: UNIX_EPOCH,
        }
    }

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.to_string(), "+");
        assert_eq!(Operation::Unchanged.to_string(), "=");
        assert_eq!(Operation::Conflict.to_string(), "!");
    }

    #[test]
    fn test_record_display_layout() {
        let record = FileRecord {
            path: "sub/x.txt".to_string(),
            digest: "5d41402abc4b2a76b9719d911017c592".to_string(),
            size: 5,
            modified: UNIX_EPOCH,
        };
        assert_eq!(
            record.to_string(),
            "5d41402abc4b2a76b9719d911017c592  5  sub/x.txt"
        );
    }

    #[test]
    fn test_same_content_ignores_metadata() {
        let mut a = record("x.txt", "abc123");
        let mut b = record("y.txt", "abc123");
        a.size = 1;
        b.size = 2;
        b.modified = UNIX_EPOCH + std::time::Duration::from_secs(3600);
        assert!(a.same_content(&b));

        let c = record("x.txt", "def456");
        assert!(!a.same_content(&c));
    }

    #[test]
    fn test_patch_result_buckets() {
        let mut patch = PatchResult::default();
        patch.push(Operation::Add, record("a.txt", "d1"));
        patch.push(Operation::Conflict, record("b.txt", "d2"));
        patch.push(Operation::Conflict, record("c.txt", "d3"));

        assert_eq!(patch.count(Operation::Add), 1);
        assert_eq!(patch.count(Operation::Unchanged), 0);
        assert_eq!(patch.count(Operation::Conflict), 2);
        assert!(patch.contains(Operation::Add, "a.txt"));
        assert!(!patch.contains(Operation::Conflict, "a.txt"));
    }
}

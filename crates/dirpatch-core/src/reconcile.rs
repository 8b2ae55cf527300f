use crate::model::{Operation, ReconcileResult, ScanResult};

/// Partition the two scans into added / unchanged / conflicting paths and
/// build the symmetric patch pair. Pure function over the finished scans:
/// no I/O, cannot fail.
///
/// A path only on one side lands in that side's ADD bucket. A path on both
/// sides is UNCHANGED when the digests match and CONFLICT otherwise; digest
/// equality is the sole criterion, so differing timestamps or sizes never
/// demote a file to a conflict. UNCHANGED and CONFLICT entries appear in
/// both patches, each carrying its own side's record.
pub fn reconcile(scan_a: &ScanResult, scan_b: &ScanResult) -> ReconcileResult {
    let mut result = ReconcileResult::default();

    for entry in scan_a.iter() {
        let record_a = entry.value();
        match scan_b.get(entry.key()) {
            None => result.patch_a.push(Operation::Add, record_a.clone()),
            Some(guard) => {
                let record_b = guard.value();
                let operation = if record_a.same_content(record_b) {
                    Operation::Unchanged
                } else {
                    Operation::Conflict
                };
                result.patch_a.push(operation, record_a.clone());
                result.patch_b.push(operation, record_b.clone());
            }
        }
    }

    for entry in scan_b.iter() {
        if !scan_a.contains_key(entry.key()) {
            result.patch_b.push(Operation::Add, entry.value().clone());
        }
    }

    result
}

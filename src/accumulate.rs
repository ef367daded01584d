//! Accumulated I/O volume over the full log span
//!
//! Integrates per-device operation and sector rates over consecutive
//! intervals (right-endpoint values) into total request counts and byte
//! volumes.

use crate::record::LogRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Disk sector size in bytes, the fixed unit of the sector-rate metrics
pub const SECTOR_BYTES: f64 = 512.0;

/// Total requests and bytes moved by one device over the whole log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumeTotals {
    pub read_requests: f64,
    pub read_bytes: f64,
    pub write_requests: f64,
    pub write_bytes: f64,
}

/// Accumulate per-device I/O volume over an ordered log.
///
/// Returns `None` when fewer than two records exist (no interval to
/// integrate) or when any record lacks a disk block. Every key of the disk
/// maps is integrated, the `"total"` pseudo-device included, so the combined
/// row of a multi-device report reads straight out of the result.
pub fn accumulate(records: &[LogRecord]) -> Option<BTreeMap<String, VolumeTotals>> {
    if records.len() < 2 {
        return None;
    }

    let mut samples = Vec::with_capacity(records.len());
    for record in records {
        samples.push((record.time, record.disk.as_ref()?));
    }

    let mut totals: BTreeMap<String, VolumeTotals> = BTreeMap::new();

    for pair in samples.windows(2) {
        let (prev_time, _) = pair[0];
        let (time, disk) = pair[1];
        let dt = time - prev_time;

        for (name, entry) in &disk.entries {
            let total = totals.entry(name.clone()).or_default();
            total.read_requests += entry.riops * dt;
            total.read_bytes += entry.rsecps * SECTOR_BYTES * dt;
            total.write_requests += entry.wiops * dt;
            total.write_bytes += entry.wsecps * SECTOR_BYTES * dt;
        }
    }

    Some(totals)
}

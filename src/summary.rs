//! Duration-weighted log summarization
//!
//! Collapses a whole log into one synthetic record. Two weighting policies
//! apply and must not be collapsed into one:
//!
//! - rate metrics (IOPS, sector rates, CPU percentages, network rates) are
//!   time-weighted: `avg = sum(v[i] * dt[i]) / duration`
//! - latency metrics are operation-count-weighted: an interval with almost
//!   no I/O must not drag the average toward its (meaningless) latency, so
//!   `avg = sum(lat[i] * iops[i] * dt[i]) / sum(iops[i] * dt[i])`
//!
//! Values carry the right-endpoint convention: `v[i]` describes the interval
//! ending at `t[i]`, so the first record contributes only its timestamp.

use crate::record::LogRecord;

/// Compute one duration-weighted summary record over an ordered log.
///
/// Returns `None` for an empty log. A single-record log (or one with zero
/// elapsed time) is the documented degenerate case: the first record is
/// returned unchanged, since no interval exists to average over.
///
/// Identity fields (core count, device and interface lists) are copied from
/// the first record. A record missing a cpu/disk/net block excludes its
/// interval from that block's weight; a block present in no interval is
/// absent from the summary.
pub fn summarize(records: &[LogRecord]) -> Option<LogRecord> {
    let first = records.first()?;
    if records.len() == 1 {
        return Some(first.clone());
    }

    let duration = records[records.len() - 1].time - first.time;
    if duration <= 0.0 {
        return Some(first.clone());
    }

    let mut avg = LogRecord {
        time: first.time,
        cpu: first.cpu.as_ref().map(|c| c.zeroed()),
        disk: first.disk.as_ref().map(|d| d.zeroed()),
        net: first.net.as_ref().map(|n| n.zeroed()),
    };

    let mut cpu_weight = 0.0;
    let mut disk_weight = 0.0;
    let mut net_weight = 0.0;

    for pair in records.windows(2) {
        let dt = pair[1].time - pair[0].time;

        if let (Some(acc), Some(cur)) = (avg.cpu.as_mut(), pair[1].cpu.as_ref()) {
            acc.add_scaled(cur, dt);
            cpu_weight += dt;
        }
        if let (Some(acc), Some(cur)) = (avg.disk.as_mut(), pair[1].disk.as_ref()) {
            acc.add_rates_scaled(cur, dt);
            disk_weight += dt;
        }
        if let (Some(acc), Some(cur)) = (avg.net.as_mut(), pair[1].net.as_ref()) {
            acc.add_scaled(cur, dt);
            net_weight += dt;
        }
    }

    if cpu_weight > 0.0 {
        if let Some(cpu) = avg.cpu.as_mut() {
            cpu.scale(1.0 / cpu_weight);
        }
    } else {
        avg.cpu = None;
    }

    if disk_weight > 0.0 {
        if let Some(disk) = avg.disk.as_mut() {
            disk.scale_rates(1.0 / disk_weight);
            weight_latencies_by_ops(disk, records);
        }
    } else {
        avg.disk = None;
    }

    if net_weight > 0.0 {
        if let Some(net) = avg.net.as_mut() {
            net.scale(1.0 / net_weight);
        }
    } else {
        avg.net = None;
    }

    Some(avg)
}

/// Second pass for `r_await`/`w_await`: operation-count weighting.
///
/// Read latency pairs with riops, write latency with wiops. A denominator of
/// zero (no I/O over the whole log) yields exactly 0.0, never NaN.
fn weight_latencies_by_ops(disk: &mut crate::record::DiskStat, records: &[LogRecord]) {
    for (name, entry) in disk.entries.iter_mut() {
        let mut read_time = 0.0;
        let mut write_time = 0.0;
        let mut read_ops = 0.0;
        let mut write_ops = 0.0;

        for pair in records.windows(2) {
            let cur = match pair[1].disk.as_ref().and_then(|d| d.entries.get(name)) {
                Some(entry) => entry,
                None => continue,
            };
            let dt = pair[1].time - pair[0].time;

            read_time += cur.r_await * cur.riops * dt;
            write_time += cur.w_await * cur.wiops * dt;
            read_ops += cur.riops * dt;
            write_ops += cur.wiops * dt;
        }

        entry.r_await = if read_ops > 0.0 {
            read_time / read_ops
        } else {
            0.0
        };
        entry.w_await = if write_ops > 0.0 {
            write_time / write_ops
        } else {
            0.0
        };
    }
}

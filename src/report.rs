//! Report rendering: human-readable text and machine-readable JSON
//!
//! Text mode applies unit conversions (sector rates to MB/s, latency
//! auto-scaled to usec/msec, byte volumes auto-scaled up to GB). JSON mode
//! emits the raw summary values untouched.

use crate::accumulate::{VolumeTotals, SECTOR_BYTES};
use crate::record::{CpuStat, DiskEntry, DiskStat, LogRecord, NetEntry, NetStat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Machine-readable summary report.
///
/// All four top-level keys are always serialized, absent blocks as `null`,
/// so consumers can rely on the key set regardless of log content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Measurement duration in seconds
    pub exectime: f64,
    /// Duration-weighted CPU summary (raw percentages, not core-scaled)
    pub cpu: Option<CpuStat>,
    /// Duration-weighted disk summary (raw rates, no unit conversion)
    pub disk: Option<DiskStat>,
    /// Duration-weighted network summary
    pub net: Option<NetStat>,
}

impl SummaryReport {
    /// Build a report from a summary record, consuming it
    pub fn new(summary: Option<LogRecord>, duration: f64) -> Self {
        let (cpu, disk, net) = match summary {
            Some(record) => (record.cpu, record.disk, record.net),
            None => (None, None, None),
        };
        Self {
            exectime: duration,
            cpu,
            disk,
            net,
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Render the human-readable summary report.
///
/// An absent summary produces an explanatory message instead of an error:
/// a too-short recording is a normal outcome, not a failure.
pub fn render_text(
    summary: Option<&LogRecord>,
    totals: Option<&BTreeMap<String, VolumeTotals>>,
    duration: f64,
    title: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("== performance summary of '{}' ==\n", title));

    let summary = match summary {
        Some(summary) => summary,
        None => {
            out.push_str("\nNo performance information was collected.\n");
            out.push_str("Recording was too short, or nothing happened.\n");
            return out;
        }
    };

    out.push_str(&format!("\nDuration: {:.3} sec\n", duration));

    if let Some(cpu) = summary.cpu.as_ref() {
        out.push_str(&cpu_section(cpu));
    }
    if let Some(disk) = summary.disk.as_ref() {
        out.push_str(&disk_section(disk, totals));
    }
    if let Some(net) = summary.net.as_ref() {
        out.push_str(&net_section(net));
    }

    out
}

/// CPU breakdown scaled to the multi-core maximum (100% per core).
///
/// `other` picks up whatever the known buckets do not account for (steal,
/// guest, rounding drift), clamped at zero.
fn cpu_section(cpu: &CpuStat) -> String {
    let nr = f64::from(cpu.nr_cpu);
    let all = &cpu.all;

    let usr = (all.usr + all.nice) * nr;
    let sys = all.sys * nr;
    let iowait = all.iowait * nr;
    let irq = all.irq * nr;
    let soft = all.soft * nr;
    let idle = all.idle * nr;

    let known = all.usr + all.nice + all.sys + all.iowait + all.irq + all.soft + all.idle;
    let other = (100.0 - known).max(0.0) * nr;

    let non_idle = 100.0 * nr - idle - iowait;
    let idle_total = idle + iowait;

    let mut out = String::new();
    out.push_str(&format!("\n* Average CPU usage (MAX: {} %)\n", 100 * cpu.nr_cpu));
    out.push_str(&format!("  Non-idle usage: {:.2} %\n", non_idle));
    out.push_str(&format!("       %usr: {:.2} %\n", usr));
    out.push_str(&format!("       %sys: {:.2} %\n", sys));
    out.push_str(&format!("       %irq: {:.2} %\n", irq));
    out.push_str(&format!("      %soft: {:.2} %\n", soft));
    out.push_str(&format!("     %other: {:.2} %\n", other));
    out.push_str(&format!("  Idle usage: {:.2} %\n", idle_total));
    out.push_str(&format!("    %iowait: {:.2} %\n", iowait));
    out.push_str(&format!("      %idle: {:.2} %\n", idle));
    out
}

fn disk_section(disk: &DiskStat, totals: Option<&BTreeMap<String, VolumeTotals>>) -> String {
    let mut out = String::new();
    for name in report_devices(&disk.devices) {
        let entry = match disk.entries.get(&name) {
            Some(entry) => entry,
            None => continue,
        };
        out.push_str(&device_section(&name, entry, totals.and_then(|t| t.get(&name))));
    }
    out
}

fn device_section(name: &str, entry: &DiskEntry, totals: Option<&VolumeTotals>) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n* Average DEVICE usage: {}\n", name));
    out.push_str(&format!("        read IOPS: {:.2}\n", entry.riops));
    out.push_str(&format!("       write IOPS: {:.2}\n", entry.wiops));
    out.push_str(&format!(
        "  read throughput: {:.2} MB/s\n",
        entry.rsecps * SECTOR_BYTES / MB
    ));
    out.push_str(&format!(
        " write throughput: {:.2} MB/s\n",
        entry.wsecps * SECTOR_BYTES / MB
    ));
    out.push_str(&format!("     read latency: {}\n", format_latency(entry.r_await)));
    out.push_str(&format!("    write latency: {}\n", format_latency(entry.w_await)));
    if let Some(totals) = totals {
        out.push_str(&format!("      read amount: {}\n", format_bytes(totals.read_bytes)));
        out.push_str(&format!("     write amount: {}\n", format_bytes(totals.write_bytes)));
    }
    out
}

fn net_section(net: &NetStat) -> String {
    let mut out = String::new();
    for name in report_devices(&net.devices) {
        let entry = match net.entries.get(&name) {
            Some(entry) => entry,
            None => continue,
        };
        out.push_str(&interface_section(&name, entry));
    }
    out
}

fn interface_section(name: &str, entry: &NetEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n* Average NETWORK usage: {}\n", name));
    out.push_str(&format!("         rx bytes: {:.2} kB/s\n", entry.rxkbyteps));
    out.push_str(&format!("       rx packets: {:.2} /s\n", entry.rxpktps));
    out.push_str(&format!("         tx bytes: {:.2} kB/s\n", entry.txkbyteps));
    out.push_str(&format!("       tx packets: {:.2} /s\n", entry.txpktps));
    out
}

/// Devices in display order: sorted real devices, then the combined total
/// row when more than one device is present.
fn report_devices(devices: &[String]) -> Vec<String> {
    let mut names: Vec<String> = devices
        .iter()
        .filter(|name| name.as_str() != "total")
        .cloned()
        .collect();
    names.sort();
    if names.len() > 1 {
        names.push("total".to_string());
    }
    names
}

/// Latencies are recorded in milliseconds; sub-millisecond values read
/// better in microseconds.
fn format_latency(msec: f64) -> String {
    if msec < 1.0 {
        format!("{:.1} usec", msec * 1000.0)
    } else {
        format!("{:.2} msec", msec)
    }
}

fn format_bytes(bytes: f64) -> String {
    if bytes >= GB {
        format!("{:.2} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes / KB)
    } else {
        format!("{:.0} bytes", bytes)
    }
}

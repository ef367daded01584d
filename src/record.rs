//! Data model for performance log records
//!
//! One record per line of a performance log, mirroring the wire schema
//! emitted by the sampling recorder. The schema is fixed: every known metric
//! is a named struct field, and metrics this version does not know about are
//! captured in a flattened map so they still flow through the generic
//! duration-weighted averaging.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One performance sample.
///
/// A sample's metric values are interpreted as the average rate over the
/// interval *ending at* `time` (right-endpoint convention).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Sample timestamp in seconds, non-decreasing across a log
    pub time: f64,
    /// CPU utilization block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuStat>,
    /// Per-device disk I/O block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<DiskStat>,
    /// Per-interface network I/O block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<NetStat>,
}

/// CPU utilization of one sample: system-wide plus per-core breakdowns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuStat {
    /// Number of cores (identity field, never averaged)
    pub nr_cpu: u32,
    /// System-wide utilization percentages
    pub all: CpuCoreStat,
    /// Per-core utilization percentages, `nr_cpu` entries
    #[serde(default)]
    pub cores: Vec<CpuCoreStat>,
}

/// Utilization percentages of a single core (or the system-wide aggregate)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuCoreStat {
    #[serde(default)]
    pub usr: f64,
    #[serde(default)]
    pub nice: f64,
    #[serde(default)]
    pub sys: f64,
    #[serde(default)]
    pub iowait: f64,
    #[serde(default)]
    pub irq: f64,
    #[serde(default)]
    pub soft: f64,
    #[serde(default)]
    pub steal: f64,
    #[serde(default)]
    pub guest: f64,
    #[serde(default)]
    pub idle: f64,
    /// Metrics not in the fixed schema, averaged by the same rule
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

/// Disk I/O rates of one sample, keyed by device name
///
/// The map may contain a synthetic `"total"` pseudo-device aggregated across
/// all real devices by the recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskStat {
    /// Real device names (identity field; excludes `"total"`)
    pub devices: Vec<String>,
    /// Device name -> rates for the interval ending at this sample
    #[serde(flatten)]
    pub entries: BTreeMap<String, DiskEntry>,
}

/// I/O rates of a single device over one sampling interval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskEntry {
    /// Read operations per second
    #[serde(default)]
    pub riops: f64,
    /// Write operations per second
    #[serde(default)]
    pub wiops: f64,
    /// Sectors read per second
    #[serde(default)]
    pub rsecps: f64,
    /// Sectors written per second
    #[serde(default)]
    pub wsecps: f64,
    /// Mean read latency in milliseconds
    #[serde(default)]
    pub r_await: f64,
    /// Mean write latency in milliseconds
    #[serde(default)]
    pub w_await: f64,
    /// Metrics not in the fixed schema, averaged by the same rule
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

/// Network I/O rates of one sample, keyed by interface name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetStat {
    /// Interface names (identity field; excludes `"total"`)
    pub devices: Vec<String>,
    /// Interface name -> rates for the interval ending at this sample
    #[serde(flatten)]
    pub entries: BTreeMap<String, NetEntry>,
}

/// I/O rates of a single network interface over one sampling interval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetEntry {
    #[serde(default)]
    pub rxkbyteps: f64,
    #[serde(default)]
    pub rxpktps: f64,
    #[serde(default)]
    pub rxerrps: f64,
    #[serde(default)]
    pub rxdropps: f64,
    #[serde(default)]
    pub txkbyteps: f64,
    #[serde(default)]
    pub txpktps: f64,
    #[serde(default)]
    pub txerrps: f64,
    #[serde(default)]
    pub txdropps: f64,
    /// Metrics not in the fixed schema, averaged by the same rule
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

// Zero the values of an extra map while keeping its key set.
fn zero_extra(extra: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    extra.keys().map(|k| (k.clone(), 0.0)).collect()
}

// Add other's extra values scaled by w, for keys already present in acc.
// Keys only seen in later records never enter the average: the first
// record's key set is the identity.
fn add_extra_scaled(acc: &mut BTreeMap<String, f64>, other: &BTreeMap<String, f64>, w: f64) {
    for (key, slot) in acc.iter_mut() {
        if let Some(value) = other.get(key) {
            *slot += value * w;
        }
    }
}

fn scale_extra(extra: &mut BTreeMap<String, f64>, k: f64) {
    for value in extra.values_mut() {
        *value *= k;
    }
}

impl CpuCoreStat {
    /// Structure-preserving zero: same extra keys, all values 0.0
    pub fn zeroed(&self) -> Self {
        Self {
            extra: zero_extra(&self.extra),
            ..Self::default()
        }
    }

    /// Accumulate `other * w` into every metric
    pub fn add_scaled(&mut self, other: &Self, w: f64) {
        self.usr += other.usr * w;
        self.nice += other.nice * w;
        self.sys += other.sys * w;
        self.iowait += other.iowait * w;
        self.irq += other.irq * w;
        self.soft += other.soft * w;
        self.steal += other.steal * w;
        self.guest += other.guest * w;
        self.idle += other.idle * w;
        add_extra_scaled(&mut self.extra, &other.extra, w);
    }

    /// Multiply every metric by `k`
    pub fn scale(&mut self, k: f64) {
        self.usr *= k;
        self.nice *= k;
        self.sys *= k;
        self.iowait *= k;
        self.irq *= k;
        self.soft *= k;
        self.steal *= k;
        self.guest *= k;
        self.idle *= k;
        scale_extra(&mut self.extra, k);
    }
}

impl CpuStat {
    /// Structure-preserving zero: identity fields kept, metrics 0.0
    pub fn zeroed(&self) -> Self {
        Self {
            nr_cpu: self.nr_cpu,
            all: self.all.zeroed(),
            cores: self.cores.iter().map(CpuCoreStat::zeroed).collect(),
        }
    }

    /// Accumulate `other * w`; cores beyond this record's count are ignored
    pub fn add_scaled(&mut self, other: &Self, w: f64) {
        self.all.add_scaled(&other.all, w);
        for (acc, cur) in self.cores.iter_mut().zip(&other.cores) {
            acc.add_scaled(cur, w);
        }
    }

    /// Multiply every metric by `k`
    pub fn scale(&mut self, k: f64) {
        self.all.scale(k);
        for core in &mut self.cores {
            core.scale(k);
        }
    }
}

impl DiskEntry {
    /// Structure-preserving zero: same extra keys, all values 0.0
    pub fn zeroed(&self) -> Self {
        Self {
            extra: zero_extra(&self.extra),
            ..Self::default()
        }
    }

    /// Accumulate `other * w` into the rate metrics.
    ///
    /// Latencies (`r_await`/`w_await`) are excluded: they are not rates and
    /// get operation-count weighting in a separate pass.
    pub fn add_rates_scaled(&mut self, other: &Self, w: f64) {
        self.riops += other.riops * w;
        self.wiops += other.wiops * w;
        self.rsecps += other.rsecps * w;
        self.wsecps += other.wsecps * w;
        add_extra_scaled(&mut self.extra, &other.extra, w);
    }

    /// Multiply the rate metrics by `k` (latencies untouched)
    pub fn scale_rates(&mut self, k: f64) {
        self.riops *= k;
        self.wiops *= k;
        self.rsecps *= k;
        self.wsecps *= k;
        scale_extra(&mut self.extra, k);
    }
}

impl DiskStat {
    /// Structure-preserving zero: device list kept, metrics 0.0
    pub fn zeroed(&self) -> Self {
        Self {
            devices: self.devices.clone(),
            entries: self
                .entries
                .iter()
                .map(|(name, entry)| (name.clone(), entry.zeroed()))
                .collect(),
        }
    }

    /// Accumulate `other * w`; devices absent from `other` contribute zero
    pub fn add_rates_scaled(&mut self, other: &Self, w: f64) {
        for (name, acc) in self.entries.iter_mut() {
            if let Some(cur) = other.entries.get(name) {
                acc.add_rates_scaled(cur, w);
            }
        }
    }

    /// Multiply every rate metric by `k`
    pub fn scale_rates(&mut self, k: f64) {
        for entry in self.entries.values_mut() {
            entry.scale_rates(k);
        }
    }
}

impl NetEntry {
    /// Structure-preserving zero: same extra keys, all values 0.0
    pub fn zeroed(&self) -> Self {
        Self {
            extra: zero_extra(&self.extra),
            ..Self::default()
        }
    }

    /// Accumulate `other * w` into every metric (all net metrics are rates)
    pub fn add_scaled(&mut self, other: &Self, w: f64) {
        self.rxkbyteps += other.rxkbyteps * w;
        self.rxpktps += other.rxpktps * w;
        self.rxerrps += other.rxerrps * w;
        self.rxdropps += other.rxdropps * w;
        self.txkbyteps += other.txkbyteps * w;
        self.txpktps += other.txpktps * w;
        self.txerrps += other.txerrps * w;
        self.txdropps += other.txdropps * w;
        add_extra_scaled(&mut self.extra, &other.extra, w);
    }

    /// Multiply every metric by `k`
    pub fn scale(&mut self, k: f64) {
        self.rxkbyteps *= k;
        self.rxpktps *= k;
        self.rxerrps *= k;
        self.rxdropps *= k;
        self.txkbyteps *= k;
        self.txpktps *= k;
        self.txerrps *= k;
        self.txdropps *= k;
        scale_extra(&mut self.extra, k);
    }
}

impl NetStat {
    /// Structure-preserving zero: interface list kept, metrics 0.0
    pub fn zeroed(&self) -> Self {
        Self {
            devices: self.devices.clone(),
            entries: self
                .entries
                .iter()
                .map(|(name, entry)| (name.clone(), entry.zeroed()))
                .collect(),
        }
    }

    /// Accumulate `other * w`; interfaces absent from `other` contribute zero
    pub fn add_scaled(&mut self, other: &Self, w: f64) {
        for (name, acc) in self.entries.iter_mut() {
            if let Some(cur) = other.entries.get(name) {
                acc.add_scaled(cur, w);
            }
        }
    }

    /// Multiply every metric by `k`
    pub fn scale(&mut self, k: f64) {
        for entry in self.entries.values_mut() {
            entry.scale(k);
        }
    }
}

//! Perfsum - duration-weighted summary reports for performance sample logs
//!
//! This library reads line-delimited JSON performance samples, computes
//! duration-weighted averages (operation-count-weighted for latencies) and
//! accumulated I/O volumes, and renders them as text or JSON reports.

pub mod accumulate;
pub mod cli;
pub mod pager;
pub mod reader;
pub mod record;
pub mod report;
pub mod summary;

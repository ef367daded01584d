//! Property-based tests for the summarization core.
//!
//! Properties covered:
//! 1. The reader never fails on arbitrary byte lines.
//! 2. Duration-weighted averages stay within the later-endpoint value range.
//! 3. All-zero metrics average to exactly zero, never NaN.
//! 4. Latency weighting never produces NaN, whatever the ops rates.
//! 5. Accumulation is additive in the sample values.

use perfsum::record::LogRecord;
use perfsum::{accumulate, reader, summary};
use proptest::prelude::*;
use std::io::Cursor;

fn disk_record(time: f64, riops: f64, rsecps: f64, r_await: f64) -> LogRecord {
    let json = serde_json::json!({
        "time": time,
        "disk": {
            "devices": ["sda"],
            "sda": {
                "riops": riops, "wiops": 0.0,
                "rsecps": rsecps, "wsecps": 0.0,
                "r_await": r_await, "w_await": 0.0
            }
        }
    });
    serde_json::from_value(json).unwrap()
}

// Strictly increasing timestamps from positive increments.
fn records_from(increments: &[f64], riops: &[f64]) -> Vec<LogRecord> {
    let mut time = 0.0;
    let mut records = Vec::new();
    for (dt, rate) in increments.iter().zip(riops) {
        time += dt;
        records.push(disk_record(time, *rate, 0.0, 0.0));
    }
    records
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_reader_never_errors_on_arbitrary_lines(
        lines in prop::collection::vec(
            prop::collection::vec(any::<u8>().prop_filter("no newline", |b| *b != b'\n'), 0..200),
            0..20,
        ),
    ) {
        let mut input = Vec::new();
        for line in &lines {
            input.extend_from_slice(line);
            input.push(b'\n');
        }

        // Arbitrary bytes must never surface a parse error.
        let records = reader::read_records(Cursor::new(input)).unwrap();
        prop_assert!(records.len() <= lines.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_weighted_average_is_bounded_by_later_endpoints(
        increments in prop::collection::vec(0.001f64..100.0, 2..20),
        riops in prop::collection::vec(0.0f64..1e6, 2..20),
    ) {
        let n = increments.len().min(riops.len());
        let records = records_from(&increments[..n], &riops[..n]);

        let result = summary::summarize(&records).unwrap();
        let avg = result.disk.unwrap().entries["sda"].riops;

        // The first value is only a weight boundary; bounds come from the
        // later endpoints.
        let later = &riops[1..n];
        let min = later.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = later.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(avg >= min - 1e-6, "avg {} below min {}", avg, min);
        prop_assert!(avg <= max + 1e-6, "avg {} above max {}", avg, max);
    }

    #[test]
    fn prop_all_zero_metric_is_exactly_zero(
        increments in prop::collection::vec(0.001f64..100.0, 2..20),
    ) {
        let zeros = vec![0.0; increments.len()];
        let records = records_from(&increments, &zeros);

        let result = summary::summarize(&records).unwrap();
        let entry = result.disk.unwrap().entries["sda"].clone();
        prop_assert_eq!(entry.riops, 0.0);
        prop_assert_eq!(entry.r_await, 0.0);
    }

    #[test]
    fn prop_latency_weighting_never_produces_nan(
        increments in prop::collection::vec(0.001f64..100.0, 2..20),
        riops in prop::collection::vec(0.0f64..1e4, 2..20),
        awaits in prop::collection::vec(0.0f64..1e3, 2..20),
    ) {
        let n = increments.len().min(riops.len()).min(awaits.len());
        let mut time = 0.0;
        let mut records = Vec::new();
        for i in 0..n {
            time += increments[i];
            records.push(disk_record(time, riops[i], 0.0, awaits[i]));
        }

        let result = summary::summarize(&records).unwrap();
        let entry = result.disk.unwrap().entries["sda"].clone();
        prop_assert!(entry.r_await.is_finite());
        prop_assert!(entry.w_await.is_finite());
        prop_assert!(entry.r_await >= 0.0);
    }

    #[test]
    fn prop_accumulation_scales_linearly(
        increments in prop::collection::vec(0.001f64..100.0, 2..10),
        riops in prop::collection::vec(0.0f64..1e4, 2..10),
    ) {
        let n = increments.len().min(riops.len());
        let records = records_from(&increments[..n], &riops[..n]);
        let doubled: Vec<f64> = riops[..n].iter().map(|r| r * 2.0).collect();
        let records2 = records_from(&increments[..n], &doubled);

        let totals = accumulate::accumulate(&records).unwrap();
        let totals2 = accumulate::accumulate(&records2).unwrap();

        let base = totals["sda"].read_requests;
        let twice = totals2["sda"].read_requests;
        prop_assert!((twice - 2.0 * base).abs() <= 1e-6 * base.max(1.0),
            "expected {} to be twice {}", twice, base);
    }
}

//! Log reader: one JSON record per line
//!
//! Lines that fail to parse are dropped without surfacing an error. A
//! recorder killed mid-write leaves a truncated trailing line, and there is
//! no way to tell that apart from a corrupt line, so the reader tolerates
//! both. The drop is logged at debug level only.

use crate::record::LogRecord;
use std::io::BufRead;

/// Read performance records from a line-delimited JSON stream.
///
/// Returns an empty vector (not an error) when no line parses. Only I/O
/// errors on the underlying stream are propagated.
pub fn read_records<R: BufRead>(mut source: R) -> std::io::Result<Vec<LogRecord>> {
    let mut records = Vec::new();
    let mut line = Vec::new();
    let mut lineno = 0usize;

    loop {
        line.clear();
        if source.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        lineno += 1;

        match serde_json::from_slice::<LogRecord>(&line) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::debug!("dropping unparsable record at line {}: {}", lineno, err);
            }
        }
    }

    Ok(records)
}

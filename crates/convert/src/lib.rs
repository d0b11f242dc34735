#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `convert` transforms captured log content into its persisted tombstone
//! form. Two modes exist: a verbatim byte-for-byte copy, and a decode of the
//! container runtime's structured per-line JSON records into flat
//! human-readable text. The monitor picks the mode once per captured file
//! after the source file has been rewound to its start.
//!
//! # Design
//!
//! - [`LogRecord`] models one structured line: a log message, a stream name,
//!   and a timestamp. Records are ephemeral; one exists only while its line
//!   is being converted.
//! - [`passthrough`] streams the source into the destination unchanged.
//! - [`json_to_text`] walks the source line-by-line in order, decoding one
//!   record per line and writing `time`, a space, `stream`, a space, and the
//!   message, appending exactly one newline when the message lacks its own.
//!
//! # Invariants
//!
//! - Output ordering mirrors input ordering; lines are never reordered or
//!   buffered across records.
//! - A line that fails to decode aborts the remaining conversion. The
//!   destination keeps the prefix converted so far; partial output is an
//!   accepted, documented outcome rather than a corruption hazard.
//! - There is no retry at this layer. The caller decides what a failed
//!   conversion means for the captured file.
//!
//! # Errors
//!
//! [`ConvertError::Record`] carries the offending line (lossily decoded for
//! display) and the parser's report; [`ConvertError::Io`] wraps failures on
//! either side of the copy.
//!
//! # Examples
//!
//! ```
//! let source = br#"{"log":"ready\n","stream":"stdout","time":"2024-01-01T00:00:00Z"}"#;
//! let mut tombstone = Vec::new();
//! convert::json_to_text(&mut tombstone, &source[..]).expect("well-formed record");
//! assert_eq!(tombstone, b"2024-01-01T00:00:00Z stdout ready\n");
//! ```

mod error;
mod record;

use std::io::{self, BufRead, Write};

use tracing::warn;

pub use error::ConvertError;
pub use record::LogRecord;

/// Copies `source` into `destination` byte-for-byte.
///
/// Used when conversion is disabled; arbitrary binary content round-trips
/// unchanged.
pub fn passthrough<R: io::Read, W: Write>(
    destination: &mut W,
    source: &mut R,
) -> Result<u64, ConvertError> {
    io::copy(source, destination).map_err(ConvertError::Io)
}

/// Decodes newline-delimited structured records from `source` and writes
/// their flattened text form to `destination`.
///
/// Lines are processed strictly in source order. The first malformed record
/// fails the entire operation, leaving `destination` with the lines
/// converted so far.
pub fn json_to_text<R: BufRead, W: Write>(
    destination: &mut W,
    mut source: R,
) -> Result<(), ConvertError> {
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = source.read_until(b'\n', &mut line)?;
        if read == 0 {
            return Ok(());
        }
        let record = LogRecord::from_line(trim_line_ending(&line)).inspect_err(|error| {
            warn!(%error, "abandoning conversion on malformed record");
        })?;
        record.write_text(destination)?;
    }
}

/// Strips the line terminator (`\n` or `\r\n`) from one raw line.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests;

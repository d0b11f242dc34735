use std::io;

use thiserror::Error;

/// Error raised while converting captured content into its persisted form.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A line could not be decoded as a structured log record.
    ///
    /// Carries the offending line, lossily decoded and truncated for
    /// display, together with the parser's report.
    #[error("malformed log record '{line}': {source}")]
    Record {
        /// The offending input line, prepared for display.
        line: String,
        /// The underlying parse failure.
        source: serde_json::Error,
    },
    /// Reading the source or writing the destination failed.
    #[error("log conversion I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl ConvertError {
    const DISPLAY_LIMIT: usize = 256;

    pub(crate) fn record(line: &[u8], source: serde_json::Error) -> Self {
        let mut line = String::from_utf8_lossy(line).into_owned();
        if line.len() > Self::DISPLAY_LIMIT {
            let mut cut = Self::DISPLAY_LIMIT;
            while !line.is_char_boundary(cut) {
                cut -= 1;
            }
            line.truncate(cut);
            line.push_str("...");
        }
        Self::Record { line, source }
    }
}

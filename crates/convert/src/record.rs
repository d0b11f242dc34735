use std::io::{self, Write};

use serde::Deserialize;

use crate::ConvertError;

/// One structured line of captured content.
///
/// The container runtime writes one self-contained JSON object per line with
/// exactly these three fields. Missing fields decode as empty strings,
/// matching the tolerant behaviour of the runtime's own consumers; a line
/// that is not a JSON object of this shape fails to decode.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct LogRecord {
    /// The log message, usually terminated by the writer's own newline.
    pub log: String,
    /// The originating stream, `stdout` or `stderr`.
    pub stream: String,
    /// The runtime's RFC 3339 timestamp for the message.
    pub time: String,
}

impl LogRecord {
    /// Decodes a single record from one raw line (line terminator already
    /// stripped).
    pub fn from_line(line: &[u8]) -> Result<Self, ConvertError> {
        serde_json::from_slice(line).map_err(|error| ConvertError::record(line, error))
    }

    /// Writes the flattened text form: `time`, a space, `stream`, a space,
    /// and the message, appending exactly one newline when the message does
    /// not end with its own.
    pub fn write_text<W: Write>(&self, destination: &mut W) -> io::Result<()> {
        destination.write_all(self.time.as_bytes())?;
        destination.write_all(b" ")?;
        destination.write_all(self.stream.as_bytes())?;
        destination.write_all(b" ")?;
        destination.write_all(self.log.as_bytes())?;
        if !self.log.ends_with('\n') {
            destination.write_all(b"\n")?;
        }
        Ok(())
    }
}

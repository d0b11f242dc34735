//! # Overview
//!
//! Raw notification records arrive from the kernel as a byte stream: a fixed
//! 16-byte header (watch descriptor, event mask, rename cookie, name length,
//! all native-endian) followed by a NUL-padded file name of the declared
//! length. A single blocking read can return any number of complete records
//! and at most one trailing partial record, so decoding is modelled as an
//! explicit cursor over an owned buffer: [`decode_event`] inspects the
//! available bytes and reports either a record plus its consumed length or
//! that more bytes are required, and [`EventBuffer`] relocates the
//! unconsumed tail to the front before the next read appends after it.
//!
//! # Invariants
//!
//! - Decoding never splits a record incorrectly: for any sequence of records
//!   delivered across an arbitrary split into multiple reads, the decoded
//!   event sequence is identical to the one obtained from a single read.
//! - No pointer arithmetic; header fields are read with
//!   [`u32::from_ne_bytes`] on plain slices.

/// Size of the fixed record header: watch descriptor, mask, cookie, and
/// name length, four bytes each.
pub const EVENT_HEADER_LEN: usize = 16;

/// Maximum name payload per record: `NAME_MAX` bytes plus the trailing NUL.
pub const MAX_NAME_LEN: usize = 256;

/// Capacity of the reusable decode buffer: twenty maximal-size records.
pub const EVENT_BUFFER_LEN: usize = (EVENT_HEADER_LEN + MAX_NAME_LEN) * 20;

/// Kernel mask bit reported when a file is created in the watched directory.
pub const IN_CREATE: u32 = 0x0000_0100;

/// Kernel mask bit reported when a file is deleted from the watched directory.
pub const IN_DELETE: u32 = 0x0000_0200;

/// Classification of a decoded record by the mask bits the monitor acts on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventKind {
    /// A file appeared in the watched directory.
    Create,
    /// A file was removed from the watched directory.
    Delete,
    /// Any other notification; logged and ignored.
    Other,
}

/// One decoded notification record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawEvent {
    /// Classified event kind.
    pub kind: EventKind,
    /// The raw kernel mask, kept for diagnostics.
    pub mask: u32,
    /// File name relative to the watched directory, NUL padding stripped.
    pub name: String,
}

/// Outcome of one decode attempt against the available bytes.
#[derive(Debug)]
pub enum Decoded {
    /// A complete record was decoded from the front of the input.
    Event {
        /// The decoded record.
        event: RawEvent,
        /// Number of input bytes the record occupied.
        consumed: usize,
    },
    /// The input ends inside a record; read more bytes and retry.
    NeedMore,
}

/// Attempts to decode one record from the front of `bytes`.
pub fn decode_event(bytes: &[u8]) -> Decoded {
    if bytes.len() < EVENT_HEADER_LEN {
        return Decoded::NeedMore;
    }
    let mask = read_u32(bytes, 4);
    let name_len = read_u32(bytes, 12) as usize;
    let record_len = EVENT_HEADER_LEN + name_len;
    if bytes.len() < record_len {
        return Decoded::NeedMore;
    }
    let name_bytes = &bytes[EVENT_HEADER_LEN..record_len];
    let name_end = name_bytes
        .iter()
        .position(|&byte| byte == 0)
        .unwrap_or(name_len);
    let name = String::from_utf8_lossy(&name_bytes[..name_end]).into_owned();
    let kind = if mask & IN_CREATE != 0 {
        EventKind::Create
    } else if mask & IN_DELETE != 0 {
        EventKind::Delete
    } else {
        EventKind::Other
    };
    Decoded::Event {
        event: RawEvent { kind, mask, name },
        consumed: record_len,
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[at..at + 4]);
    u32::from_ne_bytes(raw)
}

/// Reusable decode buffer with an explicit fill cursor.
///
/// The event loop reads into [`unfilled`](Self::unfilled), records the byte
/// count with [`commit`](Self::commit), drains complete records via
/// [`next_event`](Self::next_event), and finally calls
/// [`compact`](Self::compact) so a trailing partial record is moved to the
/// front and completed by the next read.
#[derive(Debug)]
pub struct EventBuffer {
    buf: Vec<u8>,
    filled: usize,
    consumed: usize,
}

impl EventBuffer {
    /// Creates a buffer with the default capacity of twenty maximal records.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0; EVENT_BUFFER_LEN],
            filled: 0,
            consumed: 0,
        }
    }

    /// Bytes read but not yet decoded.
    #[must_use]
    pub fn available(&self) -> usize {
        self.filled - self.consumed
    }

    /// The writable tail the next read should fill.
    pub fn unfilled(&mut self) -> &mut [u8] {
        &mut self.buf[self.filled..]
    }

    /// Records that a read placed `count` bytes into the unfilled tail.
    pub fn commit(&mut self, count: usize) {
        debug_assert!(self.filled + count <= self.buf.len());
        self.filled += count;
    }

    /// Decodes the next complete record, or `None` when the remaining bytes
    /// end inside a record.
    pub fn next_event(&mut self) -> Option<RawEvent> {
        match decode_event(&self.buf[self.consumed..self.filled]) {
            Decoded::Event { event, consumed } => {
                self.consumed += consumed;
                Some(event)
            }
            Decoded::NeedMore => None,
        }
    }

    /// Relocates the unconsumed trailing bytes to the front of the buffer.
    pub fn compact(&mut self) {
        if self.consumed == 0 {
            return;
        }
        self.buf.copy_within(self.consumed..self.filled, 0);
        self.filled -= self.consumed;
        self.consumed = 0;
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new()
    }
}

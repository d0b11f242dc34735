#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `monitor` is the core of the logtomb workspace: it watches a container
//! log directory for file create/delete notifications and holds an open
//! handle to every live log file from the moment it appears. When the
//! orchestrator deletes a file, the retained content is read back through
//! that handle, run through the content filter, and persisted as a
//! tombstone, optionally converting structured per-line records to text.
//!
//! # Design
//!
//! - [`event`] consumes the raw kernel byte stream: an explicit cursor over
//!   a reusable buffer, a decoder returning a record plus its consumed
//!   length or a need-more-data signal, and compaction of partial trailing
//!   records across read boundaries.
//! - [`open_log_file`] resolves the runtime's symlink chains to the backing
//!   regular file, with a guard for self-referential links.
//! - [`Monitor`] owns the watch registry (name to open handle) and the
//!   single-threaded event loop. Every operation executes inline to
//!   completion before the next blocking read.
//!
//! # Invariants
//!
//! - A tracked name holds exactly one open handle; the handle is closed on
//!   every exit path of the delete handling, including filter-rejection and
//!   conversion-error paths.
//! - The loop has no planned termination. [`Monitor::run`] returns only a
//!   fatal [`MonitorError`]; per-file failures are logged and the loop keeps
//!   running.
//! - There are no retries. A file that fails to open at create time is
//!   permanently unprotected; a capture that fails is abandoned for that
//!   file alone.
//!
//! # Examples
//!
//! ```no_run
//! use filters::{FilterRules, FilterSpec};
//! use monitor::{Monitor, MonitorConfig};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let rules = FilterRules::compile(&FilterSpec::new().include("^nginx-"))?;
//! let mut monitor = Monitor::new(MonitorConfig::new(rules));
//! let error = match monitor.run() {
//!     Ok(never) => match never {},
//!     Err(error) => error,
//! };
//! eprintln!("monitor stopped: {error}");
//! # Ok(())
//! # }
//! ```
//!
//! # See also
//!
//! - [`filters`] for the name and content rules the registry consults.
//! - [`convert`] for the tombstone content transformation.

mod error;
pub mod event;
mod monitor;
mod resolve;

pub use error::{MonitorError, ResolveError};
pub use monitor::{DEFAULT_LOG_DIR, DEFAULT_TOMBSTONE_DIR, Monitor, MonitorConfig};
pub use resolve::open_log_file;

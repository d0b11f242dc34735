use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to resolve and open a newly created log file.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The path (or an intermediate symlink target) could not be stat'ed.
    #[error("cannot stat '{path}': {source}")]
    NotFound {
        /// Path that failed to stat.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },
    /// The final resolved path could not be opened for reading.
    #[error("cannot open '{path}': {source}")]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },
}

/// Fatal event-loop failure; there is no recovery path and the process is
/// expected to exit non-zero.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The kernel notification channel could not be opened.
    #[error("failed to initialise the notification channel: {source}")]
    Init {
        /// Underlying cause.
        source: io::Error,
    },
    /// Registering interest in the watched directory failed.
    #[error("failed to watch '{path}': {source}")]
    Watch {
        /// The watched directory.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },
    /// The tombstone output directory could not be created.
    #[error("failed to create tombstone directory '{path}': {source}")]
    OutputDir {
        /// The output directory.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },
    /// A blocking read from the notification channel failed after
    /// initialisation succeeded.
    #[error("failed to read from the notification channel: {source}")]
    Read {
        /// Underlying cause.
        source: io::Error,
    },
}

/// Failure while capturing one deleted file. Logged by the caller and never
/// propagated to the event loop.
#[derive(Debug, Error)]
pub(crate) enum CaptureError {
    #[error("seek to start failed: {0}")]
    Rewind(io::Error),
    #[error("failed to create tombstone '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Convert(#[from] convert::ConvertError),
    #[error("failed to flush tombstone: {0}")]
    Flush(io::Error),
}

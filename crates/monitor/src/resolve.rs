//! Symlink-chasing open for freshly created log files.
//!
//! Container runtimes populate the log directory with symbolic links into
//! per-pod storage; the watcher needs the underlying regular file open
//! before the orchestrator can delete either of them.

use std::fs::{self, File};
use std::path::Path;

use tracing::debug;

use crate::error::ResolveError;

/// Resolves `name` inside `directory` to its underlying regular file and
/// opens it for reading.
///
/// Symbolic links are followed iteratively: the path is stat'ed, and while
/// it names a symlink the link target replaces it. Resolution stops at a
/// non-symlink, at a self-referential link, or when the link target cannot
/// be read (the last known path is opened as-is). The caller owns the
/// returned handle.
pub fn open_log_file(directory: &Path, name: &str) -> Result<File, ResolveError> {
    let mut path = directory.join(name);
    loop {
        let metadata = fs::symlink_metadata(&path).map_err(|source| ResolveError::NotFound {
            path: path.clone(),
            source,
        })?;
        if !metadata.file_type().is_symlink() {
            break;
        }
        match fs::read_link(&path) {
            Ok(target) if target == path => break,
            Ok(target) => path = target,
            Err(error) => {
                debug!(path = %path.display(), %error, "unreadable link target; opening the link path");
                break;
            }
        }
    }
    File::open(&path).map_err(|source| ResolveError::Open { path, source })
}

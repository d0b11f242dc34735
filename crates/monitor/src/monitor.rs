use std::convert::Infallible;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use rustix::fs::inotify::{self, CreateFlags, WatchFlags};
use tracing::{debug, info, warn};

use filters::FilterRules;

use crate::error::{CaptureError, MonitorError};
use crate::event::{EVENT_HEADER_LEN, EventBuffer, EventKind};
use crate::resolve;

/// Directory the container runtime writes per-container log files into.
pub const DEFAULT_LOG_DIR: &str = "/var/log/containers";

/// Directory captured tombstones are written to.
pub const DEFAULT_TOMBSTONE_DIR: &str = "/var/log/tombstone";

/// Immutable monitor configuration, fixed for the process lifetime.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// The watched directory.
    pub log_dir: PathBuf,
    /// The output directory tombstones are written to.
    pub tombstone_dir: PathBuf,
    /// Compiled name and content filter rules.
    pub rules: FilterRules,
    /// Copy captured bytes verbatim instead of decoding structured records.
    pub skip_conversion: bool,
}

impl MonitorConfig {
    /// Creates a configuration with the default directories.
    #[must_use]
    pub fn new(rules: FilterRules) -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            tombstone_dir: PathBuf::from(DEFAULT_TOMBSTONE_DIR),
            rules,
            skip_conversion: false,
        }
    }

    /// Overrides the watched directory.
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Overrides the tombstone output directory.
    #[must_use]
    pub fn with_tombstone_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tombstone_dir = dir.into();
        self
    }

    /// Enables or disables verbatim copying.
    #[must_use]
    pub const fn with_skip_conversion(mut self, skip: bool) -> Self {
        self.skip_conversion = skip;
        self
    }
}

enum Captured {
    Written(PathBuf),
    Rejected,
}

/// Watches a log directory and captures deleted files as tombstones.
///
/// The monitor owns the watch registry: a mapping from file name to the
/// open handle acquired when the file was created. Handles leave the
/// registry exactly once, on the matching delete, and are closed on every
/// exit path of that operation.
#[derive(Debug)]
pub struct Monitor {
    config: MonitorConfig,
    files: FxHashMap<String, File>,
}

impl Monitor {
    /// Creates a monitor with an empty registry.
    #[must_use]
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            files: FxHashMap::default(),
        }
    }

    /// Number of files currently tracked.
    #[must_use]
    pub fn tracked_files(&self) -> usize {
        self.files.len()
    }

    /// Reports whether `name` currently has an open handle in the registry.
    #[must_use]
    pub fn is_tracking(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// Begins tracking a newly created file.
    ///
    /// A name the filter rules reject is skipped. A file that cannot be
    /// opened is logged and permanently unprotected; there is no retry for
    /// this lifecycle. A duplicate create closes the stale prior handle
    /// before storing the replacement.
    pub fn watch(&mut self, name: &str) {
        if !self.config.rules.should_track(name) {
            debug!(name, "name rejected by filters; not tracking");
            return;
        }
        match resolve::open_log_file(&self.config.log_dir, name) {
            Ok(handle) => {
                if let Some(stale) = self.files.insert(name.to_owned(), handle) {
                    drop(stale);
                    warn!(name, "duplicate create; closed stale handle before replacing it");
                }
            }
            Err(error) => {
                warn!(name, %error, "cannot track created file; its content will not be preserved");
            }
        }
    }

    /// Captures a deleted file's retained content, then forgets it.
    ///
    /// Unknown names are expected (files that predate the monitor or were
    /// filtered at create time) and ignored. Capture failures are logged and
    /// never propagated; the event loop keeps running regardless of a single
    /// file's outcome.
    pub fn unwatch(&mut self, name: &str) {
        let Some(source) = self.files.remove(name) else {
            info!(name, "untracked file deleted; nothing to capture");
            return;
        };
        match self.capture(name, source) {
            Ok(Captured::Written(path)) => {
                info!(name, tombstone = %path.display(), "tombstone written");
            }
            Ok(Captured::Rejected) => {
                info!(name, "content did not match the keep-if pattern; discarded");
            }
            Err(error) => {
                warn!(name, %error, "capture failed; tombstone may be partial or missing");
            }
        }
    }

    fn capture(&self, name: &str, mut source: File) -> Result<Captured, CaptureError> {
        source
            .seek(SeekFrom::Start(0))
            .map_err(CaptureError::Rewind)?;
        if !self.config.rules.should_keep(BufReader::new(&source)) {
            return Ok(Captured::Rejected);
        }
        source
            .seek(SeekFrom::Start(0))
            .map_err(CaptureError::Rewind)?;
        let path = self.config.tombstone_dir.join(name);
        let destination = File::create(&path).map_err(|error| CaptureError::Create {
            path: path.clone(),
            source: error,
        })?;
        let mut writer = BufWriter::new(destination);
        if self.config.skip_conversion {
            convert::passthrough(&mut writer, &mut source)?;
        } else {
            convert::json_to_text(&mut writer, BufReader::new(&source))?;
        }
        writer.flush().map_err(CaptureError::Flush)?;
        Ok(Captured::Written(path))
    }

    /// Runs the event loop; returns only with a fatal error.
    ///
    /// Initialisation opens the notification channel, registers interest in
    /// create and delete events for the watched directory (non-recursive),
    /// and creates the tombstone directory. The steady state blocks on the
    /// channel, decodes complete records from the reusable buffer, and
    /// dispatches them inline on this thread. Each capture completes before
    /// the next read is issued; there is no timeout and no cancellation.
    pub fn run(&mut self) -> Result<Infallible, MonitorError> {
        let fd = inotify::init(CreateFlags::CLOEXEC)
            .map_err(|errno| MonitorError::Init { source: errno.into() })?;
        let mut buffer = EventBuffer::new();
        fs::create_dir_all(&self.config.tombstone_dir).map_err(|source| {
            MonitorError::OutputDir {
                path: self.config.tombstone_dir.clone(),
                source,
            }
        })?;
        inotify::add_watch(
            &fd,
            self.config.log_dir.as_path(),
            WatchFlags::CREATE | WatchFlags::DELETE,
        )
        .map_err(|errno| MonitorError::Watch {
            path: self.config.log_dir.clone(),
            source: errno.into(),
        })?;
        let mut channel = File::from(fd);
        info!(
            log_dir = %self.config.log_dir.display(),
            tombstone_dir = %self.config.tombstone_dir.display(),
            "watching for log file lifecycle events"
        );
        loop {
            let read = channel
                .read(buffer.unfilled())
                .map_err(|source| MonitorError::Read { source })?;
            if read == 0 {
                return Err(MonitorError::Read {
                    source: io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "notification channel closed",
                    ),
                });
            }
            buffer.commit(read);
            if buffer.available() < EVENT_HEADER_LEN {
                warn!(
                    expected = EVENT_HEADER_LEN,
                    available = buffer.available(),
                    "short read from notification channel"
                );
                continue;
            }
            while let Some(event) = buffer.next_event() {
                debug!(mask = event.mask, name = %event.name, "notification");
                match event.kind {
                    EventKind::Create => self.watch(&event.name),
                    EventKind::Delete => self.unwatch(&event.name),
                    EventKind::Other => {
                        debug!(mask = event.mask, name = %event.name, "ignoring unsupported event");
                    }
                }
            }
            buffer.compact();
        }
    }

    /// The watched directory.
    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.config.log_dir
    }

    /// The tombstone output directory.
    #[must_use]
    pub fn tombstone_dir(&self) -> &Path {
        &self.config.tombstone_dir
    }
}

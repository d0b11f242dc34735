use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Error raised while installing or removing the service unit.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The unit file could not be written.
    #[error("failed to write service unit '{path}': {source}")]
    WriteUnit {
        /// Unit file path.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },
    /// The unit file could not be removed.
    #[error("failed to remove service unit '{path}': {source}")]
    RemoveUnit {
        /// Unit file path.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },
    /// A `systemctl` invocation could not be spawned.
    #[error("failed to run '{command}': {source}")]
    Spawn {
        /// The command line that failed to start.
        command: String,
        /// Underlying cause.
        source: io::Error,
    },
    /// A `systemctl` invocation exited unsuccessfully.
    #[error("'{command}' exited with {status}")]
    Command {
        /// The failing command line.
        command: String,
        /// The reported exit status.
        status: ExitStatus,
    },
}

/// Error raised while deploying the binary to a remote host.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The deploy target did not parse as an ssh URL.
    #[error("invalid deploy target '{target}': {source}")]
    InvalidTarget {
        /// The operator-supplied target string.
        target: String,
        /// Underlying cause.
        source: url::ParseError,
    },
    /// The deploy target is missing a host name.
    #[error("deploy target '{target}' has no host")]
    MissingHost {
        /// The operator-supplied target string.
        target: String,
    },
    /// The path of the currently running executable is unknown.
    #[error("cannot determine the local binary to upload: {0}")]
    LocalBinary(io::Error),
    /// An `ssh`/`scp` invocation could not be spawned.
    #[error("failed to run '{command}': {source}")]
    Spawn {
        /// The command line that failed to start.
        command: String,
        /// Underlying cause.
        source: io::Error,
    },
    /// An `ssh`/`scp` invocation exited unsuccessfully.
    #[error("'{command}' exited with {status}")]
    Command {
        /// The failing command line.
        command: String,
        /// The reported exit status.
        status: ExitStatus,
    },
}

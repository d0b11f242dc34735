#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `daemon` carries the operational glue around the monitor core: rendering
//! and installing the systemd unit that keeps the monitor running across
//! reboots, and pushing the running binary to a remote host over the system
//! `ssh`/`scp` binaries so a fleet can be provisioned from one machine.
//!
//! Neither path contains capture logic; everything here re-invokes the
//! installed binary's `monitor` subcommand with the operator's original
//! flags, reconstructed by [`MonitorArgs::to_args`].
//!
//! # Design
//!
//! - [`systemd`] writes the unit under `/etc/systemd/system` and drives
//!   `systemctl` for reload/enable/start and stop/disable/remove.
//! - [`deploy`] parses an `ssh://` target with the `url` crate, uploads the
//!   currently running executable with `scp`, moves it into `/usr/bin`
//!   remotely, and reinstalls the service over `ssh`. A jump host maps to
//!   OpenSSH's `ProxyJump`.
//! - Subprocesses are spawned with inherited stdio so `systemctl` and `ssh`
//!   diagnostics reach the operator unchanged.
//!
//! # Errors
//!
//! Each failing step reports the exact command that failed together with
//! its exit status or spawn error; nothing here retries.

mod args;
mod error;

pub mod deploy;
pub mod systemd;

pub use args::MonitorArgs;
pub use deploy::SshTarget;
pub use error::{DeployError, ServiceError};

/// Name of the installed binary and of the systemd service unit.
pub const SERVICE_NAME: &str = "logtomb";

/// Directory the binary is installed into on local and remote hosts.
pub const INSTALL_DIR: &str = "/usr/bin";

#[cfg(test)]
mod tests;

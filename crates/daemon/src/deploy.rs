//! Remote provisioning over the system `ssh` and `scp` binaries.
//!
//! The deploy sequence mirrors a manual install: upload the currently
//! running executable to the remote upload directory, mark it executable,
//! move it into place with sudo, then reinstall the service with the
//! operator's monitor flags. Authentication is key or agent based; the
//! spawned OpenSSH client handles known-hosts and jump-host mechanics.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;
use url::Url;

use crate::error::DeployError;
use crate::{INSTALL_DIR, MonitorArgs, SERVICE_NAME};

/// Directory the binary is uploaded into before the privileged move.
pub const REMOTE_UPLOAD_DIR: &str = "/tmp";

/// A parsed `ssh://` deploy destination.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SshTarget {
    user: Option<String>,
    host: String,
    port: Option<u16>,
    key_path: Option<PathBuf>,
}

impl SshTarget {
    /// Parses `spec` (`[ssh://][user@]host[:port]`) into a target, attaching
    /// an optional identity file.
    pub fn parse(spec: &str, key_path: Option<PathBuf>) -> Result<Self, DeployError> {
        let text = if spec.contains("://") {
            spec.to_owned()
        } else {
            format!("ssh://{spec}")
        };
        let url = Url::parse(&text).map_err(|source| DeployError::InvalidTarget {
            target: spec.to_owned(),
            source,
        })?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| DeployError::MissingHost {
                target: spec.to_owned(),
            })?
            .to_owned();
        let user = (!url.username().is_empty()).then(|| url.username().to_owned());
        Ok(Self {
            user,
            host,
            port: url.port(),
            key_path,
        })
    }

    /// The `[user@]host` form ssh and scp accept as a destination.
    #[must_use]
    pub fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{user}@{}", self.host),
            None => self.host.clone(),
        }
    }

    /// The `[user@]host[:port]` form `ProxyJump` accepts.
    #[must_use]
    pub fn jump_spec(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.destination()),
            None => self.destination(),
        }
    }
}

/// Uploads the running binary to `target` and reinstalls the service there.
pub fn deploy(
    target: &SshTarget,
    proxy: Option<&SshTarget>,
    args: &MonitorArgs,
) -> Result<(), DeployError> {
    let binary = env::current_exe().map_err(DeployError::LocalBinary)?;
    let upload_path = format!("{REMOTE_UPLOAD_DIR}/{SERVICE_NAME}");
    let install_path = format!("{INSTALL_DIR}/{SERVICE_NAME}");

    // A stale upload from an aborted deploy may be owned by another user.
    let _ = run_ssh(target, proxy, &format!("rm -f {upload_path}"));
    upload(target, proxy, &binary, &upload_path)?;
    run_ssh(target, proxy, &format!("chmod a+x {upload_path}"))?;
    run_ssh(target, proxy, &format!("sudo mv {upload_path} {install_path}"))?;
    info!(host = %target.destination(), "deploy successful; (re)installing service");

    let _ = run_ssh(target, proxy, &format!("sudo {install_path} service uninstall"));
    let mut install_cmd = format!("sudo {install_path} service install");
    for arg in args.to_args() {
        install_cmd.push(' ');
        install_cmd.push_str(&shell_quote(&arg));
    }
    run_ssh(target, proxy, &install_cmd)
}

/// Quotes one argument for the remote shell.
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "_./-=".contains(ch));
    if safe {
        arg.to_owned()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

fn upload(
    target: &SshTarget,
    proxy: Option<&SshTarget>,
    local: &Path,
    remote: &str,
) -> Result<(), DeployError> {
    let mut command = Command::new("scp");
    command.arg("-o").arg("BatchMode=yes");
    if let Some(key) = &target.key_path {
        command.arg("-i").arg(key);
    }
    if let Some(port) = target.port {
        command.arg("-P").arg(port.to_string());
    }
    if let Some(proxy) = proxy {
        command.arg("-o").arg(format!("ProxyJump={}", proxy.jump_spec()));
    }
    command.arg(local);
    command.arg(format!("{}:{remote}", target.destination()));
    run_checked(command, &format!("scp {} to {}", local.display(), target.destination()))
}

fn run_ssh(
    target: &SshTarget,
    proxy: Option<&SshTarget>,
    remote_command: &str,
) -> Result<(), DeployError> {
    let mut command = Command::new("ssh");
    command.arg("-o").arg("BatchMode=yes");
    if let Some(key) = &target.key_path {
        command.arg("-i").arg(key);
    }
    if let Some(port) = target.port {
        command.arg("-p").arg(port.to_string());
    }
    if let Some(proxy) = proxy {
        command.arg("-J").arg(proxy.jump_spec());
    }
    command.arg(target.destination());
    command.arg(remote_command);
    run_checked(command, &format!("ssh {}: {remote_command}", target.destination()))
}

fn run_checked(mut command: Command, description: &str) -> Result<(), DeployError> {
    let status = command.status().map_err(|source| DeployError::Spawn {
        command: description.to_owned(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(DeployError::Command {
            command: description.to_owned(),
            status,
        })
    }
}

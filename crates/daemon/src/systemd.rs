//! Systemd unit rendering and lifecycle.
//!
//! `install` writes the unit, reloads the daemon, and enables and starts
//! the service; `uninstall` stops and disables it best-effort and removes
//! the unit file. Both must run as root, the same requirement `systemctl`
//! itself imposes here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::error::ServiceError;
use crate::{INSTALL_DIR, MonitorArgs, SERVICE_NAME};

/// Directory the service unit is written into.
pub const UNIT_DIR: &str = "/etc/systemd/system";

/// Path of the installed unit file.
#[must_use]
pub fn unit_path() -> PathBuf {
    Path::new(UNIT_DIR).join(format!("{SERVICE_NAME}.service"))
}

/// Renders the service unit re-invoking `exec_path monitor` with `args`.
#[must_use]
pub fn render_unit(exec_path: &Path, args: &MonitorArgs) -> String {
    let mut exec_start = exec_path.display().to_string();
    exec_start.push_str(" monitor");
    for arg in args.to_args() {
        exec_start.push(' ');
        exec_start.push_str(&quote_unit_arg(&arg));
    }
    format!(
        "[Unit]\n\
         Description=Preserve logs of terminated containers\n\
         Requires=kubelet.service\n\
         \n\
         [Service]\n\
         Type=simple\n\
         ExecStart={exec_start}\n\
         Restart=always\n\
         \n\
         [Install]\n\
         WantedBy=default.target\n"
    )
}

/// Quotes one ExecStart argument per systemd's command-line syntax.
fn quote_unit_arg(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "_./-=".contains(ch));
    if safe {
        return arg.to_owned();
    }
    let escaped = arg.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Installs and starts the service.
pub fn install(args: &MonitorArgs) -> Result<(), ServiceError> {
    let exec_path = Path::new(INSTALL_DIR).join(SERVICE_NAME);
    let unit = render_unit(&exec_path, args);
    let path = unit_path();
    fs::write(&path, unit).map_err(|source| ServiceError::WriteUnit {
        path: path.clone(),
        source,
    })?;
    systemctl(&["daemon-reload"])?;
    systemctl(&["enable", SERVICE_NAME])?;
    systemctl(&["start", SERVICE_NAME])?;
    info!(unit = %path.display(), "service installed and started");
    Ok(())
}

/// Stops and removes the service.
///
/// Stop and disable are best-effort: the unit may never have been enabled
/// on this host, and a missing unit file is not an error.
pub fn uninstall() -> Result<(), ServiceError> {
    let _ = systemctl(&["stop", SERVICE_NAME]);
    let _ = systemctl(&["disable", SERVICE_NAME]);
    let path = unit_path();
    match fs::remove_file(&path) {
        Ok(()) => {
            info!(unit = %path.display(), "service removed");
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ServiceError::RemoveUnit { path, source }),
    }
}

fn systemctl(arguments: &[&str]) -> Result<(), ServiceError> {
    let command = format!("systemctl {}", arguments.join(" "));
    let status = Command::new("systemctl")
        .args(arguments)
        .status()
        .map_err(|source| ServiceError::Spawn {
            command: command.clone(),
            source,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(ServiceError::Command { command, status })
    }
}

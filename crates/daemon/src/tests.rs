use std::path::{Path, PathBuf};

use super::*;
use crate::systemd::render_unit;

#[test]
fn to_args_round_trips_every_flag() {
    let args = MonitorArgs {
        include_log: Some("^nginx-".to_owned()),
        exclude_log: Some("sidecar".to_owned()),
        keep_if: Some("ERROR".to_owned()),
        skip_conversion: true,
        log_dir: Some(PathBuf::from("/srv/logs")),
        tombstone_dir: Some(PathBuf::from("/srv/tombs")),
    };
    assert_eq!(
        args.to_args(),
        [
            "--include-log",
            "^nginx-",
            "--exclude-log",
            "sidecar",
            "--keep-if",
            "ERROR",
            "--skip-conversion",
            "--log-dir",
            "/srv/logs",
            "--tombstone-dir",
            "/srv/tombs",
        ]
    );
}

#[test]
fn to_args_omits_absent_and_empty_rules() {
    let args = MonitorArgs {
        include_log: Some(String::new()),
        ..MonitorArgs::default()
    };
    assert!(args.to_args().is_empty());
}

#[test]
fn rendered_unit_reinvokes_monitor_with_flags() {
    let args = MonitorArgs {
        include_log: Some("^web".to_owned()),
        skip_conversion: true,
        ..MonitorArgs::default()
    };
    let unit = render_unit(Path::new("/usr/bin/logtomb"), &args);
    assert!(
        unit.contains("ExecStart=/usr/bin/logtomb monitor --include-log \"^web\" --skip-conversion")
    );
    assert!(unit.contains("Restart=always"));
    assert!(unit.contains("WantedBy=default.target"));
}

#[test]
fn rendered_unit_quotes_patterns_with_spaces() {
    let args = MonitorArgs {
        keep_if: Some("fatal error".to_owned()),
        ..MonitorArgs::default()
    };
    let unit = render_unit(Path::new("/usr/bin/logtomb"), &args);
    assert!(unit.contains("--keep-if \"fatal error\""));
}

#[test]
fn target_parses_user_host_and_port() {
    let target = SshTarget::parse("root@node-1.cluster:2222", None).expect("valid target");
    assert_eq!(target.destination(), "root@node-1.cluster");
    assert_eq!(target.jump_spec(), "root@node-1.cluster:2222");
}

#[test]
fn target_accepts_explicit_scheme_and_bare_host() {
    let with_scheme = SshTarget::parse("ssh://deploy@host", None).expect("valid target");
    assert_eq!(with_scheme.destination(), "deploy@host");
    let bare = SshTarget::parse("host", None).expect("valid target");
    assert_eq!(bare.destination(), "host");
    assert_eq!(bare.jump_spec(), "host");
}

#[test]
fn target_without_host_is_rejected() {
    assert!(matches!(
        SshTarget::parse("ssh://", None),
        Err(DeployError::InvalidTarget { .. } | DeployError::MissingHost { .. })
    ));
}

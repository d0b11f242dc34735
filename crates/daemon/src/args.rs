use std::path::PathBuf;

/// The monitor flags a `service install` or `deploy` invocation should bake
/// into the re-invocation of the installed binary.
///
/// Empty pattern strings are normalised away here so the rendered command
/// line never carries a flag whose value would mean "rule absent" anyway.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MonitorArgs {
    /// Name-include pattern (`--include-log`).
    pub include_log: Option<String>,
    /// Name-exclude pattern (`--exclude-log`).
    pub exclude_log: Option<String>,
    /// Content keep-if pattern (`--keep-if`).
    pub keep_if: Option<String>,
    /// Copy captured bytes verbatim (`--skip-conversion`).
    pub skip_conversion: bool,
    /// Watched directory override (`--log-dir`).
    pub log_dir: Option<PathBuf>,
    /// Tombstone directory override (`--tombstone-dir`).
    pub tombstone_dir: Option<PathBuf>,
}

impl MonitorArgs {
    /// Reconstructs the argument vector for a `monitor` invocation.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut out = Vec::new();
        push_pattern(&mut out, "--include-log", self.include_log.as_deref());
        push_pattern(&mut out, "--exclude-log", self.exclude_log.as_deref());
        push_pattern(&mut out, "--keep-if", self.keep_if.as_deref());
        if self.skip_conversion {
            out.push("--skip-conversion".to_owned());
        }
        push_path(&mut out, "--log-dir", self.log_dir.as_deref());
        push_path(&mut out, "--tombstone-dir", self.tombstone_dir.as_deref());
        out
    }
}

fn push_pattern(out: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        out.push(flag.to_owned());
        out.push(value.to_owned());
    }
}

fn push_path(out: &mut Vec<String>, flag: &str, value: Option<&std::path::Path>) {
    if let Some(value) = value {
        out.push(flag.to_owned());
        out.push(value.display().to_string());
    }
}

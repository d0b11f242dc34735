#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the thin command-line front-end for the `logtomb` binary. It
//! parses the `monitor`, `service install|uninstall`, and `deploy`
//! subcommands, wires the flags into the core crates, initialises the
//! tracing subscriber, and maps every fatal error to a non-zero process
//! exit code.
//!
//! # Design
//!
//! - [`run`] accepts an argument iterator rather than touching
//!   [`std::env`] directly, so tests can drive parsing without a process
//!   boundary.
//! - Diagnostics go through `tracing`; the subscriber writes to stderr and
//!   honours `RUST_LOG`, defaulting to `info`.
//! - The monitor loop never returns under normal operation; when it does
//!   return, the error is rendered and the process exits non-zero.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use daemon::{MonitorArgs, SshTarget};
use filters::{FilterRules, FilterSpec};
use monitor::{DEFAULT_LOG_DIR, DEFAULT_TOMBSTONE_DIR, Monitor, MonitorConfig};

#[derive(Debug, Parser)]
#[command(
    name = "logtomb",
    version,
    about = "Preserves container log files that the orchestrator deletes on termination"
)]
struct Cli {
    #[command(subcommand)]
    command: TopCommand,
}

#[derive(Debug, Subcommand)]
enum TopCommand {
    /// Watch the log directory and capture deleted files as tombstones.
    Monitor(MonitorOpts),
    /// Control the logtomb service on this host.
    #[command(subcommand)]
    Service(ServiceCommand),
    /// Deploy logtomb to a remote host over SSH.
    Deploy(DeployOpts),
}

#[derive(Debug, Subcommand)]
enum ServiceCommand {
    /// Install and start the service with the given monitor flags.
    Install(MonitorOpts),
    /// Stop the service and remove its unit.
    Uninstall,
}

#[derive(Clone, Debug, Args)]
struct MonitorOpts {
    /// Preserve logs only of files whose name matches this pattern.
    #[arg(short = 'i', long, value_name = "REGEX")]
    include_log: Option<String>,

    /// Ignore files whose name matches this pattern.
    #[arg(short = 'e', long, value_name = "REGEX")]
    exclude_log: Option<String>,

    /// Keep captured logs only when the content matches this pattern.
    #[arg(short = 'k', long, value_name = "REGEX")]
    keep_if: Option<String>,

    /// Copy captured bytes verbatim instead of converting records to text.
    #[arg(short = 's', long)]
    skip_conversion: bool,

    /// Directory to watch for log file lifecycle events.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,

    /// Directory captured tombstones are written to.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TOMBSTONE_DIR)]
    tombstone_dir: PathBuf,
}

#[derive(Debug, Args)]
struct DeployOpts {
    /// Remote host to deploy to, as `[ssh://][user@]host[:port]`.
    #[arg(short = 't', long, value_name = "HOST")]
    target: String,

    /// Identity file used when connecting to the target.
    #[arg(long, value_name = "FILE")]
    target_key: Option<PathBuf>,

    /// Jump host used to reach the target.
    #[arg(short = 'p', long, value_name = "HOST")]
    proxy: Option<String>,

    #[command(flatten)]
    monitor: MonitorOpts,
}

impl MonitorOpts {
    fn filter_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::new();
        if let Some(pattern) = &self.include_log {
            spec = spec.include(pattern.clone());
        }
        if let Some(pattern) = &self.exclude_log {
            spec = spec.exclude(pattern.clone());
        }
        if let Some(pattern) = &self.keep_if {
            spec = spec.keep_if(pattern.clone());
        }
        spec
    }

    /// Flags to bake into a service unit or remote re-install. Directory
    /// overrides are carried only when they differ from the defaults.
    fn monitor_args(&self) -> MonitorArgs {
        MonitorArgs {
            include_log: self.include_log.clone(),
            exclude_log: self.exclude_log.clone(),
            keep_if: self.keep_if.clone(),
            skip_conversion: self.skip_conversion,
            log_dir: (self.log_dir != Path::new(DEFAULT_LOG_DIR)).then(|| self.log_dir.clone()),
            tombstone_dir: (self.tombstone_dir != Path::new(DEFAULT_TOMBSTONE_DIR))
                .then(|| self.tombstone_dir.clone()),
        }
    }
}

/// Parses `arguments` and executes the selected subcommand, returning the
/// process exit code.
pub fn run<I, T>(arguments: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(arguments) {
        Ok(cli) => cli,
        Err(error) => {
            let code = if error.use_stderr() { 2 } else { 0 };
            let _ = error.print();
            return ExitCode::from(code);
        }
    };
    init_tracing();
    match cli.command {
        TopCommand::Monitor(opts) => run_monitor(&opts),
        TopCommand::Service(ServiceCommand::Install(opts)) => report(
            daemon::systemd::install(&opts.monitor_args()),
            "service install failed",
        ),
        TopCommand::Service(ServiceCommand::Uninstall) => {
            report(daemon::systemd::uninstall(), "service uninstall failed")
        }
        TopCommand::Deploy(opts) => run_deploy(&opts),
    }
}

fn run_monitor(opts: &MonitorOpts) -> ExitCode {
    let rules = match FilterRules::compile(&opts.filter_spec()) {
        Ok(rules) => rules,
        Err(error) => {
            error!(%error, "invalid filter configuration");
            return ExitCode::FAILURE;
        }
    };
    let config = MonitorConfig::new(rules)
        .with_log_dir(&opts.log_dir)
        .with_tombstone_dir(&opts.tombstone_dir)
        .with_skip_conversion(opts.skip_conversion);
    let mut monitor = Monitor::new(config);
    let error = match monitor.run() {
        Ok(never) => match never {},
        Err(error) => error,
    };
    error!(%error, "monitor stopped");
    ExitCode::FAILURE
}

fn run_deploy(opts: &DeployOpts) -> ExitCode {
    let target = match SshTarget::parse(&opts.target, opts.target_key.clone()) {
        Ok(target) => target,
        Err(error) => {
            error!(%error, "invalid deploy target");
            return ExitCode::FAILURE;
        }
    };
    let proxy = match &opts.proxy {
        Some(spec) => match SshTarget::parse(spec, None) {
            Ok(proxy) => Some(proxy),
            Err(error) => {
                error!(%error, "invalid deploy proxy");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };
    report(
        daemon::deploy::deploy(&target, proxy.as_ref(), &opts.monitor.monitor_args()),
        "deploy failed",
    )
}

fn report<E: std::fmt::Display>(result: Result<(), E>, context: &str) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "{context}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

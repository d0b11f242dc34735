#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` provides the three optional pattern rules that decide which log
//! files the monitor tracks and which captured content it keeps. The rules
//! mirror the configuration surface of the monitor: a name-include pattern,
//! a name-exclude pattern, and a content keep-if pattern. Each rule is an
//! independent regular expression with match-anywhere semantics; an absent
//! (or empty) pattern always passes.
//!
//! # Design
//!
//! - [`FilterSpec`] carries the user-supplied pattern strings. The spec is
//!   lightweight; compilation happens once when a [`FilterRules`] is built.
//! - [`FilterRules`] owns the compiled expressions and exposes the two pure
//!   predicates consumed by the monitor: [`should_track`](FilterRules::should_track)
//!   for file names at create time and [`should_keep`](FilterRules::should_keep)
//!   for captured content at delete time.
//! - The content rule is compiled as a [`regex::bytes::Regex`] so scanning
//!   never requires captured log data to be valid UTF-8.
//!
//! # Invariants
//!
//! - The include and exclude rules are evaluated independently; when both
//!   fire, exclude wins.
//! - `should_keep` scans content line-by-line from the start and
//!   short-circuits on the first matching line.
//! - Rules are immutable after construction and shared for the process
//!   lifetime; a malformed pattern fails construction, never evaluation.
//!
//! # Errors
//!
//! [`FilterRules::compile`] reports [`FilterError`] when a pattern does not
//! compile. The error names the offending pattern and chains the underlying
//! [`regex::Error`].
//!
//! # Examples
//!
//! Track only nginx pod logs, but never sidecar streams:
//!
//! ```
//! use filters::{FilterRules, FilterSpec};
//!
//! let spec = FilterSpec::new()
//!     .include("^nginx-")
//!     .exclude("sidecar");
//! let rules = FilterRules::compile(&spec).expect("patterns compile");
//!
//! assert!(rules.should_track("nginx-7f6b_default_web-0.log"));
//! assert!(!rules.should_track("nginx-7f6b_default_sidecar-0.log"));
//! assert!(!rules.should_track("redis-0_default_cache-0.log"));
//! ```

mod error;
mod rules;

pub use error::FilterError;
pub use rules::{FilterRules, FilterSpec};

#[cfg(test)]
mod tests;

use thiserror::Error;

/// Error produced when a filter pattern cannot be compiled.
///
/// Pattern compilation happens once at startup; a malformed pattern is fatal
/// for the process, so the error carries everything needed for a useful
/// diagnostic: the pattern text and the engine's own report.
#[derive(Debug, Error)]
#[error("failed to compile filter pattern '{pattern}': {source}")]
pub struct FilterError {
    pattern: String,
    source: regex::Error,
}

impl FilterError {
    pub(crate) fn new(pattern: &str, source: regex::Error) -> Self {
        Self {
            pattern: pattern.to_owned(),
            source,
        }
    }

    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

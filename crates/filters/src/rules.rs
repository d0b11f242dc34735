use std::io::BufRead;

use regex::Regex;
use regex::bytes::Regex as BytesRegex;

use crate::FilterError;

/// User-supplied pattern strings, prior to compilation.
///
/// Every field is optional and an empty string is treated the same as an
/// absent rule, matching the behaviour of the command-line surface where an
/// unset flag and `--include-log ''` are indistinguishable in intent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSpec {
    include: Option<String>,
    exclude: Option<String>,
    keep_if: Option<String>,
}

impl FilterSpec {
    /// Creates a spec with no rules; everything is tracked and kept.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name-include pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include = Some(pattern.into());
        self
    }

    /// Sets the name-exclude pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    /// Sets the content keep-if pattern.
    #[must_use]
    pub fn keep_if(mut self, pattern: impl Into<String>) -> Self {
        self.keep_if = Some(pattern.into());
        self
    }

    fn include_pattern(&self) -> Option<&str> {
        present(self.include.as_deref())
    }

    fn exclude_pattern(&self) -> Option<&str> {
        present(self.exclude.as_deref())
    }

    fn keep_if_pattern(&self) -> Option<&str> {
        present(self.keep_if.as_deref())
    }
}

fn present(pattern: Option<&str>) -> Option<&str> {
    pattern.filter(|text| !text.is_empty())
}

/// Compiled filter rules shared by every event for the process lifetime.
#[derive(Clone, Debug)]
pub struct FilterRules {
    include: Option<Regex>,
    exclude: Option<Regex>,
    keep_if: Option<BytesRegex>,
}

impl FilterRules {
    /// Compiles the patterns in `spec` into reusable rules.
    ///
    /// Compilation failure is intended to be fatal at startup; evaluation
    /// itself can never fail.
    pub fn compile(spec: &FilterSpec) -> Result<Self, FilterError> {
        let include = spec
            .include_pattern()
            .map(|pattern| Regex::new(pattern).map_err(|error| FilterError::new(pattern, error)))
            .transpose()?;
        let exclude = spec
            .exclude_pattern()
            .map(|pattern| Regex::new(pattern).map_err(|error| FilterError::new(pattern, error)))
            .transpose()?;
        let keep_if = spec
            .keep_if_pattern()
            .map(|pattern| {
                BytesRegex::new(pattern).map_err(|error| FilterError::new(pattern, error))
            })
            .transpose()?;
        Ok(Self {
            include,
            exclude,
            keep_if,
        })
    }

    /// Reports whether a file with this name should be tracked.
    ///
    /// The include and exclude rules veto independently: a name fails when
    /// the include rule is set and does not match, or when the exclude rule
    /// is set and matches. Exclude wins when both rules fire.
    #[must_use]
    pub fn should_track(&self, name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(name) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(name) {
                return false;
            }
        }
        true
    }

    /// Reports whether captured content should be kept.
    ///
    /// Returns true when no keep-if rule is configured. Otherwise the
    /// content is scanned line-by-line from the start and the scan
    /// short-circuits on the first matching line. A read error ends the
    /// scan; the remainder is treated as containing no match.
    #[must_use]
    pub fn should_keep<R: BufRead>(&self, mut content: R) -> bool {
        let Some(keep_if) = &self.keep_if else {
            return true;
        };
        let mut line = Vec::new();
        loop {
            line.clear();
            match content.read_until(b'\n', &mut line) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {
                    if keep_if.is_match(&line) {
                        return true;
                    }
                }
            }
        }
    }

    /// Reports whether a content keep-if rule is configured.
    #[must_use]
    pub fn has_keep_if(&self) -> bool {
        self.keep_if.is_some()
    }
}

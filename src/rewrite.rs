use regex::{NoExpand, Regex};
use thiserror::Error;

/// The fundamental rewrite primitive: a compiled pattern plus a literal
/// replacement, applied once to the full text.
///
/// All higher-level behavior (the built-in chain rules, the file driver)
/// compiles down to this. Intelligence lives in the pattern, not in the
/// application logic.
#[derive(Debug, Clone)]
#[must_use = "RewriteRule does nothing until apply() is called"]
pub struct RewriteRule {
    /// Stable identifier used in reporting
    pub id: &'static str,
    /// Pattern matched against the full text
    pattern: Regex,
    /// Literal replacement for every match (no capture expansion)
    replacement: &'static str,
}

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("invalid pattern for rule '{id}': {source}")]
    Pattern {
        id: &'static str,
        source: regex::Error,
    },
}

/// Result of applying one rule to the text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "RuleOutcome should be checked for rewritten/no-match"]
pub enum RuleOutcome {
    /// Pattern matched; `sites` occurrences were replaced
    Rewritten { sites: usize },
    /// Pattern did not occur; text passed through unchanged
    NoMatch,
}

impl RuleOutcome {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, RuleOutcome::Rewritten { .. })
    }
}

impl RewriteRule {
    /// Compile a rule from its pattern and replacement.
    pub fn new(
        id: &'static str,
        pattern: &str,
        replacement: &'static str,
    ) -> Result<Self, RewriteError> {
        let pattern = Regex::new(pattern).map_err(|source| RewriteError::Pattern { id, source })?;
        Ok(Self {
            id,
            pattern,
            replacement,
        })
    }

    /// Apply this rule to the full text, replacing every match.
    ///
    /// Returns the (possibly unchanged) text together with the outcome.
    /// The replacement is inserted verbatim; `$` sequences in it are not
    /// treated as capture references.
    pub fn apply(&self, text: &str) -> (String, RuleOutcome) {
        let sites = self.pattern.find_iter(text).count();
        if sites == 0 {
            return (text.to_string(), RuleOutcome::NoMatch);
        }

        let rewritten = self
            .pattern
            .replace_all(text, NoExpand(self.replacement))
            .into_owned();

        (rewritten, RuleOutcome::Rewritten { sites })
    }
}

//! # Match Policy — What Counts as a Close Match
//!
//! The auto-correction threshold is deliberately configuration, not a
//! hard-coded heuristic: a value that matches a vocabulary label under
//! the active policy (but is not byte-identical to the preferred label)
//! is corrected with a RECOMMENDATION; a value no policy rule accepts is
//! a FAIL. There is no edit-distance matching — anything looser than the
//! rules below must be an explicit policy choice by the operator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Policy deciding which label variants are accepted as a close match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Byte equality only.
    Exact,
    /// Unicode-lowercase equality.
    CaseInsensitive,
    /// Lowercase, trimmed, internal whitespace collapsed, `-`/`_` dropped.
    #[default]
    Normalized,
}

impl MatchPolicy {
    /// Canonical form of a label under this policy.
    pub fn canonicalize(&self, label: &str) -> String {
        match self {
            MatchPolicy::Exact => label.to_string(),
            MatchPolicy::CaseInsensitive => label.to_lowercase(),
            MatchPolicy::Normalized => {
                let mut out = String::with_capacity(label.len());
                let mut pending_space = false;
                for c in label.trim().chars() {
                    if c.is_whitespace() {
                        pending_space = !out.is_empty();
                        continue;
                    }
                    if c == '-' || c == '_' {
                        continue;
                    }
                    if pending_space {
                        out.push(' ');
                        pending_space = false;
                    }
                    out.extend(c.to_lowercase());
                }
                out
            }
        }
    }

    /// Whether `candidate` matches `query` under this policy.
    pub fn matches(&self, candidate: &str, query: &str) -> bool {
        self.canonicalize(candidate) == self.canonicalize(query)
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchPolicy::Exact => "exact",
            MatchPolicy::CaseInsensitive => "case-insensitive",
            MatchPolicy::Normalized => "normalized",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MatchPolicy::Exact),
            "case-insensitive" => Ok(MatchPolicy::CaseInsensitive),
            "normalized" => Ok(MatchPolicy::Normalized),
            other => Err(format!(
                "'{other}' is not a match policy (expected exact, case-insensitive or normalized)"
            )),
        }
    }
}

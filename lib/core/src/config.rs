use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Normalization and matching policy, selected once and threaded through
/// the normalizer, the vector space and the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Character-oriented cleaning, word-bounded character n-gram vocabulary,
    /// invoice text queried as word-span fragments.
    #[default]
    CharNgram,
    /// Token-oriented cleaning with stop-word removal and lemmatization,
    /// word n-gram vocabulary, invoice text queried as a single document.
    WordNgram,
}

impl Policy {
    /// Default vocabulary unit range for this policy.
    #[inline]
    #[must_use]
    pub const fn default_analyzer_range(self) -> (usize, usize) {
        match self {
            Policy::CharNgram => (3, 4),
            Policy::WordNgram => (1, 4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    #[default]
    Euclidean,
    Cosine,
}

/// Configuration for a resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub policy: Policy,
    /// Inclusive size range of the vocabulary units (characters for
    /// `CharNgram`, words for `WordNgram`). `None` takes the policy default.
    pub analyzer_range: Option<(usize, usize)>,
    /// Inclusive word-span range of the query fragments (`CharNgram` only).
    pub fragment_range: (usize, usize),
    pub distance: Distance,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::for_policy(Policy::default())
    }
}

impl MatchConfig {
    #[must_use]
    pub fn for_policy(policy: Policy) -> Self {
        Self {
            policy,
            analyzer_range: None,
            fragment_range: (3, 4),
            distance: Distance::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn analyzer_range(&self) -> (usize, usize) {
        self.analyzer_range
            .unwrap_or_else(|| self.policy.default_analyzer_range())
    }

    /// Parse a JSON configuration; absent fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_range("analyzer_range", self.analyzer_range())?;
        check_range("fragment_range", self.fragment_range)
    }
}

fn check_range(name: &str, (min, max): (usize, usize)) -> Result<()> {
    if min == 0 {
        return Err(Error::InvalidConfig(format!("{name}: lower bound must be at least 1")));
    }
    if min > max {
        return Err(Error::InvalidConfig(format!(
            "{name}: lower bound {min} exceeds upper bound {max}"
        )));
    }
    Ok(())
}

use anyhow::{Context, Result};

use crate::ats::scorer::DEFAULT_TOP_KEYWORDS;

/// Caps and display limits applied around the scorer.
/// Loaded once into `Config`; handlers never hard-code these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtsPolicy {
    /// Ranked corpus keywords considered when scoring.
    pub top_keywords: usize,
    /// Matched/missing keywords returned by `/ats/score`.
    pub display_keywords: usize,
    /// Missing skills returned by `/ats/evaluate`.
    pub evaluate_missing_skills: usize,
    /// Missing skills returned per resume by `/ats/compare`.
    pub compare_missing_skills: usize,
    /// Minimum trimmed resume length, in characters.
    pub min_resume_chars: usize,
    /// Resume snapshot length persisted by `/ats/evaluate`, in characters.
    pub max_snapshot_chars: usize,
    pub compare_min: usize,
    pub compare_max: usize,
}

impl Default for AtsPolicy {
    fn default() -> Self {
        Self {
            top_keywords: DEFAULT_TOP_KEYWORDS,
            display_keywords: 15,
            evaluate_missing_skills: 15,
            compare_missing_skills: 10,
            min_resume_chars: 20,
            max_snapshot_chars: 32_000,
            compare_min: 2,
            compare_max: 10,
        }
    }
}

impl AtsPolicy {
    /// Defaults, with `ATS_TOP_KEYWORDS` applied when set.
    pub fn from_env() -> Result<Self> {
        let mut policy = Self::default();
        if let Ok(raw) = std::env::var("ATS_TOP_KEYWORDS") {
            policy.top_keywords = raw
                .parse::<usize>()
                .context("ATS_TOP_KEYWORDS must be a non-negative integer")?;
        }
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_limits() {
        let policy = AtsPolicy::default();
        assert_eq!(policy.top_keywords, 30);
        assert_eq!(policy.display_keywords, 15);
        assert_eq!(policy.compare_missing_skills, 10);
        assert_eq!(policy.min_resume_chars, 20);
        assert_eq!(policy.max_snapshot_chars, 32_000);
        assert!(policy.compare_min <= policy.compare_max);
    }
}

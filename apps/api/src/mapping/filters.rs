//! Filter Views over the screening candidate list.
//!
//! Filter state is an immutable value: every change produces a new
//! `ScreeningFilters`, and `apply` is a pure function of that value and the list.

use serde::{Deserialize, Serialize};

use crate::models::application::JdMappingStatus;

/// Sentinel role code that disables role filtering.
pub const ALL_ROLES: &str = "all";
const DEFAULT_MIN_SCORE: f64 = 0.0;
const DEFAULT_MAX_SCORE: f64 = 100.0;

/// An application joined with its CV match score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningCandidate {
    pub id: i64,
    pub application_id: Option<String>,
    pub candidate_name: Option<String>,
    pub role_code: Option<String>,
    pub job_applied: Option<String>,
    pub email: Option<String>,
    pub jd_mapping: String,
    pub score: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleCodeFilter {
    #[default]
    All,
    Exact(String),
}

impl RoleCodeFilter {
    /// Blank or `all` (any case) selects every role.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|r| !r.is_empty()) {
            None => RoleCodeFilter::All,
            Some(r) if r.eq_ignore_ascii_case(ALL_ROLES) => RoleCodeFilter::All,
            Some(r) => RoleCodeFilter::Exact(r.to_string()),
        }
    }

    pub fn matches(&self, role_code: Option<&str>) -> bool {
        match self {
            RoleCodeFilter::All => true,
            RoleCodeFilter::Exact(code) => role_code == Some(code.as_str()),
        }
    }
}

/// Parses a stored score. Blank, non-numeric and non-finite values have no score.
pub fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Inclusive score bounds. With neither bound set every candidate passes;
/// with either set, a missing bound defaults to 0 or 100 and candidates
/// without a usable score are excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ScoreRange {
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Result<Self, String> {
        Ok(ScoreRange {
            min: parse_bound(min, "score_min")?,
            max: parse_bound(max, "score_max")?,
        })
    }

    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, score: Option<&str>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(score) = score.and_then(parse_score) else {
            return false;
        };
        let min = self.min.unwrap_or(DEFAULT_MIN_SCORE);
        let max = self.max.unwrap_or(DEFAULT_MAX_SCORE);
        score >= min && score <= max
    }
}

fn parse_bound(raw: Option<&str>, name: &str) -> Result<Option<f64>, String> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(None),
        Some(r) => parse_score(r)
            .map(Some)
            .ok_or_else(|| format!("{name} must be a number, got \"{r}\"")),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreeningQuery {
    pub role_code: Option<String>,
    pub score_min: Option<String>,
    pub score_max: Option<String>,
}

impl ScreeningQuery {
    /// True when no filter parameter carries a value.
    pub fn is_blank(&self) -> bool {
        [&self.role_code, &self.score_min, &self.score_max]
            .into_iter()
            .all(|v| v.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

/// Conjunction of the role, score and workflow-tag predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreeningFilters {
    pub role: RoleCodeFilter,
    pub score: ScoreRange,
    pub jd_mapping: Option<JdMappingStatus>,
}

impl ScreeningFilters {
    /// Filters for the screening tab: only candidates whose mapping is done.
    pub fn from_query(query: &ScreeningQuery) -> Result<Self, String> {
        let done = ScreeningFilters {
            jd_mapping: Some(JdMappingStatus::Done),
            ..Default::default()
        };
        if query.is_blank() {
            return Ok(done.reset());
        }
        let score = ScoreRange::parse(query.score_min.as_deref(), query.score_max.as_deref())?;
        Ok(done
            .with_role(RoleCodeFilter::parse(query.role_code.as_deref()))
            .with_score(score))
    }

    pub fn with_role(self, role: RoleCodeFilter) -> Self {
        Self { role, ..self }
    }

    pub fn with_score(self, score: ScoreRange) -> Self {
        Self { score, ..self }
    }

    /// Clears the role and score predicates. The workflow-tag scope of the view
    /// is kept, so an unscoped filter resets to the identity.
    pub fn reset(&self) -> Self {
        Self {
            jd_mapping: self.jd_mapping,
            ..Self::default()
        }
    }

    pub fn matches(&self, candidate: &ScreeningCandidate) -> bool {
        self.role.matches(candidate.role_code.as_deref())
            && self.score.contains(candidate.score.as_deref())
            && self
                .jd_mapping
                .map_or(true, |status| candidate.jd_mapping == status.as_str())
    }

    pub fn apply(&self, candidates: &[ScreeningCandidate]) -> Vec<ScreeningCandidate> {
        candidates
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}

//! ATS scoring — resume-to-job compatibility on a 0–100 scale.
//!
//! The score has two parts:
//! - skills (up to 60): share of the job's required skills found in the resume
//! - keywords (up to 40): share of the job corpus' top keywords found in the resume
//!
//! Pure functions over borrowed data. No I/O, no shared state, fully deterministic.

use serde::{Deserialize, Serialize};

use crate::ats::policy::AtsPolicy;
use crate::ats::text::{contains_phrase, normalize, strip_html, top_keywords};

pub const SKILLS_WEIGHT: usize = 60;
pub const KEYWORDS_WEIGHT: usize = 40;
pub const MAX_SCORE: u32 = 100;
pub const DEFAULT_TOP_KEYWORDS: usize = 30;

// ────────────────────────────────────────────────────────────────────────────
// Input / output data models
// ────────────────────────────────────────────────────────────────────────────

/// Read-only view of a job posting, as seen by the scorer.
/// Absent optional fields are passed as empty strings.
#[derive(Debug, Clone, Copy)]
pub struct JobPosting<'a> {
    pub title: &'a str,
    pub company_name: &'a str,
    pub location: &'a str,
    pub description_html: &'a str,
    pub skills_required: &'a [String],
}

impl JobPosting<'_> {
    /// Title, company, location and tag-stripped description, space-joined.
    pub fn corpus(&self) -> String {
        [
            self.title,
            self.company_name,
            self.location,
            strip_html(self.description_html).as_str(),
        ]
        .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: u32,   // 0 – 60
    pub keywords: u32, // 0 – 40
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub score: u32, // 0 – 100
    pub breakdown: ScoreBreakdown,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// A labelled resume submitted for comparison.
#[derive(Debug, Clone, Copy)]
pub struct LabeledResume<'a> {
    pub label: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResume {
    pub label: String,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub missing_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume_text` against `job` using the default 30-keyword cap.
#[allow(dead_code)]
pub fn score(job: &JobPosting<'_>, resume_text: &str) -> MatchResult {
    score_with_cap(job, resume_text, DEFAULT_TOP_KEYWORDS)
}

/// Scores `resume_text` against `job`, considering the `top_n` most frequent
/// corpus keywords.
///
/// Algorithm:
/// 1. Normalize and pad the resume once; every containment check reuses it.
/// 2. Partition required skills by phrase containment → skills = round(m/n × 60)
/// 3. Rank corpus keywords, partition the same way → keywords = round(m/n × 40)
/// 4. score = skills + keywords, capped at 100
pub fn score_with_cap(job: &JobPosting<'_>, resume_text: &str, top_n: usize) -> MatchResult {
    let resume_norm = format!(" {} ", normalize(resume_text));

    let (matched_skills, missing_skills) = partition_by_presence(job.skills_required, &resume_norm);
    let skills = weighted_share(matched_skills.len(), job.skills_required.len(), SKILLS_WEIGHT);

    let job_keywords = top_keywords(&job.corpus(), top_n);
    let (matched_keywords, missing_keywords) = partition_by_presence(&job_keywords, &resume_norm);
    let keywords = weighted_share(matched_keywords.len(), job_keywords.len(), KEYWORDS_WEIGHT);

    MatchResult {
        score: (skills + keywords).min(MAX_SCORE),
        breakdown: ScoreBreakdown { skills, keywords },
        matched_skills,
        missing_skills,
        matched_keywords,
        missing_keywords,
    }
}

/// Scores every resume independently and orders them best first.
/// Equal scores keep submission order.
pub fn rank_resumes(
    job: &JobPosting<'_>,
    resumes: &[LabeledResume<'_>],
    policy: &AtsPolicy,
) -> Vec<RankedResume> {
    let mut ranked: Vec<RankedResume> = resumes
        .iter()
        .map(|resume| {
            let result = score_with_cap(job, resume.text, policy.top_keywords);
            RankedResume {
                label: resume.label.to_string(),
                score: result.score,
                breakdown: result.breakdown,
                missing_skills: result
                    .missing_skills
                    .into_iter()
                    .take(policy.compare_missing_skills)
                    .collect(),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Splits `items` into (present, absent) in `padded_norm`, preserving order.
fn partition_by_presence(items: &[String], padded_norm: &str) -> (Vec<String>, Vec<String>) {
    items
        .iter()
        .cloned()
        .partition(|item| contains_phrase(padded_norm, item))
}

/// round(matched / total × weight), half rounding up, in exact integer
/// arithmetic. Zero when `total` is zero.
fn weighted_share(matched: usize, total: usize, weight: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let share = (2 * matched * weight + total) / (2 * total);
    share as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

const MAX_SKILL_RECOMMENDATIONS: usize = 5;
const MAX_KEYWORDS_IN_RECOMMENDATION: usize = 5;

/// Human-readable next steps derived from a match result.
pub fn build_recommendations(result: &MatchResult) -> Vec<String> {
    let mut recommendations: Vec<String> = result
        .missing_skills
        .iter()
        .take(MAX_SKILL_RECOMMENDATIONS)
        .map(|skill| {
            format!("Add evidence of {skill}: a project, role or certification that uses it.")
        })
        .collect();

    if !result.missing_keywords.is_empty() {
        let keywords: Vec<&str> = result
            .missing_keywords
            .iter()
            .take(MAX_KEYWORDS_IN_RECOMMENDATION)
            .map(String::as_str)
            .collect();
        recommendations.push(format!(
            "Mirror the posting's language where it is accurate for you: {}.",
            keywords.join(", ")
        ));
    }

    let score = result.score;
    recommendations.push(if score >= 80 {
        format!("Strong match ({score}/100). Tailor your summary and apply.")
    } else if score >= 60 {
        format!("Moderate match ({score}/100). Close the gaps above before applying.")
    } else {
        format!("Low match ({score}/100). Consider whether this role fits your background.")
    });

    recommendations
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted ATS evaluation: resume snapshot plus the full match result.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRow {
    pub id: Uuid,
    pub owner_id: String,
    pub job_id: Uuid,
    pub resume_text: String,
    pub score: i32,
    pub skills_score: i32,
    pub keywords_score: i32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// List view of `ats_scores`, without the resume snapshot and keyword lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreSummaryRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub score: i32,
    pub skills_score: i32,
    pub keywords_score: i32,
    pub created_at: DateTime<Utc>,
}

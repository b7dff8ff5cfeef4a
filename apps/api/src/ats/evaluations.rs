//! Persistence for ATS evaluations (`ats_scores`).

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::ats::scorer::MatchResult;
use crate::models::ats::{AtsScoreRow, AtsScoreSummaryRow};

/// Parameters for recording an evaluation.
pub struct NewEvaluation<'a> {
    pub owner_id: &'a str,
    pub job_id: Uuid,
    pub resume_snapshot: &'a str,
    pub result: &'a MatchResult,
}

pub async fn insert_evaluation(
    pool: &PgPool,
    evaluation: NewEvaluation<'_>,
) -> Result<Uuid, sqlx::Error> {
    let NewEvaluation {
        owner_id,
        job_id,
        resume_snapshot,
        result,
    } = evaluation;
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO ats_scores
            (id, owner_id, job_id, resume_text, score, skills_score, keywords_score,
             matched_skills, missing_skills, matched_keywords, missing_keywords)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(job_id)
    .bind(resume_snapshot)
    .bind(result.score as i32)
    .bind(result.breakdown.skills as i32)
    .bind(result.breakdown.keywords as i32)
    .bind(&result.matched_skills)
    .bind(&result.missing_skills)
    .bind(&result.matched_keywords)
    .bind(&result.missing_keywords)
    .execute(pool)
    .await?;

    info!("Recorded ATS evaluation {id} for job {job_id} (owner {owner_id}, score {})", result.score);
    Ok(id)
}

/// The owner's evaluations, newest first, optionally for one job.
pub async fn list_evaluations(
    pool: &PgPool,
    owner_id: &str,
    job_id: Option<Uuid>,
    limit: i64,
) -> Result<Vec<AtsScoreSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, AtsScoreSummaryRow>(
        r#"
        SELECT id, job_id, score, skills_score, keywords_score, created_at
        FROM ats_scores
        WHERE owner_id = $1 AND ($2::uuid IS NULL OR job_id = $2)
        ORDER BY created_at DESC, id
        LIMIT $3
        "#,
    )
    .bind(owner_id)
    .bind(job_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// A single evaluation, only if it belongs to `owner_id`.
pub async fn get_evaluation(
    pool: &PgPool,
    owner_id: &str,
    id: Uuid,
) -> Result<Option<AtsScoreRow>, sqlx::Error> {
    sqlx::query_as::<_, AtsScoreRow>("SELECT * FROM ats_scores WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

/// The first `max_chars` characters of the trimmed text.
pub fn resume_snapshot(text: &str, max_chars: usize) -> &str {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &trimmed[..byte_idx],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_trims_and_keeps_short_text() {
        assert_eq!(resume_snapshot("  short resume  ", 32_000), "short resume");
    }

    #[test]
    fn test_snapshot_truncates_to_char_count() {
        let text = "a".repeat(40_000);
        assert_eq!(resume_snapshot(&text, 32_000).len(), 32_000);
    }

    #[test]
    fn test_snapshot_respects_char_boundaries() {
        let text = "é".repeat(10);
        let snapshot = resume_snapshot(&text, 4);
        assert_eq!(snapshot, "éééé");
        assert_eq!(snapshot.chars().count(), 4);
    }

    #[test]
    fn test_snapshot_exact_length_untouched() {
        assert_eq!(resume_snapshot("abcd", 4), "abcd");
        assert_eq!(resume_snapshot("abcd", 0), "");
    }
}

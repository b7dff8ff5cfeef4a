//! Axum route handlers for the ATS API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::ats::evaluations::{self, resume_snapshot, NewEvaluation};
use crate::ats::policy::AtsPolicy;
use crate::ats::scorer::{
    build_recommendations, rank_resumes, score_with_cap, LabeledResume, RankedResume,
    ScoreBreakdown,
};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::jobs::store;
use crate::models::ats::{AtsScoreRow, AtsScoreSummaryRow};
use crate::models::job::JobRow;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 200;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub job_id: Uuid,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub job_id: Uuid,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub ats_score_id: Uuid,
    pub job_id: Uuid,
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResumeInput {
    pub label: String,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub job_id: Uuid,
    pub resumes: Vec<CompareResumeInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub job_id: Uuid,
    pub results: Vec<RankedResume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationHistoryParams {
    pub job_id: Option<Uuid>,
    pub limit: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// Scores a resume against a job posting. Nothing is persisted.
pub async fn handle_score(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let policy = &state.config.ats;
    validate_resume_text(&request.resume_text, policy, "resumeText")?;

    let job = fetch_job(&state.db, request.job_id).await?;
    let result = score_with_cap(&job.posting(), &request.resume_text, policy.top_keywords);
    let recommendations = build_recommendations(&result);

    info!(
        "ATS score for job {} by {}: {} (skills {}, keywords {})",
        job.id, user.subject, result.score, result.breakdown.skills, result.breakdown.keywords
    );

    Ok(Json(ScoreResponse {
        job_id: job.id,
        score: result.score,
        breakdown: result.breakdown,
        matched_skills: result.matched_skills,
        missing_skills: result.missing_skills,
        matched_keywords: truncated(result.matched_keywords, policy.display_keywords),
        missing_keywords: truncated(result.missing_keywords, policy.display_keywords),
        recommendations,
    }))
}

/// POST /api/v1/ats/evaluate
///
/// Scores like `/ats/score` and records the result with a resume snapshot.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<ScoreRequest>,
) -> Result<(StatusCode, Json<EvaluateResponse>), AppError> {
    let policy = &state.config.ats;
    validate_resume_text(&request.resume_text, policy, "resumeText")?;

    let job = fetch_job(&state.db, request.job_id).await?;
    let result = score_with_cap(&job.posting(), &request.resume_text, policy.top_keywords);

    let ats_score_id = evaluations::insert_evaluation(
        &state.db,
        NewEvaluation {
            owner_id: &user.subject,
            job_id: job.id,
            resume_snapshot: resume_snapshot(&request.resume_text, policy.max_snapshot_chars),
            result: &result,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(EvaluateResponse {
            ats_score_id,
            job_id: job.id,
            score: result.score,
            breakdown: result.breakdown,
            missing_skills: truncated(result.missing_skills, policy.evaluate_missing_skills),
        }),
    ))
}

/// POST /api/v1/ats/compare
///
/// Ranks 2–10 resumes against one job posting, best first.
pub async fn handle_compare(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let policy = &state.config.ats;
    validate_compare_request(&request, policy)?;

    let job = fetch_job(&state.db, request.job_id).await?;
    let resumes: Vec<LabeledResume<'_>> = request
        .resumes
        .iter()
        .map(|r| LabeledResume {
            label: r.label.trim(),
            text: &r.resume_text,
        })
        .collect();
    let results = rank_resumes(&job.posting(), &resumes, policy);

    info!(
        "ATS compare for job {} by {}: {} resumes, best {:?}",
        job.id,
        user.subject,
        results.len(),
        results.first().map(|r| r.score)
    );

    Ok(Json(CompareResponse {
        job_id: job.id,
        results,
    }))
}

/// GET /api/v1/ats/evaluations?jobId=&limit=
pub async fn handle_list_evaluations(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(params): ApiQuery<EvaluationHistoryParams>,
) -> Result<Json<Vec<AtsScoreSummaryRow>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let rows =
        evaluations::list_evaluations(&state.db, &user.subject, params.job_id, limit).await?;
    Ok(Json(rows))
}

/// GET /api/v1/ats/evaluations/:id
///
/// Another user's evaluation answers 404, same as a missing one.
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<AtsScoreRow>, AppError> {
    let row = evaluations::get_evaluation(&state.db, &user.subject, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Evaluation {id} not found")))?;
    Ok(Json(row))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn fetch_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    store::get_job(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

fn validate_resume_text(text: &str, policy: &AtsPolicy, field: &str) -> Result<(), AppError> {
    if text.trim().chars().count() < policy.min_resume_chars {
        return Err(AppError::Validation(format!(
            "{field} must be at least {} characters",
            policy.min_resume_chars
        )));
    }
    Ok(())
}

fn validate_compare_request(request: &CompareRequest, policy: &AtsPolicy) -> Result<(), AppError> {
    let count = request.resumes.len();
    if count < policy.compare_min || count > policy.compare_max {
        return Err(AppError::Validation(format!(
            "resumes must contain between {} and {} entries, got {count}",
            policy.compare_min, policy.compare_max
        )));
    }

    for (idx, resume) in request.resumes.iter().enumerate() {
        if resume.label.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "resumes[{idx}].label cannot be empty"
            )));
        }
        validate_resume_text(
            &resume.resume_text,
            policy,
            &format!("resumes[{idx}].resumeText"),
        )?;
    }
    Ok(())
}

fn truncated(mut items: Vec<String>, limit: usize) -> Vec<String> {
    items.truncate(limit);
    items
}

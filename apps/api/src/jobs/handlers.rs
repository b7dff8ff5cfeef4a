//! Axum route handlers for the Jobs API.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::jobs::store::{self, JobFilter, NewJob};
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub company_name: String,
    pub location: Option<String>,
    pub description_html: Option<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobSearchParams {
    pub q: Option<String>,
    pub location: Option<String>,
    pub skill: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let title = request.title.trim();
    let company_name = request.company_name.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if company_name.is_empty() {
        return Err(AppError::Validation("companyName cannot be empty".to_string()));
    }

    let skills = store::clean_skills(&request.skills_required);
    let job = store::insert_job(
        &state.db,
        NewJob {
            title,
            company_name,
            location: non_blank(request.location.as_deref()),
            description_html: non_blank(request.description_html.as_deref()),
            skills_required: &skills,
            url: non_blank(request.url.as_deref()),
            created_by: &user.subject,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = store::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// GET /api/v1/jobs?q=&location=&skill=&limit=&offset=
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<JobSearchParams>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let filter = JobFilter {
        text: non_blank(params.q.as_deref()),
        location: non_blank(params.location.as_deref()),
        skill: non_blank(params.skill.as_deref()),
        limit: store::page_size(params.limit),
        offset: params.offset.unwrap_or(0).max(0),
    };
    let jobs = store::search_jobs(&state.db, &filter).await?;
    Ok(Json(jobs))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

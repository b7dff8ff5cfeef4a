//! Postgres access for `job_postings`.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job::JobRow;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Fields of a posting to insert. Skills are expected to be cleaned already.
pub struct NewJob<'a> {
    pub title: &'a str,
    pub company_name: &'a str,
    pub location: Option<&'a str>,
    pub description_html: Option<&'a str>,
    pub skills_required: &'a [String],
    pub url: Option<&'a str>,
    pub created_by: &'a str,
}

/// Search filters. `None` means "no constraint".
#[derive(Debug, Default)]
pub struct JobFilter<'a> {
    pub text: Option<&'a str>,
    pub location: Option<&'a str>,
    pub skill: Option<&'a str>,
    pub limit: i64,
    pub offset: i64,
}

pub async fn insert_job(pool: &PgPool, job: NewJob<'_>) -> Result<JobRow, sqlx::Error> {
    let NewJob {
        title,
        company_name,
        location,
        description_html,
        skills_required,
        url,
        created_by,
    } = job;

    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO job_postings
            (id, title, company_name, location, description_html, skills_required, url, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(company_name)
    .bind(location)
    .bind(description_html)
    .bind(skills_required)
    .bind(url)
    .bind(created_by)
    .fetch_one(pool)
    .await?;

    info!("Created job posting {} ({} @ {})", row.id, row.title, row.company_name);
    Ok(row)
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Newest-first search over title/company, location and required skills.
pub async fn search_jobs(pool: &PgPool, filter: &JobFilter<'_>) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        SELECT *
        FROM job_postings
        WHERE ($1::text IS NULL OR title ILIKE $1 OR company_name ILIKE $1)
          AND ($2::text IS NULL OR location ILIKE $2)
          AND ($3::text IS NULL OR EXISTS (
                SELECT 1 FROM unnest(skills_required) AS s WHERE lower(s) = lower($3)
              ))
        ORDER BY created_at DESC, id
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(filter.text.map(contains_pattern))
    .bind(filter.location.map(contains_pattern))
    .bind(filter.skill)
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(pool)
    .await
}

/// Trims skills, drops blanks and case-insensitive duplicates (first wins).
pub fn clean_skills(skills: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    skills
        .iter()
        .map(|skill| skill.trim())
        .filter(|skill| !skill.is_empty())
        .filter(|skill| seen.insert(skill.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Clamps a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn page_size(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// `%text%` with LIKE metacharacters escaped.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_clean_skills_trims_and_dedupes() {
        let skills = owned(&["  Rust ", "rust", "", "   ", "Go", "GO", "Kafka"]);
        assert_eq!(clean_skills(&skills), vec!["Rust", "Go", "Kafka"]);
    }

    #[test]
    fn test_clean_skills_empty() {
        assert!(clean_skills(&[]).is_empty());
    }

    #[test]
    fn test_page_size_clamped() {
        assert_eq!(page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(page_size(Some(0)), 1);
        assert_eq!(page_size(Some(-5)), 1);
        assert_eq!(page_size(Some(500)), MAX_PAGE_SIZE);
        assert_eq!(page_size(Some(42)), 42);
    }

    #[test]
    fn test_contains_pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern(" rust "), "%rust%");
        assert_eq!(contains_pattern("100%_remote"), "%100\\%\\_remote%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}

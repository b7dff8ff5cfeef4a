use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::ats::scorer::JobPosting;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    pub location: Option<String>,
    pub description_html: Option<String>,
    pub skills_required: Vec<String>,
    pub url: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    /// Borrowed view handed to the ATS scorer. Missing fields read as empty.
    pub fn posting(&self) -> JobPosting<'_> {
        JobPosting {
            title: &self.title,
            company_name: &self.company_name,
            location: self.location.as_deref().unwrap_or(""),
            description_html: self.description_html.as_deref().unwrap_or(""),
            skills_required: &self.skills_required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_treats_missing_fields_as_empty() {
        let row = JobRow {
            id: Uuid::new_v4(),
            title: "Data Engineer".to_string(),
            company_name: "Initech".to_string(),
            location: None,
            description_html: None,
            skills_required: vec!["SQL".to_string()],
            url: None,
            created_by: None,
            created_at: Utc::now(),
        };
        let posting = row.posting();
        assert_eq!(posting.location, "");
        assert_eq!(posting.description_html, "");
        assert_eq!(posting.corpus(), "Data Engineer Initech  ");
        assert_eq!(posting.skills_required, ["SQL".to_string()]);
    }
}

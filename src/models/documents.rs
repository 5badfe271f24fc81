use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document owned by a person. This core only searches them by keyword.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub person_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_type: String,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Optional narrowing filters for document search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFilters {
    pub file_type: Option<String>,
}

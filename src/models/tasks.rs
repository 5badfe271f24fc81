use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task assigned to a person. Only active tasks surface in prompts.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub person_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// One of `todo`, `in_progress`, `done`.
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task still needs attention.
    pub fn is_active(&self) -> bool {
        self.status != "done"
    }
}

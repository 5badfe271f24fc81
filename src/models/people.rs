use crate::enneagram::EnneagramType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person in the directory.
///
/// Owned by the directory; mutated only through explicit update operations
/// and never deleted implicitly.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub department_id: Option<Uuid>,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    /// Ordered skill/duty strings.
    pub responsibilities: Vec<String>,
    /// Canonical enneagram code `"1"`–`"9"`, or absent.
    pub personality_type: Option<String>,
    pub organization_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// The parsed personality type, if a valid code is stored.
    pub fn enneagram(&self) -> Option<EnneagramType> {
        self.personality_type
            .as_deref()
            .and_then(EnneagramType::parse)
    }
}

/// Patch applied to an existing person. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePerson {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<Uuid>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub personality_type: Option<String>,
}

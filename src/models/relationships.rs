use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed reporting edge: `manager_id` manages `report_id`.
///
/// The schema does not enforce a single manager per report or the absence
/// of cycles; resolution code has to tolerate both (pick-first with a
/// logged inconsistency, visited-set guards on walks).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReportingRelationship {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub manager_id: Uuid,
    pub report_id: Uuid,
    pub created_at: DateTime<Utc>,
}

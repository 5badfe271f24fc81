use serde::{Deserialize, Serialize};

/// The primary intent classes the detector can assign.
///
/// `Mixed` is never scored; it is the fallback when no keyword matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryIntent {
    TeamComposition,
    DocumentSearch,
    ConflictResolution,
    Delegation,
    EmployeeLookup,
    DepartmentOverview,
    Mixed,
}

impl PrimaryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryIntent::TeamComposition => "team_composition",
            PrimaryIntent::DocumentSearch => "document_search",
            PrimaryIntent::ConflictResolution => "conflict_resolution",
            PrimaryIntent::Delegation => "delegation",
            PrimaryIntent::EmployeeLookup => "employee_lookup",
            PrimaryIntent::DepartmentOverview => "department_overview",
            PrimaryIntent::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for PrimaryIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the question refers to present or past state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Current,
    Historical,
}

/// Structured entities pulled out of the question text.
///
/// `people` holds both name strings and email strings in one list;
/// consumers route entries containing `@` to the email lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEntities {
    pub people: Vec<String>,
    pub departments: Vec<String>,
    pub document_types: Vec<String>,
    pub skills: Vec<String>,
    pub locations: Vec<String>,
    pub timeframe: Option<Timeframe>,
    pub project_type: Option<String>,
}

/// Which downstream data categories the query requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataNeeds {
    pub needs_people_data: bool,
    pub needs_document_data: bool,
    pub needs_relationship_data: bool,
    pub needs_enneagram_data: bool,
}

/// Result of classifying one question. Created fresh per input, no
/// lifecycle beyond the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub primary_intent: PrimaryIntent,
    /// `max_score / total_score`, or 0 when nothing matched.
    pub confidence: f64,
    pub entities: QueryEntities,
    pub data_needs: DataNeeds,
}

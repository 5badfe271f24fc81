use crate::enneagram::EnneagramProfile;
use crate::models::departments::Department;
use crate::models::documents::Document;
use crate::models::people::Person;
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

/// One person's place in the reporting graph.
#[derive(Debug, Clone, Serialize)]
pub struct PersonRelationships {
    pub person: Person,
    pub manager: Option<Person>,
    pub direct_reports: Vec<Person>,
}

/// A resolved person together with their static personality profile.
#[derive(Debug, Clone, Serialize)]
pub struct PersonInsight {
    pub person: Person,
    pub profile: &'static EnneagramProfile,
}

/// Aggregate team compatibility over the resolved people.
#[derive(Debug, Clone, Serialize)]
pub struct TeamCompatibility {
    /// 0–100; 50 when no pair was scoreable.
    pub score: u8,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Personality layer of the enriched context.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonalityInsights {
    /// Keyed by person id, insertion order = resolution order.
    pub profiles: IndexMap<Uuid, PersonInsight>,
    pub team_compatibility: Option<TeamCompatibility>,
}

/// The intent-specific bundle assembled for one query and discarded after
/// prompt rendering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrichedContext {
    pub people: Vec<Person>,
    pub relationships: Vec<PersonRelationships>,
    pub documents: Vec<Document>,
    pub personality_insights: PersonalityInsights,
    pub departments: Vec<Department>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

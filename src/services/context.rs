//! Assembles the intent-specific context bundle for one question.
//!
//! Every stage is gated on the detector's data-need flags. There is no
//! error handling here on purpose: the directory layer has already
//! absorbed every store fault, so a failed sub-fetch just contributes
//! nothing to the bundle.

use crate::models::context::{
    EnrichedContext, PersonInsight, PersonRelationships, PersonalityInsights,
};
use crate::models::departments::Department;
use crate::models::documents::{Document, DocumentFilters};
use crate::models::intent::{IntentResult, PrimaryIntent};
use crate::models::people::Person;
use crate::enneagram;
use crate::services::directory::DirectoryService;
use crate::services::intent::detect_intent;
use indexmap::IndexMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct ContextBuilder {
    directory: Arc<DirectoryService>,
}

impl ContextBuilder {
    pub fn new(directory: Arc<DirectoryService>) -> Self {
        Self { directory }
    }

    /// Classify the question, fan out to the directory per data category,
    /// and assemble the enriched bundle.
    pub async fn build_context(&self, prompt: &str) -> EnrichedContext {
        let intent = detect_intent(prompt);
        let mut context = EnrichedContext::default();

        if intent.data_needs.needs_people_data {
            let (people, departments) = self.resolve_people(&intent).await;
            context.people = people;
            context.departments = departments;
        }

        if intent.data_needs.needs_relationship_data {
            context.relationships = self.resolve_relationships(&context.people).await;
        }

        if intent.data_needs.needs_document_data {
            context.documents = self.resolve_documents(&intent).await;
        }

        if intent.data_needs.needs_enneagram_data {
            context.personality_insights = self.resolve_insights(&context.people).await;
        }

        context.recommendations = self
            .generate_recommendations(&intent, &context)
            .await;
        context.summary = compose_summary(&context);

        context
    }

    /// Union of per-entity lookups, deduplicated by id in first-seen
    /// order. Entries containing `@` are emails; everything else is a
    /// name fragment.
    async fn resolve_people(&self, intent: &IntentResult) -> (Vec<Person>, Vec<Department>) {
        let mut people: IndexMap<Uuid, Person> = IndexMap::new();
        let mut departments: IndexMap<Uuid, Department> = IndexMap::new();

        for entry in &intent.entities.people {
            let resolved = if entry.contains('@') {
                self.directory.employee_by_email(entry).await
            } else {
                self.directory.employee_by_name(entry).await
            };
            if let Some(person) = resolved {
                people.entry(person.id).or_insert(person);
            }
        }

        for fragment in &intent.entities.departments {
            if let Some(department) = self.directory.department_by_name(fragment).await {
                for person in self.directory.employees_by_department(&department.name).await {
                    people.entry(person.id).or_insert(person);
                }
                departments.entry(department.id).or_insert(department);
            }
        }

        for skill in &intent.entities.skills {
            for person in self.directory.employees_with_skill(skill).await {
                people.entry(person.id).or_insert(person);
            }
        }

        for location in &intent.entities.locations {
            for person in self.directory.employees_by_location(location).await {
                people.entry(person.id).or_insert(person);
            }
        }

        (
            people.into_values().collect(),
            departments.into_values().collect(),
        )
    }

    async fn resolve_relationships(&self, people: &[Person]) -> Vec<PersonRelationships> {
        let mut relationships = Vec::with_capacity(people.len());
        for person in people {
            let manager = self.directory.manager_for(person.id).await;
            let direct_reports = self.directory.direct_reports(person.id).await;
            relationships.push(PersonRelationships {
                person: person.clone(),
                manager,
                direct_reports,
            });
        }
        relationships
    }

    /// One search per extracted document type, plus fixed supplementary
    /// searches for conflict and delegation questions. The supplements
    /// are intent-driven on purpose: those conversations benefit from the
    /// playbook documents even when nobody asked for them by name.
    async fn resolve_documents(&self, intent: &IntentResult) -> Vec<Document> {
        let mut terms: Vec<String> = intent.entities.document_types.clone();
        match intent.primary_intent {
            PrimaryIntent::ConflictResolution => {
                terms.push("conflict resolution".to_string());
                terms.push("communication".to_string());
            }
            PrimaryIntent::Delegation => {
                terms.push("delegation".to_string());
            }
            _ => {}
        }

        let mut documents: IndexMap<Uuid, Document> = IndexMap::new();
        let filters = DocumentFilters::default();
        for term in &terms {
            for document in self.directory.search_documents(term, &filters).await {
                documents.entry(document.id).or_insert(document);
            }
        }
        documents.into_values().collect()
    }

    /// Profile per typed person; team compatibility only when more than
    /// one person resolved, computed across ALL of them.
    async fn resolve_insights(&self, people: &[Person]) -> PersonalityInsights {
        let mut insights = PersonalityInsights::default();

        for person in people {
            if let Some(kind) = person.enneagram() {
                insights.profiles.insert(
                    person.id,
                    PersonInsight {
                        person: person.clone(),
                        profile: enneagram::profile_for(kind),
                    },
                );
            }
        }

        if people.len() > 1 {
            let ids: Vec<Uuid> = people.iter().map(|p| p.id).collect();
            insights.team_compatibility =
                Some(self.directory.analyze_team_compatibility(&ids).await);
        }

        insights
    }

    async fn generate_recommendations(
        &self,
        intent: &IntentResult,
        context: &EnrichedContext,
    ) -> Vec<String> {
        match intent.primary_intent {
            PrimaryIntent::TeamComposition => team_composition_recommendations(context),
            PrimaryIntent::ConflictResolution => conflict_recommendations(context),
            PrimaryIntent::Delegation => self.delegation_recommendations(context).await,
            PrimaryIntent::DepartmentOverview => department_recommendations(context),
            _ => Vec::new(),
        }
    }

    async fn delegation_recommendations(&self, context: &EnrichedContext) -> Vec<String> {
        let mut recommendations = Vec::new();
        let Some(subject) = context.people.first() else {
            return recommendations;
        };

        let reports = match context
            .relationships
            .iter()
            .find(|r| r.person.id == subject.id)
        {
            Some(entry) => entry.direct_reports.clone(),
            None => self.directory.direct_reports(subject.id).await,
        };

        if reports.is_empty() {
            recommendations.push(format!(
                "{} has no direct reports on record; delegation would cross team lines",
                subject.name
            ));
            return recommendations;
        }

        for report in &reports {
            if report.responsibilities.is_empty() {
                recommendations.push(format!(
                    "{} has capacity to take on delegated work",
                    report.name
                ));
            } else {
                recommendations.push(format!(
                    "{} could take over work involving {}",
                    report.name,
                    report.responsibilities.join(", ")
                ));
            }
        }

        recommendations
    }
}

fn team_composition_recommendations(context: &EnrichedContext) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(compatibility) = &context.personality_insights.team_compatibility {
        recommendations.push(format!(
            "Projected team compatibility: {}%",
            compatibility.score
        ));
        recommendations.extend(compatibility.recommendations.iter().cloned());
    }

    for insight in context.personality_insights.profiles.values() {
        if let Some(strength) = insight.profile.strengths.first() {
            recommendations.push(format!(
                "{} ({}): {}",
                insight.person.name,
                insight.profile.display_name,
                strength.to_lowercase()
            ));
        }
    }

    recommendations
}

/// Conflict guidance is computed from the FIRST TWO resolved people only;
/// any further matches are ignored for this purpose.
fn conflict_recommendations(context: &EnrichedContext) -> Vec<String> {
    let mut recommendations = Vec::new();
    if context.people.len() < 2 {
        return recommendations;
    }

    let first = &context.people[0];
    let second = &context.people[1];

    for person in [first, second] {
        if let Some(kind) = person.enneagram() {
            let profile = enneagram::profile_for(kind);
            recommendations.push(format!(
                "When talking to {}: {}",
                person.name, profile.communication
            ));
        }
    }

    if let (Some(kind_a), Some(kind_b)) = (first.enneagram(), second.enneagram()) {
        use crate::enneagram::PairAffinity;
        match enneagram::profile_for(kind_a).affinity_with(kind_b) {
            PairAffinity::Conflicting => recommendations.push(format!(
                "Expect friction between {} and {}; agree on decision rules up front",
                first.name, second.name
            )),
            _ => recommendations.push(format!(
                "{} and {} differ in style more than substance; start from the shared goal",
                first.name, second.name
            )),
        }
    }

    recommendations
}

fn department_recommendations(context: &EnrichedContext) -> Vec<String> {
    context
        .departments
        .iter()
        .map(|department| {
            let members = context
                .people
                .iter()
                .filter(|p| p.department_id == Some(department.id))
                .count();
            format!(
                "Review the {} roster: {} people matched this query",
                department.name, members
            )
        })
        .collect()
}

fn compose_summary(context: &EnrichedContext) -> String {
    let mut fragments = Vec::new();

    if !context.people.is_empty() {
        fragments.push(format!("Found {} relevant people", context.people.len()));
    }
    if !context.documents.is_empty() {
        fragments.push(format!(
            "Found {} relevant documents",
            context.documents.len()
        ));
    }
    if let Some(compatibility) = &context.personality_insights.team_compatibility {
        fragments.push(format!("Team compatibility: {}%", compatibility.score));
    }
    if !context.relationships.is_empty() {
        fragments.push(format!(
            "Mapped {} reporting relationships",
            context.relationships.len()
        ));
    }

    fragments.join(" | ")
}

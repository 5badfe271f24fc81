//! Directory lookups with uniform degrade-to-empty semantics.
//!
//! Every lookup catches its own store faults, logs them, and returns an
//! absent/empty value instead. Callers above this layer never see a
//! directory error; the only write path (`update_person`) is the
//! exception and propagates.

use crate::cache::{Cache, CacheOptions};
use crate::enneagram::{self, PairAffinity};
use crate::error::Result;
use crate::models::context::TeamCompatibility;
use crate::models::departments::Department;
use crate::models::documents::{Document, DocumentFilters};
use crate::models::people::{Person, UpdatePerson};
use crate::models::prompts::PersonPromptData;
use crate::models::relationships::ReportingRelationship;
use crate::models::settings::AssistantSettings;
use crate::store::DirectoryStore;
use indexmap::IndexSet;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use uuid::Uuid;

/// Resolves people, departments, reporting edges and documents for one
/// organization, with TTL-cached org-wide reads.
pub struct DirectoryService {
    store: Arc<dyn DirectoryStore>,
    organization_id: Uuid,
    cache_ttl_seconds: u64,
    roster_cache: Cache<Vec<Person>>,
    department_cache: Cache<Vec<Department>>,
    relationship_cache: Cache<Vec<ReportingRelationship>>,
}

impl DirectoryService {
    /// Create a service scoped to one organization. The TTL is injected so
    /// tests can pin cache behavior; production wires it from config.
    pub fn new(store: Arc<dyn DirectoryStore>, organization_id: Uuid, cache_ttl_seconds: u64) -> Self {
        Self {
            store,
            organization_id,
            cache_ttl_seconds,
            roster_cache: Cache::new_local(CacheOptions::default()),
            department_cache: Cache::new_local(CacheOptions::default()),
            relationship_cache: Cache::new_local(CacheOptions::default()),
        }
    }

    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    fn cache_key(&self) -> String {
        self.organization_id.to_string()
    }

    /// First person whose name contains the fragment, in store order.
    /// First-match, not best-match: with several hits the caller gets
    /// whichever row sorts first.
    pub async fn employee_by_name(&self, fragment: &str) -> Option<Person> {
        match self
            .store
            .people_by_name_fragment(self.organization_id, fragment)
            .await
        {
            Ok(people) => people.into_iter().next(),
            Err(e) => {
                tracing::warn!(error = %e, fragment, "name lookup failed, treating as no match");
                None
            }
        }
    }

    /// Exact email match.
    pub async fn employee_by_email(&self, email: &str) -> Option<Person> {
        match self.store.person_by_email(self.organization_id, email).await {
            Ok(person) => person,
            Err(e) => {
                tracing::warn!(error = %e, email, "email lookup failed, treating as no match");
                None
            }
        }
    }

    pub async fn person_by_id(&self, id: Uuid) -> Option<Person> {
        match self.store.person_by_id(id).await {
            Ok(person) => person,
            Err(e) => {
                tracing::warn!(error = %e, person_id = %id, "person lookup failed");
                None
            }
        }
    }

    /// Fuzzy department resolution; first name-ordered match wins.
    pub async fn department_by_name(&self, fragment: &str) -> Option<Department> {
        match self
            .store
            .department_by_name(self.organization_id, fragment)
            .await
        {
            Ok(department) => department,
            Err(e) => {
                tracing::warn!(error = %e, fragment, "department lookup failed");
                None
            }
        }
    }

    /// Members of the department matching the fragment, name-sorted.
    /// An unresolved department short-circuits to an empty roster.
    pub async fn employees_by_department(&self, fragment: &str) -> Vec<Person> {
        let Some(department) = self.department_by_name(fragment).await else {
            return Vec::new();
        };

        match self.store.people_by_department(department.id).await {
            Ok(people) => people,
            Err(e) => {
                tracing::warn!(error = %e, department = %department.name, "member lookup failed");
                Vec::new()
            }
        }
    }

    pub async fn employees_by_location(&self, fragment: &str) -> Vec<Person> {
        match self
            .store
            .people_by_location(self.organization_id, fragment)
            .await
        {
            Ok(people) => people,
            Err(e) => {
                tracing::warn!(error = %e, fragment, "location lookup failed");
                Vec::new()
            }
        }
    }

    /// People holding the skill.
    ///
    /// Primary path is the exact responsibilities containment query. The
    /// broader bio/role scan fires ONLY when that query errors; a clean
    /// empty result is an answer, not a reason to widen the search.
    pub async fn employees_with_skill(&self, skill: &str) -> Vec<Person> {
        match self
            .store
            .people_with_responsibility(self.organization_id, skill)
            .await
        {
            Ok(people) => people,
            Err(e) => {
                tracing::warn!(error = %e, skill, "skill query failed, falling back to text scan");
                match self.store.people_text_scan(self.organization_id, skill).await {
                    Ok(people) => people,
                    Err(e) => {
                        tracing::warn!(error = %e, skill, "fallback text scan failed");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// The person's manager, if any edge exists.
    ///
    /// The store may hold several manager edges for one report; the first
    /// one wins and the inconsistency is logged.
    pub async fn manager_for(&self, person_id: Uuid) -> Option<Person> {
        let edges = match self.store.relationships_for_report(person_id).await {
            Ok(edges) => edges,
            Err(e) => {
                tracing::warn!(error = %e, person_id = %person_id, "manager edge lookup failed");
                return None;
            }
        };

        if edges.len() > 1 {
            tracing::warn!(
                person_id = %person_id,
                edge_count = edges.len(),
                "person has multiple manager edges, picking the first"
            );
        }

        let edge = edges.into_iter().next()?;
        self.person_by_id(edge.manager_id).await
    }

    pub async fn direct_reports(&self, person_id: Uuid) -> Vec<Person> {
        let edges = match self.store.relationships_for_manager(person_id).await {
            Ok(edges) => edges,
            Err(e) => {
                tracing::warn!(error = %e, person_id = %person_id, "report edge lookup failed");
                return Vec::new();
            }
        };

        let mut reports = Vec::with_capacity(edges.len());
        for edge in edges {
            if let Some(person) = self.person_by_id(edge.report_id).await {
                reports.push(person);
            }
        }
        reports
    }

    /// Everyone transitively below the manager, breadth-first. The visited
    /// set guards against reporting cycles, which the schema does not
    /// prevent.
    pub async fn team_hierarchy(&self, manager_id: Uuid) -> Vec<Person> {
        let mut visited: HashSet<Uuid> = HashSet::from([manager_id]);
        let mut queue: VecDeque<Uuid> = VecDeque::from([manager_id]);
        let mut team = Vec::new();

        while let Some(current) = queue.pop_front() {
            for person in self.direct_reports(current).await {
                if visited.insert(person.id) {
                    queue.push_back(person.id);
                    team.push(person);
                }
            }
        }

        team
    }

    /// Managers upward from the person, nearest first.
    ///
    /// Carries the same visited-set guard as `team_hierarchy`; the legacy
    /// behavior guarded only the downward walk, and that asymmetry was an
    /// open risk rather than a feature.
    pub async fn delegation_chain(&self, person_id: Uuid) -> Vec<Person> {
        let mut visited: HashSet<Uuid> = HashSet::from([person_id]);
        let mut chain = Vec::new();
        let mut current = person_id;

        while let Some(manager) = self.manager_for(current).await {
            if !visited.insert(manager.id) {
                tracing::warn!(person_id = %manager.id, "reporting cycle detected, stopping walk");
                break;
            }
            current = manager.id;
            chain.push(manager);
        }

        chain
    }

    /// Score how well a set of people is likely to work together.
    ///
    /// Every unordered pair with both personality codes present is
    /// classified from the FIRST member's profile only (the lists are
    /// asymmetric on purpose): compatible +1, conflicting -0.5, neutral
    /// +0.5. The sum normalizes to 0-100; no scoreable pair means 50.
    pub async fn analyze_team_compatibility(&self, person_ids: &[Uuid]) -> TeamCompatibility {
        let mut people = Vec::with_capacity(person_ids.len());
        for id in person_ids {
            if let Some(person) = self.person_by_id(*id).await {
                people.push(person);
            }
        }

        let mut sum = 0.0_f64;
        let mut pair_count = 0usize;
        let mut strengths: IndexSet<String> = IndexSet::new();
        let mut challenges: IndexSet<String> = IndexSet::new();
        let mut recommendations: IndexSet<String> = IndexSet::new();

        for i in 0..people.len() {
            for j in (i + 1)..people.len() {
                let (a, b) = (&people[i], &people[j]);
                let (Some(kind_a), Some(kind_b)) = (a.enneagram(), b.enneagram()) else {
                    continue;
                };

                let profile_a = enneagram::profile_for(kind_a);
                let profile_b = enneagram::profile_for(kind_b);
                pair_count += 1;

                match profile_a.affinity_with(kind_b) {
                    PairAffinity::Compatible => {
                        sum += 1.0;
                        strengths.insert(format!(
                            "{} ({}) and {} ({}) complement each other well",
                            a.name, profile_a.display_name, b.name, profile_b.display_name
                        ));
                        recommendations.insert(format!(
                            "Put {} and {} on shared deliverables",
                            a.name, b.name
                        ));
                    }
                    PairAffinity::Conflicting => {
                        sum -= 0.5;
                        challenges.insert(format!(
                            "{} ({}) and {} ({}) may pull in different directions",
                            a.name, profile_a.display_name, b.name, profile_b.display_name
                        ));
                        recommendations.insert(format!(
                            "Agree on working norms between {} and {} early",
                            a.name, b.name
                        ));
                    }
                    PairAffinity::Neutral => {
                        sum += 0.5;
                    }
                }
            }
        }

        let score = if pair_count == 0 {
            50
        } else {
            (((sum / pair_count as f64) + 1.0) / 2.0 * 100.0).round() as u8
        };

        TeamCompatibility {
            score,
            strengths: strengths.into_iter().collect(),
            challenges: challenges.into_iter().collect(),
            recommendations: recommendations.into_iter().collect(),
        }
    }

    /// Keyword document search, newest first.
    pub async fn search_documents(&self, query: &str, filters: &DocumentFilters) -> Vec<Document> {
        match self
            .store
            .search_documents(self.organization_id, query, filters)
            .await
        {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!(error = %e, query, "document search failed");
                Vec::new()
            }
        }
    }

    /// Full roster, read through the org cache.
    pub async fn roster(&self) -> Vec<Person> {
        let key = self.cache_key();
        if let Some(people) = self.roster_cache.get(&key).await {
            return people;
        }

        match self.store.list_people(self.organization_id).await {
            Ok(people) => {
                self.roster_cache
                    .set_ex(&key, people.clone(), self.cache_ttl_seconds)
                    .await;
                people
            }
            Err(e) => {
                tracing::warn!(error = %e, "roster fetch failed");
                Vec::new()
            }
        }
    }

    /// All departments, read through the org cache.
    pub async fn departments(&self) -> Vec<Department> {
        let key = self.cache_key();
        if let Some(departments) = self.department_cache.get(&key).await {
            return departments;
        }

        match self.store.list_departments(self.organization_id).await {
            Ok(departments) => {
                self.department_cache
                    .set_ex(&key, departments.clone(), self.cache_ttl_seconds)
                    .await;
                departments
            }
            Err(e) => {
                tracing::warn!(error = %e, "department fetch failed");
                Vec::new()
            }
        }
    }

    /// All reporting edges, read through the org cache.
    pub async fn relationships(&self) -> Vec<ReportingRelationship> {
        let key = self.cache_key();
        if let Some(edges) = self.relationship_cache.get(&key).await {
            return edges;
        }

        match self.store.list_relationships(self.organization_id).await {
            Ok(edges) => {
                self.relationship_cache
                    .set_ex(&key, edges.clone(), self.cache_ttl_seconds)
                    .await;
                edges
            }
            Err(e) => {
                tracing::warn!(error = %e, "relationship fetch failed");
                Vec::new()
            }
        }
    }

    /// Drop every cached org-wide read. Writes call this wholesale; there
    /// is no partial invalidation.
    pub async fn invalidate_caches(&self) {
        self.roster_cache.clear().await;
        self.department_cache.clear().await;
        self.relationship_cache.clear().await;
    }

    /// Apply a patch to a person. Unlike lookups, a failed write surfaces
    /// to the caller; on success the org caches are cleared wholesale.
    pub async fn update_person(&self, id: Uuid, patch: UpdatePerson) -> Result<Person> {
        let person = self.store.update_person(id, patch).await?;
        self.invalidate_caches().await;
        Ok(person)
    }

    /// Resolved assistant settings for a person: stored overrides folded
    /// over the defaults. A missing row or a failed read both mean plain
    /// defaults.
    pub async fn assistant_settings(&self, person_id: Uuid) -> AssistantSettings {
        let patch = match self.store.settings_for_person(person_id).await {
            Ok(patch) => patch,
            Err(e) => {
                tracing::warn!(error = %e, person_id = %person_id, "settings fetch failed");
                None
            }
        };

        match patch {
            Some(patch) => AssistantSettings::default().merged(patch),
            None => AssistantSettings::default(),
        }
    }

    /// Everything the per-person prompt needs, in one pass. `None` only
    /// when the person themselves cannot be resolved.
    pub async fn person_prompt_data(&self, person_id: Uuid) -> Option<PersonPromptData> {
        let person = self.person_by_id(person_id).await?;

        let department_name = match person.department_id {
            Some(department_id) => match self.store.department_by_id(department_id).await {
                Ok(department) => department.map(|d| d.name),
                Err(e) => {
                    tracing::warn!(error = %e, person_id = %person_id, "department fetch failed");
                    None
                }
            },
            None => None,
        };

        let teammates = match person.department_id {
            Some(department_id) => match self.store.people_by_department(department_id).await {
                Ok(people) => people.into_iter().filter(|p| p.id != person.id).collect(),
                Err(e) => {
                    tracing::warn!(error = %e, person_id = %person_id, "teammate fetch failed");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let active_tasks = match self.store.active_tasks_for_person(person.id).await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(error = %e, person_id = %person_id, "task fetch failed");
                Vec::new()
            }
        };

        let direct_reports = self.direct_reports(person.id).await;

        let calendar_connected = match self.store.calendar_connected(person.id).await {
            Ok(connected) => connected,
            Err(e) => {
                tracing::warn!(error = %e, person_id = %person_id, "calendar flag fetch failed");
                false
            }
        };

        Some(PersonPromptData {
            person,
            department_name,
            active_tasks,
            teammates,
            direct_reports,
            calendar_connected,
        })
    }
}

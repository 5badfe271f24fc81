//! Shared test fixtures: an in-memory `DirectoryStore` with fault
//! injection and call counting, plus record builders.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use orgpulse::error::{Error, Result};
use orgpulse::models::departments::Department;
use orgpulse::models::documents::{Document, DocumentFilters};
use orgpulse::models::people::{Person, UpdatePerson};
use orgpulse::models::relationships::ReportingRelationship;
use orgpulse::models::settings::SettingsPatch;
use orgpulse::models::tasks::Task;
use orgpulse::store::DirectoryStore;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

/// The one organization all fixtures belong to.
pub fn org_id() -> Uuid {
    Uuid::from_u128(0x0d9f_1c2a_7b3e_4d5f)
}

pub fn person(name: &str, personality_type: Option<&str>) -> Person {
    let slug = name.to_lowercase().replace(' ', ".");
    Person {
        id: Uuid::new_v4(),
        name: name.to_string(),
        role: "Specialist".to_string(),
        department_id: None,
        email: format!("{}@example.com", slug),
        phone: None,
        location: None,
        timezone: None,
        bio: None,
        image_url: None,
        responsibilities: Vec::new(),
        personality_type: personality_type.map(str::to_string),
        organization_id: org_id(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn department(name: &str) -> Department {
    Department {
        id: Uuid::new_v4(),
        organization_id: org_id(),
        name: name.to_string(),
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn edge(manager: &Person, report: &Person) -> ReportingRelationship {
    ReportingRelationship {
        id: Uuid::new_v4(),
        organization_id: org_id(),
        manager_id: manager.id,
        report_id: report.id,
        created_at: Utc::now(),
    }
}

/// `age_minutes` pushes the document into the past so newest-first
/// ordering is observable.
pub fn document(owner: &Person, title: &str, file_type: &str, age_minutes: i64) -> Document {
    Document {
        id: Uuid::new_v4(),
        organization_id: org_id(),
        person_id: owner.id,
        title: title.to_string(),
        description: None,
        file_type: file_type.to_string(),
        is_public: true,
        tags: Vec::new(),
        created_at: Utc::now() - Duration::minutes(age_minutes),
    }
}

pub fn task(owner: &Person, title: &str, status: &str) -> Task {
    Task {
        id: Uuid::new_v4(),
        person_id: owner.id,
        title: title.to_string(),
        description: None,
        status: status.to_string(),
        due_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// In-memory store. Reads mirror the Postgres implementation's ordering
/// (name-sorted people, newest-first documents); the `fail_*` flags turn
/// individual queries into store faults so the degrade paths can be
/// exercised.
#[derive(Default)]
pub struct MemoryStore {
    people: Mutex<Vec<Person>>,
    departments: Vec<Department>,
    relationships: Vec<ReportingRelationship>,
    documents: Vec<Document>,
    tasks: Vec<Task>,
    settings: Vec<SettingsPatch>,
    calendar_connected_ids: Vec<Uuid>,

    fail_skill_query: AtomicBool,
    fail_text_scan: AtomicBool,
    list_people_calls: AtomicUsize,
    text_scan_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_people(self, people: Vec<Person>) -> Self {
        *self.people.lock().unwrap() = people;
        self
    }

    pub fn with_departments(mut self, departments: Vec<Department>) -> Self {
        self.departments = departments;
        self
    }

    pub fn with_relationships(mut self, relationships: Vec<ReportingRelationship>) -> Self {
        self.relationships = relationships;
        self
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_settings(mut self, settings: Vec<SettingsPatch>) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_calendar_connected(mut self, ids: Vec<Uuid>) -> Self {
        self.calendar_connected_ids = ids;
        self
    }

    pub fn failing_skill_query(self) -> Self {
        self.fail_skill_query.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_text_scan(self) -> Self {
        self.fail_text_scan.store(true, Ordering::SeqCst);
        self
    }

    pub fn list_people_calls(&self) -> usize {
        self.list_people_calls.load(Ordering::SeqCst)
    }

    pub fn text_scan_calls(&self) -> usize {
        self.text_scan_calls.load(Ordering::SeqCst)
    }

    fn sorted_people<F>(&self, filter: F) -> Vec<Person>
    where
        F: Fn(&Person) -> bool,
    {
        let mut people: Vec<Person> = self
            .people
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter(p))
            .cloned()
            .collect();
        people.sort_by(|a, b| a.name.cmp(&b.name));
        people
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn person_by_id(&self, id: Uuid) -> Result<Option<Person>> {
        Ok(self.people.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn person_by_email(&self, organization_id: Uuid, email: &str) -> Result<Option<Person>> {
        Ok(self
            .people
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.organization_id == organization_id && p.email == email)
            .cloned())
    }

    async fn people_by_name_fragment(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Person>> {
        let needle = fragment.to_lowercase();
        Ok(self.sorted_people(|p| {
            p.organization_id == organization_id && p.name.to_lowercase().contains(&needle)
        }))
    }

    async fn people_by_department(&self, department_id: Uuid) -> Result<Vec<Person>> {
        Ok(self.sorted_people(|p| p.department_id == Some(department_id)))
    }

    async fn people_by_location(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Person>> {
        let needle = fragment.to_lowercase();
        Ok(self.sorted_people(|p| {
            p.organization_id == organization_id
                && p.location
                    .as_deref()
                    .is_some_and(|l| l.to_lowercase().contains(&needle))
        }))
    }

    async fn people_with_responsibility(
        &self,
        organization_id: Uuid,
        skill: &str,
    ) -> Result<Vec<Person>> {
        if self.fail_skill_query.load(Ordering::SeqCst) {
            return Err(Error::Internal("injected skill query failure".to_string()));
        }
        Ok(self.sorted_people(|p| {
            p.organization_id == organization_id
                && p.responsibilities.iter().any(|r| r == skill)
        }))
    }

    async fn people_text_scan(&self, organization_id: Uuid, term: &str) -> Result<Vec<Person>> {
        self.text_scan_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_text_scan.load(Ordering::SeqCst) {
            return Err(Error::Internal("injected text scan failure".to_string()));
        }
        let needle = term.to_lowercase();
        Ok(self.sorted_people(|p| {
            p.organization_id == organization_id
                && (p.bio.as_deref().is_some_and(|b| b.to_lowercase().contains(&needle))
                    || p.role.to_lowercase().contains(&needle))
        }))
    }

    async fn list_people(&self, organization_id: Uuid) -> Result<Vec<Person>> {
        self.list_people_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.sorted_people(|p| p.organization_id == organization_id))
    }

    async fn update_person(&self, id: Uuid, patch: UpdatePerson) -> Result<Person> {
        let mut people = self.people.lock().unwrap();
        let person = people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("Person with ID {} not found", id)))?;

        if let Some(name) = patch.name {
            person.name = name;
        }
        if let Some(role) = patch.role {
            person.role = role;
        }
        if let Some(department_id) = patch.department_id {
            person.department_id = Some(department_id);
        }
        if let Some(email) = patch.email {
            person.email = email;
        }
        if let Some(location) = patch.location {
            person.location = Some(location);
        }
        if let Some(bio) = patch.bio {
            person.bio = Some(bio);
        }
        if let Some(responsibilities) = patch.responsibilities {
            person.responsibilities = responsibilities;
        }
        if let Some(personality_type) = patch.personality_type {
            person.personality_type = Some(personality_type);
        }
        person.updated_at = Utc::now();

        Ok(person.clone())
    }

    async fn department_by_id(&self, id: Uuid) -> Result<Option<Department>> {
        Ok(self.departments.iter().find(|d| d.id == id).cloned())
    }

    async fn department_by_name(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Option<Department>> {
        let needle = fragment.to_lowercase();
        let mut matches: Vec<&Department> = self
            .departments
            .iter()
            .filter(|d| {
                d.organization_id == organization_id && d.name.to_lowercase().contains(&needle)
            })
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches.first().map(|d| (*d).clone()))
    }

    async fn list_departments(&self, organization_id: Uuid) -> Result<Vec<Department>> {
        let mut departments: Vec<Department> = self
            .departments
            .iter()
            .filter(|d| d.organization_id == organization_id)
            .cloned()
            .collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    async fn relationships_for_report(
        &self,
        report_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>> {
        Ok(self
            .relationships
            .iter()
            .filter(|r| r.report_id == report_id)
            .cloned()
            .collect())
    }

    async fn relationships_for_manager(
        &self,
        manager_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>> {
        Ok(self
            .relationships
            .iter()
            .filter(|r| r.manager_id == manager_id)
            .cloned()
            .collect())
    }

    async fn list_relationships(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>> {
        Ok(self
            .relationships
            .iter()
            .filter(|r| r.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn search_documents(
        &self,
        organization_id: Uuid,
        query: &str,
        filters: &DocumentFilters,
    ) -> Result<Vec<Document>> {
        let needle = query.to_lowercase();
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| d.organization_id == organization_id)
            .filter(|d| {
                d.title.to_lowercase().contains(&needle)
                    || d.description
                        .as_deref()
                        .is_some_and(|desc| desc.to_lowercase().contains(&needle))
            })
            .filter(|d| {
                filters
                    .file_type
                    .as_deref()
                    .is_none_or(|ft| d.file_type == ft)
            })
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    async fn active_tasks_for_person(&self, person_id: Uuid) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.person_id == person_id && t.status != "done")
            .cloned()
            .collect())
    }

    async fn settings_for_person(&self, person_id: Uuid) -> Result<Option<SettingsPatch>> {
        Ok(self
            .settings
            .iter()
            .find(|s| s.person_id == person_id)
            .cloned())
    }

    async fn calendar_connected(&self, person_id: Uuid) -> Result<bool> {
        Ok(self.calendar_connected_ids.contains(&person_id))
    }
}

//! The relational-store collaborator boundary.
//!
//! [`DirectoryStore`] models the query surface this core consumes. The
//! production implementation is [`PgStore`] over the sqlx pool; tests
//! substitute an in-memory implementation so store faults can be injected
//! without a database.

use crate::models::departments::Department;
use crate::models::documents::{Document, DocumentFilters};
use crate::models::people::{Person, UpdatePerson};
use crate::models::relationships::ReportingRelationship;
use crate::models::settings::SettingsPatch;
use crate::models::tasks::Task;
use crate::{DbPool, error::Result, queries};
use async_trait::async_trait;
use uuid::Uuid;

/// The query operations the directory core needs from the backing store.
///
/// Every method propagates store faults; the degrade-to-empty policy lives
/// one layer up in the directory service, not here.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn person_by_id(&self, id: Uuid) -> Result<Option<Person>>;
    async fn person_by_email(&self, organization_id: Uuid, email: &str)
    -> Result<Option<Person>>;
    async fn people_by_name_fragment(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Person>>;
    async fn people_by_department(&self, department_id: Uuid) -> Result<Vec<Person>>;
    async fn people_by_location(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Person>>;
    async fn people_with_responsibility(
        &self,
        organization_id: Uuid,
        skill: &str,
    ) -> Result<Vec<Person>>;
    async fn people_text_scan(&self, organization_id: Uuid, term: &str) -> Result<Vec<Person>>;
    async fn list_people(&self, organization_id: Uuid) -> Result<Vec<Person>>;
    async fn update_person(&self, id: Uuid, patch: UpdatePerson) -> Result<Person>;

    async fn department_by_id(&self, id: Uuid) -> Result<Option<Department>>;
    async fn department_by_name(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Option<Department>>;
    async fn list_departments(&self, organization_id: Uuid) -> Result<Vec<Department>>;

    async fn relationships_for_report(
        &self,
        report_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>>;
    async fn relationships_for_manager(
        &self,
        manager_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>>;
    async fn list_relationships(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>>;

    async fn search_documents(
        &self,
        organization_id: Uuid,
        query: &str,
        filters: &DocumentFilters,
    ) -> Result<Vec<Document>>;

    async fn active_tasks_for_person(&self, person_id: Uuid) -> Result<Vec<Task>>;
    async fn settings_for_person(&self, person_id: Uuid) -> Result<Option<SettingsPatch>>;
    async fn calendar_connected(&self, person_id: Uuid) -> Result<bool>;
}

/// Postgres-backed store over the connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryStore for PgStore {
    async fn person_by_id(&self, id: Uuid) -> Result<Option<Person>> {
        let mut conn = self.pool.acquire().await?;
        queries::people::person_by_id(conn.as_mut(), id).await
    }

    async fn person_by_email(
        &self,
        organization_id: Uuid,
        email: &str,
    ) -> Result<Option<Person>> {
        let mut conn = self.pool.acquire().await?;
        queries::people::person_by_email(conn.as_mut(), organization_id, email).await
    }

    async fn people_by_name_fragment(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        queries::people::people_by_name_fragment(conn.as_mut(), organization_id, fragment).await
    }

    async fn people_by_department(&self, department_id: Uuid) -> Result<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        queries::people::people_by_department(conn.as_mut(), department_id).await
    }

    async fn people_by_location(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        queries::people::people_by_location(conn.as_mut(), organization_id, fragment).await
    }

    async fn people_with_responsibility(
        &self,
        organization_id: Uuid,
        skill: &str,
    ) -> Result<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        queries::people::people_with_responsibility(conn.as_mut(), organization_id, skill).await
    }

    async fn people_text_scan(&self, organization_id: Uuid, term: &str) -> Result<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        queries::people::people_text_scan(conn.as_mut(), organization_id, term).await
    }

    async fn list_people(&self, organization_id: Uuid) -> Result<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        queries::people::list_people(conn.as_mut(), organization_id).await
    }

    async fn update_person(&self, id: Uuid, patch: UpdatePerson) -> Result<Person> {
        let mut conn = self.pool.acquire().await?;
        queries::people::update_person(conn.as_mut(), id, patch).await
    }

    async fn department_by_id(&self, id: Uuid) -> Result<Option<Department>> {
        let mut conn = self.pool.acquire().await?;
        queries::departments::department_by_id(conn.as_mut(), id).await
    }

    async fn department_by_name(
        &self,
        organization_id: Uuid,
        fragment: &str,
    ) -> Result<Option<Department>> {
        let mut conn = self.pool.acquire().await?;
        queries::departments::department_by_name(conn.as_mut(), organization_id, fragment).await
    }

    async fn list_departments(&self, organization_id: Uuid) -> Result<Vec<Department>> {
        let mut conn = self.pool.acquire().await?;
        queries::departments::list_departments(conn.as_mut(), organization_id).await
    }

    async fn relationships_for_report(
        &self,
        report_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>> {
        let mut conn = self.pool.acquire().await?;
        queries::relationships::relationships_for_report(conn.as_mut(), report_id).await
    }

    async fn relationships_for_manager(
        &self,
        manager_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>> {
        let mut conn = self.pool.acquire().await?;
        queries::relationships::relationships_for_manager(conn.as_mut(), manager_id).await
    }

    async fn list_relationships(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<ReportingRelationship>> {
        let mut conn = self.pool.acquire().await?;
        queries::relationships::list_relationships(conn.as_mut(), organization_id).await
    }

    async fn search_documents(
        &self,
        organization_id: Uuid,
        query: &str,
        filters: &DocumentFilters,
    ) -> Result<Vec<Document>> {
        let mut conn = self.pool.acquire().await?;
        queries::documents::search_documents(conn.as_mut(), organization_id, query, filters).await
    }

    async fn active_tasks_for_person(&self, person_id: Uuid) -> Result<Vec<Task>> {
        let mut conn = self.pool.acquire().await?;
        queries::tasks::active_tasks_for_person(conn.as_mut(), person_id).await
    }

    async fn settings_for_person(&self, person_id: Uuid) -> Result<Option<SettingsPatch>> {
        let mut conn = self.pool.acquire().await?;
        queries::settings::settings_for_person(conn.as_mut(), person_id).await
    }

    async fn calendar_connected(&self, person_id: Uuid) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        queries::settings::calendar_connected(conn.as_mut(), person_id).await
    }
}

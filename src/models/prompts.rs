use crate::models::people::Person;
use crate::models::tasks::Task;
use serde::Serialize;

/// Everything the per-person prompt template needs, fetched in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct PersonPromptData {
    pub person: Person,
    pub department_name: Option<String>,
    pub active_tasks: Vec<Task>,
    pub teammates: Vec<Person>,
    pub direct_reports: Vec<Person>,
    pub calendar_connected: bool,
}

use crate::models::tasks::Task;
use crate::{
    DbConn,
    error::{Error, Result},
};
use uuid::Uuid;

const TASK_COLUMNS: &str =
    "id, person_id, title, description, status, due_date, created_at, updated_at";

/// Lists a person's tasks that still need attention, soonest due first.
pub async fn active_tasks_for_person(conn: &mut DbConn, person_id: Uuid) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks \
         WHERE person_id = $1 AND status <> 'done' \
         ORDER BY due_date ASC NULLS LAST, created_at ASC"
    ))
    .bind(person_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(tasks)
}

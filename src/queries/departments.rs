use crate::models::departments::Department;
use crate::{
    DbConn,
    error::{Error, Result},
};
use uuid::Uuid;

const DEPARTMENT_COLUMNS: &str =
    "id, organization_id, name, description, created_at, updated_at";

/// Gets a single department by its ID. The department may not exist.
pub async fn department_by_id(conn: &mut DbConn, id: Uuid) -> Result<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(&format!(
        "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(department)
}

/// Resolves a department by fuzzy name match. First name-ordered row wins.
pub async fn department_by_name(
    conn: &mut DbConn,
    organization_id: Uuid,
    fragment: &str,
) -> Result<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(&format!(
        "SELECT {DEPARTMENT_COLUMNS} FROM departments \
         WHERE organization_id = $1 AND name ILIKE '%' || $2 || '%' \
         ORDER BY name ASC \
         LIMIT 1"
    ))
    .bind(organization_id)
    .bind(fragment)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(department)
}

/// Lists all departments in an organization, name-sorted.
pub async fn list_departments(
    conn: &mut DbConn,
    organization_id: Uuid,
) -> Result<Vec<Department>> {
    let departments = sqlx::query_as::<_, Department>(&format!(
        "SELECT {DEPARTMENT_COLUMNS} FROM departments \
         WHERE organization_id = $1 ORDER BY name ASC"
    ))
    .bind(organization_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(departments)
}

use crate::models::people::{Person, UpdatePerson};
use crate::{
    DbConn,
    error::{Error, Result},
};
use uuid::Uuid;

const PERSON_COLUMNS: &str = "id, name, role, department_id, email, phone, location, timezone, \
     bio, image_url, responsibilities, personality_type, organization_id, created_at, updated_at";

/// Gets a single person by their ID. The person may not exist.
pub async fn person_by_id(conn: &mut DbConn, id: Uuid) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(person)
}

/// Gets a single person by exact email address. The person may not exist.
pub async fn person_by_email(
    conn: &mut DbConn,
    organization_id: Uuid,
    email: &str,
) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people WHERE organization_id = $1 AND email = $2"
    ))
    .bind(organization_id)
    .bind(email)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(person)
}

/// Lists people whose name contains the fragment, case-insensitively,
/// name-sorted. Callers wanting a single match take the first row.
pub async fn people_by_name_fragment(
    conn: &mut DbConn,
    organization_id: Uuid,
    fragment: &str,
) -> Result<Vec<Person>> {
    let people = sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people \
         WHERE organization_id = $1 AND name ILIKE '%' || $2 || '%' \
         ORDER BY name ASC"
    ))
    .bind(organization_id)
    .bind(fragment)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(people)
}

/// Lists the members of a department, name-sorted.
pub async fn people_by_department(
    conn: &mut DbConn,
    department_id: Uuid,
) -> Result<Vec<Person>> {
    let people = sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people WHERE department_id = $1 ORDER BY name ASC"
    ))
    .bind(department_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(people)
}

/// Lists people whose location contains the fragment, case-insensitively.
pub async fn people_by_location(
    conn: &mut DbConn,
    organization_id: Uuid,
    fragment: &str,
) -> Result<Vec<Person>> {
    let people = sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people \
         WHERE organization_id = $1 AND location ILIKE '%' || $2 || '%' \
         ORDER BY name ASC"
    ))
    .bind(organization_id)
    .bind(fragment)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(people)
}

/// Lists people whose responsibilities contain the skill exactly.
pub async fn people_with_responsibility(
    conn: &mut DbConn,
    organization_id: Uuid,
    skill: &str,
) -> Result<Vec<Person>> {
    let people = sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people \
         WHERE organization_id = $1 AND responsibilities @> ARRAY[$2]::text[] \
         ORDER BY name ASC"
    ))
    .bind(organization_id)
    .bind(skill)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(people)
}

/// Broader scan over bio and role text. Only used as the degraded path
/// when the exact responsibilities query fails.
pub async fn people_text_scan(
    conn: &mut DbConn,
    organization_id: Uuid,
    term: &str,
) -> Result<Vec<Person>> {
    let people = sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people \
         WHERE organization_id = $1 \
           AND (bio ILIKE '%' || $2 || '%' OR role ILIKE '%' || $2 || '%') \
         ORDER BY name ASC"
    ))
    .bind(organization_id)
    .bind(term)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(people)
}

/// Lists the full roster of an organization, name-sorted.
pub async fn list_people(conn: &mut DbConn, organization_id: Uuid) -> Result<Vec<Person>> {
    let people = sqlx::query_as::<_, Person>(&format!(
        "SELECT {PERSON_COLUMNS} FROM people WHERE organization_id = $1 ORDER BY name ASC"
    ))
    .bind(organization_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(people)
}

/// Applies a patch to an existing person. Absent patch fields keep their
/// current values.
pub async fn update_person(
    conn: &mut DbConn,
    id: Uuid,
    patch: UpdatePerson,
) -> Result<Person> {
    let person = sqlx::query_as::<_, Person>(&format!(
        "UPDATE people SET \
            name = COALESCE($2, name), \
            role = COALESCE($3, role), \
            department_id = COALESCE($4, department_id), \
            email = COALESCE($5, email), \
            phone = COALESCE($6, phone), \
            location = COALESCE($7, location), \
            timezone = COALESCE($8, timezone), \
            bio = COALESCE($9, bio), \
            image_url = COALESCE($10, image_url), \
            responsibilities = COALESCE($11, responsibilities), \
            personality_type = COALESCE($12, personality_type), \
            updated_at = now() \
         WHERE id = $1 \
         RETURNING {PERSON_COLUMNS}"
    ))
    .bind(id)
    .bind(patch.name)
    .bind(patch.role)
    .bind(patch.department_id)
    .bind(patch.email)
    .bind(patch.phone)
    .bind(patch.location)
    .bind(patch.timezone)
    .bind(patch.bio)
    .bind(patch.image_url)
    .bind(patch.responsibilities)
    .bind(patch.personality_type)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    person.ok_or_else(|| Error::NotFound(format!("Person with ID {} not found", id)))
}

use crate::models::documents::{Document, DocumentFilters};
use crate::{
    DbConn,
    error::{Error, Result},
};
use uuid::Uuid;

const DOCUMENT_COLUMNS: &str =
    "id, organization_id, person_id, title, description, file_type, is_public, tags, created_at";

/// Keyword OR-match over title and description, newest first. An optional
/// file-type filter narrows the result.
pub async fn search_documents(
    conn: &mut DbConn,
    organization_id: Uuid,
    query: &str,
    filters: &DocumentFilters,
) -> Result<Vec<Document>> {
    let documents = match &filters.file_type {
        Some(file_type) => {
            sqlx::query_as::<_, Document>(&format!(
                "SELECT {DOCUMENT_COLUMNS} FROM documents \
                 WHERE organization_id = $1 \
                   AND (title ILIKE '%' || $2 || '%' OR description ILIKE '%' || $2 || '%') \
                   AND file_type = $3 \
                 ORDER BY created_at DESC"
            ))
            .bind(organization_id)
            .bind(query)
            .bind(file_type)
            .fetch_all(conn)
            .await
        }
        None => {
            sqlx::query_as::<_, Document>(&format!(
                "SELECT {DOCUMENT_COLUMNS} FROM documents \
                 WHERE organization_id = $1 \
                   AND (title ILIKE '%' || $2 || '%' OR description ILIKE '%' || $2 || '%') \
                 ORDER BY created_at DESC"
            ))
            .bind(organization_id)
            .bind(query)
            .fetch_all(conn)
            .await
        }
    }
    .map_err(Error::Sqlx)?;

    Ok(documents)
}

use crate::models::relationships::ReportingRelationship;
use crate::{
    DbConn,
    error::{Error, Result},
};
use uuid::Uuid;

const RELATIONSHIP_COLUMNS: &str = "id, organization_id, manager_id, report_id, created_at";

/// All edges where this person is the report.
///
/// The schema allows more than one; callers pick the first and log the
/// inconsistency rather than assuming uniqueness.
pub async fn relationships_for_report(
    conn: &mut DbConn,
    report_id: Uuid,
) -> Result<Vec<ReportingRelationship>> {
    let edges = sqlx::query_as::<_, ReportingRelationship>(&format!(
        "SELECT {RELATIONSHIP_COLUMNS} FROM reporting_relationships \
         WHERE report_id = $1 ORDER BY created_at ASC"
    ))
    .bind(report_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(edges)
}

/// All edges where this person is the manager.
pub async fn relationships_for_manager(
    conn: &mut DbConn,
    manager_id: Uuid,
) -> Result<Vec<ReportingRelationship>> {
    let edges = sqlx::query_as::<_, ReportingRelationship>(&format!(
        "SELECT {RELATIONSHIP_COLUMNS} FROM reporting_relationships \
         WHERE manager_id = $1 ORDER BY created_at ASC"
    ))
    .bind(manager_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(edges)
}

/// All reporting edges in an organization.
pub async fn list_relationships(
    conn: &mut DbConn,
    organization_id: Uuid,
) -> Result<Vec<ReportingRelationship>> {
    let edges = sqlx::query_as::<_, ReportingRelationship>(&format!(
        "SELECT {RELATIONSHIP_COLUMNS} FROM reporting_relationships \
         WHERE organization_id = $1 ORDER BY created_at ASC"
    ))
    .bind(organization_id)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(edges)
}

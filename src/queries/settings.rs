use crate::models::settings::SettingsPatch;
use crate::{
    DbConn,
    error::{Error, Result},
};
use uuid::Uuid;

/// Gets the stored assistant-settings overrides for a person, if any.
pub async fn settings_for_person(
    conn: &mut DbConn,
    person_id: Uuid,
) -> Result<Option<SettingsPatch>> {
    let patch = sqlx::query_as::<_, SettingsPatch>(
        "SELECT person_id, model, temperature, max_tokens, top_p, frequency_penalty, \
                presence_penalty, persona, knowledge_level, response_style, custom_system_prompt \
         FROM ai_settings WHERE person_id = $1",
    )
    .bind(person_id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(patch)
}

/// Whether the person has an active calendar connection.
pub async fn calendar_connected(conn: &mut DbConn, person_id: Uuid) -> Result<bool> {
    let connected = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS( \
            SELECT 1 FROM calendar_connections \
            WHERE person_id = $1 AND revoked_at IS NULL \
         )",
    )
    .bind(person_id)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(connected)
}

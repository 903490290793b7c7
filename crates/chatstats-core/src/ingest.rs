use crate::entity::messages;
use crate::error::IngestError;
use crate::extract::ExtractedFields;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Stores exactly one row for a webhook body. The body is kept verbatim in
/// `raw_update`; the normalized columns are best-effort and may all be null.
/// A body that is not JSON at all is rejected without touching the database.
pub async fn store_update(
    db: &DatabaseConnection,
    raw: &str,
) -> Result<messages::Model, IngestError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let fields = ExtractedFields::from_value(&value);

    let row = messages::ActiveModel {
        chat_id: Set(fields.chat_id),
        sender_first_name: Set(fields.sender_first_name),
        sender_last_name: Set(fields.sender_last_name),
        sender_username: Set(fields.sender_username),
        message_date: Set(fields.message_date),
        topic_name: Set(fields.topic_name),
        raw_update: Set(raw.to_string()),
        ..Default::default()
    };

    Ok(row.insert(db).await?)
}

use serde::Deserialize;

/// Typed view of a bot API update. Every field is independently optional so
/// partial payloads deserialize without error.
#[derive(Debug, Default, Deserialize)]
pub struct Update {
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IncomingMessage {
    pub chat: Option<Chat>,
    pub from: Option<Sender>,
    /// Epoch seconds.
    pub date: Option<i64>,
    pub forum_topic_created: Option<ForumTopicCreated>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Chat {
    pub id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sender {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForumTopicCreated {
    pub name: Option<String>,
}

/// Normalized columns pulled out of one update. Extraction never fails once
/// the body parsed as JSON; an update that does not fit the [`Update`] shape
/// yields all-empty fields.
#[derive(Debug, Default, PartialEq)]
pub struct ExtractedFields {
    pub chat_id: Option<String>,
    pub sender_first_name: Option<String>,
    pub sender_last_name: Option<String>,
    pub sender_username: Option<String>,
    pub message_date: Option<chrono::NaiveDateTime>,
    pub topic_name: Option<String>,
}

impl ExtractedFields {
    pub fn from_value(value: &serde_json::Value) -> Self {
        let update = match Update::deserialize(value) {
            Ok(update) => update,
            Err(e) => {
                tracing::debug!("update does not match the expected shape: {}", e);
                Update::default()
            }
        };

        let Some(message) = update.message else {
            return Self::default();
        };

        let chat = message.chat.unwrap_or_default();
        let sender = message.from.unwrap_or_default();

        Self {
            chat_id: chat.id.map(|id| id.to_string()),
            sender_first_name: sender.first_name,
            sender_last_name: sender.last_name,
            sender_username: sender.username,
            message_date: message
                .date
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.naive_utc()),
            topic_name: message.forum_topic_created.and_then(|t| t.name),
        }
    }
}

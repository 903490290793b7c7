use crate::entity::messages;
use crate::error::{Result, StatsError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

/// One aggregation group: messages sharing the (first name, last name,
/// username) triple. A null username is its own group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct SenderCount {
    pub sender_first_name: Option<String>,
    pub sender_last_name: Option<String>,
    pub sender_username: Option<String>,
    pub message_count: i64,
}

/// Inclusive bounds resolved from `YYYY-MM-DD` query strings: start maps to
/// midnight, end to the last microsecond of that day.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn parse(start_date: Option<&str>, end_date: Option<&str>) -> Result<Self> {
        let start = start_date
            .map(|s| parse_day(s).map(|d| d.and_time(NaiveTime::MIN)))
            .transpose()?;

        let end = end_date
            .map(|s| {
                parse_day(s).map(|d| {
                    d.and_hms_micro_opt(23, 59, 59, 999_999)
                        .expect("23:59:59.999999 is a valid time")
                })
            })
            .transpose()?;

        Ok(Self { start, end })
    }
}

fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| StatsError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Distinct topic names with at least one stored message.
pub async fn topics(db: &DatabaseConnection) -> Result<Vec<String>> {
    Ok(messages::Entity::find()
        .select_only()
        .column(messages::Column::TopicName)
        .filter(messages::Column::TopicName.is_not_null())
        .distinct()
        .order_by_asc(messages::Column::TopicName)
        .into_tuple::<String>()
        .all(db)
        .await?)
}

/// Message counts for one topic, grouped by sender identity. Ordered by
/// first name so rendering and export are deterministic.
pub async fn sender_counts(
    db: &DatabaseConnection,
    topic_name: &str,
    range: &DateRange,
) -> Result<Vec<SenderCount>> {
    let mut query = messages::Entity::find()
        .select_only()
        .column(messages::Column::SenderFirstName)
        .column(messages::Column::SenderLastName)
        .column(messages::Column::SenderUsername)
        // COUNT(id): rows with a null chat_id still count toward their group.
        .column_as(messages::Column::Id.count(), "message_count")
        .filter(messages::Column::TopicName.eq(topic_name))
        .group_by(messages::Column::SenderFirstName)
        .group_by(messages::Column::SenderLastName)
        .group_by(messages::Column::SenderUsername)
        .order_by_asc(messages::Column::SenderFirstName);

    if let Some(start) = range.start {
        query = query.filter(messages::Column::MessageDate.gte(start));
    }
    if let Some(end) = range.end {
        query = query.filter(messages::Column::MessageDate.lte(end));
    }

    Ok(query.into_model::<SenderCount>().all(db).await?)
}

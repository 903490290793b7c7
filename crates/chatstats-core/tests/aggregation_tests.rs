use chatstats_core::entity::messages;
use chatstats_core::stats::{self, DateRange};
use chatstats_core::{db, ingest};
use sea_orm::{Database, DatabaseConnection, EntityTrait};
use serde_json::json;

async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    db::ensure_schema(&db).await.expect("Failed to create schema");
    db
}

fn update(topic: &str, first: &str, username: &str, chat_id: Option<i64>, date: i64) -> String {
    let mut message = json!({
        "from": { "first_name": first, "username": username },
        "date": date,
        "forum_topic_created": { "name": topic }
    });
    if let Some(id) = chat_id {
        message["chat"] = json!({ "id": id });
    }
    json!({ "update_id": 1, "message": message }).to_string()
}

fn epoch(date: &str) -> i64 {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp()
}

#[tokio::test]
async fn ingested_raw_payload_round_trips() {
    let db = create_test_db().await;

    let raw = update("General", "A", "a1", Some(7), epoch("2024-01-15"));
    ingest::store_update(&db, &raw).await.expect("insert");

    let rows = messages::Entity::find().all(&db).await.expect("query");
    assert_eq!(rows.len(), 1);

    let stored: serde_json::Value = serde_json::from_str(&rows[0].raw_update).expect("raw is JSON");
    let original: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, original);
}

#[tokio::test]
async fn payload_without_message_stores_null_record() {
    let db = create_test_db().await;

    let raw = json!({ "update_id": 2, "callback_query": { "data": "x" } }).to_string();
    let row = ingest::store_update(&db, &raw).await.expect("insert");

    assert_eq!(row.chat_id, None);
    assert_eq!(row.sender_first_name, None);
    assert_eq!(row.sender_username, None);
    assert_eq!(row.message_date, None);
    assert_eq!(row.topic_name, None);
    assert_eq!(row.raw_update, raw);
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let db = create_test_db().await;

    let err = ingest::store_update(&db, "not json at all").await.unwrap_err();
    assert!(matches!(err, chatstats_core::error::IngestError::Malformed(_)));

    let rows = messages::Entity::find().all(&db).await.expect("query");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn counts_group_by_sender_identity() {
    let db = create_test_db().await;

    let day = epoch("2024-01-15");
    for raw in [
        update("General", "A", "a1", Some(1), day),
        update("General", "A", "a1", Some(1), day),
        update("General", "B", "b1", Some(1), day),
        update("Announcements", "A", "a1", Some(1), day),
    ] {
        ingest::store_update(&db, &raw).await.expect("insert");
    }

    let rows = stats::sender_counts(&db, "General", &DateRange::default())
        .await
        .expect("aggregate");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sender_first_name.as_deref(), Some("A"));
    assert_eq!(rows[0].message_count, 2);
    assert_eq!(rows[1].sender_first_name.as_deref(), Some("B"));
    assert_eq!(rows[1].message_count, 1);

    let total: i64 = rows.iter().map(|r| r.message_count).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn same_name_different_username_is_a_distinct_group() {
    let db = create_test_db().await;

    let day = epoch("2024-01-15");
    ingest::store_update(&db, &update("General", "A", "a1", Some(1), day))
        .await
        .expect("insert");
    ingest::store_update(&db, &update("General", "A", "a2", Some(1), day))
        .await
        .expect("insert");

    let rows = stats::sender_counts(&db, "General", &DateRange::default())
        .await
        .expect("aggregate");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.message_count == 1));
}

#[tokio::test]
async fn null_chat_id_still_counts_toward_its_group() {
    let db = create_test_db().await;

    let day = epoch("2024-01-15");
    ingest::store_update(&db, &update("General", "A", "a1", Some(1), day))
        .await
        .expect("insert");
    ingest::store_update(&db, &update("General", "A", "a1", None, day))
        .await
        .expect("insert");

    let rows = stats::sender_counts(&db, "General", &DateRange::default())
        .await
        .expect("aggregate");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].message_count, 2);
}

#[tokio::test]
async fn date_range_filters_inclusively() {
    let db = create_test_db().await;

    for day in ["2024-01-10", "2024-01-15", "2024-01-20"] {
        ingest::store_update(&db, &update("General", "A", "a1", Some(1), epoch(day)))
            .await
            .expect("insert");
    }

    let range = DateRange::parse(Some("2024-01-15"), Some("2024-01-20")).unwrap();
    let rows = stats::sender_counts(&db, "General", &range).await.expect("aggregate");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].message_count, 2);
}

#[tokio::test]
async fn start_after_end_yields_empty_result() {
    let db = create_test_db().await;

    ingest::store_update(
        &db,
        &update("General", "A", "a1", Some(1), epoch("2024-01-15")),
    )
    .await
    .expect("insert");

    let range = DateRange::parse(Some("2024-02-01"), Some("2024-01-01")).unwrap();
    let rows = stats::sender_counts(&db, "General", &range).await.expect("aggregate");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn topics_are_distinct_and_exclude_null() {
    let db = create_test_db().await;

    let day = epoch("2024-01-15");
    ingest::store_update(&db, &update("General", "A", "a1", Some(1), day))
        .await
        .expect("insert");
    ingest::store_update(&db, &update("General", "B", "b1", Some(1), day))
        .await
        .expect("insert");
    ingest::store_update(&db, &update("Announcements", "A", "a1", Some(1), day))
        .await
        .expect("insert");
    // No topic on this one.
    ingest::store_update(&db, &json!({ "update_id": 9 }).to_string())
        .await
        .expect("insert");

    let topics = stats::topics(&db).await.expect("topics");
    assert_eq!(topics, vec!["Announcements".to_string(), "General".to_string()]);
}

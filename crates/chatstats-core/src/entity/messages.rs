use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored webhook update. Rows are insert-only: normalized columns are
/// best-effort extractions, `raw_update` always holds the inbound body.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(nullable)]
    pub chat_id: Option<String>,
    #[sea_orm(nullable)]
    pub sender_first_name: Option<String>,
    #[sea_orm(nullable)]
    pub sender_last_name: Option<String>,
    #[sea_orm(nullable)]
    pub sender_username: Option<String>,
    #[sea_orm(nullable)]
    pub message_date: Option<DateTime>,
    #[sea_orm(nullable)]
    pub topic_name: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub raw_update: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use crate::entity::messages;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

/// Creates the messages table from the entity definition if it does not
/// exist yet.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(messages::Entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

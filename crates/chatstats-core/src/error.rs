use thiserror::Error;

/// Ingestion failure kinds. The HTTP layer acknowledges the webhook either
/// way; the distinction only feeds the logs.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type Result<T, E = StatsError> = std::result::Result<T, E>;

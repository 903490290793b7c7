pub mod api;
pub mod config;
pub mod export;
pub mod report;

use sea_orm::DatabaseConnection;

pub use config::AppConfig;

pub struct AppState {
    pub db: DatabaseConnection,
    pub templates: minijinja::Environment<'static>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> anyhow::Result<Self> {
        Ok(Self {
            db,
            templates: report::environment()?,
        })
    }
}

pub use api::create_router;

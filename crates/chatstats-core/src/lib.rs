pub mod db;
pub mod entity;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod stats;

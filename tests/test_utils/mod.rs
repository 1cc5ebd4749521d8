//! Test utilities for database and HTTP testing.
//!
//! Sets up in-memory SQLite databases with migrations applied and builds the
//! full application router on top of them.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use brands::config::AppConfig;
use brands::models::BrandDraft;
use brands::models::brand::Model as BrandModel;
use brands::repositories::{BrandRepository, BrandStore};
use brands::server::{AppState, create_app};
use brands::validation;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the application router over the given database.
#[allow(dead_code)]
pub fn test_app(db: DatabaseConnection) -> Router {
    let config = AppConfig {
        profile: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        ..Default::default()
    };

    create_app(AppState {
        config: Arc::new(config),
        db,
    })
}

/// Inserts a brand directly through the repository, bypassing the service.
#[allow(dead_code)]
pub async fn insert_brand(db: &DatabaseConnection, draft: BrandDraft) -> Result<BrandModel> {
    let validated = validation::validate(draft)
        .map_err(|found| anyhow::anyhow!("invalid fixture: {:?}", found))?;
    let brand = BrandRepository::new(db.clone()).insert(validated).await?;
    Ok(brand)
}

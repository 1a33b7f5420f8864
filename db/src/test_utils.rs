//! Fixtures for tests in this crate and its dependents.

use chrono::{Duration, Utc};
use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::models::{assignment, profile};

/// Fresh in-memory SQLite database with every migration applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Inserts an assignment due in a week.
pub async fn seed_assignment(db: &DatabaseConnection, title: &str) -> assignment::Model {
    assignment::Model::create(db, title, "Speak for one minute", Utc::now() + Duration::days(7))
        .await
        .expect("Failed to seed assignment")
}

pub async fn seed_student(db: &DatabaseConnection, id: &str, name: &str) -> profile::Model {
    profile::Model::create(db, id, profile::Role::Student, name)
        .await
        .expect("Failed to seed student profile")
}

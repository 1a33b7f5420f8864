pub mod models;
pub mod repositories;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use util::{config, paths};

/// Opens the database named by `DATABASE_PATH`.
///
/// Accepts either a full DSN or a bare SQLite file path; for a file path the
/// parent directory is created and the file is opened in read-write-create mode.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let url = paths::database_url(&config::database_path());
    tracing::info!(url = %url, "Connecting to database");
    Database::connect(&url).await
}

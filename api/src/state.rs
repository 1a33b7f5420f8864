//! Application state shared across Axum route handlers.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use db::repositories::SeaOrmSubmissionStore;
use services::SubmissionCoordinator;
use services::media::{
    BackupStorage, HttpAnalysisSink, LocalBackupStorage, MediaTransferAgent, RemoteBackupStorage,
};
use util::config::{self, BackupStorageMode};
use util::paths;

/// Central application state.
///
/// Holds the database connection (used directly by the assignment routes) and
/// the submission coordinator, which owns its own handle to the same
/// connection through a [`SeaOrmSubmissionStore`].
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    coordinator: Arc<SubmissionCoordinator>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, coordinator: SubmissionCoordinator) -> Self {
        Self {
            db,
            coordinator: Arc::new(coordinator),
        }
    }

    /// Builds the state with the given transfer backends and a SeaORM store.
    pub fn with_transfer(db: DatabaseConnection, transfer: MediaTransferAgent) -> Self {
        let store = Arc::new(SeaOrmSubmissionStore::new(db.clone()));
        Self::new(db, SubmissionCoordinator::new(store, transfer))
    }

    /// Builds the state with transfer backends chosen from configuration.
    pub fn from_config(db: DatabaseConnection) -> Self {
        let analysis = Arc::new(HttpAnalysisSink::new(config::analysis_webhook_url()));
        if analysis.endpoint().is_empty() {
            tracing::warn!("ANALYSIS_WEBHOOK_URL is not set; recordings will be rejected");
        }

        let backup: Arc<dyn BackupStorage> = match config::backup_storage_mode() {
            BackupStorageMode::Local => {
                let root = paths::media_storage_root();
                info!(root = %root.display(), "Using local backup storage");
                Arc::new(LocalBackupStorage::new(root, config::media_public_base_url()))
            }
            BackupStorageMode::Remote => {
                info!(url = %config::storage_url(), bucket = %config::storage_bucket(), "Using remote backup storage");
                Arc::new(RemoteBackupStorage::new(
                    config::storage_url(),
                    config::storage_bucket(),
                    config::storage_service_key(),
                ))
            }
        };

        Self::with_transfer(db, MediaTransferAgent::new(analysis, backup))
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn coordinator(&self) -> &SubmissionCoordinator {
        &self.coordinator
    }
}

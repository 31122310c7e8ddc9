//! Server state

use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::ImageStore;
use crate::utils::AppError;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: SqlitePool,
    pub images: ImageStore,
}

impl ServerState {
    /// Initialize database, image store and shared state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let work_dir = PathBuf::from(&config.work_dir);
        std::fs::create_dir_all(&work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db_path = work_dir.join("inventory.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let images = ImageStore::new(work_dir.join("uploads/images"));
        images.ensure_dir()?;

        Ok(Self {
            config: config.clone(),
            db: db_service.pool,
            images,
        })
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{GradeService, StudentService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted internally).
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool; the storage handle injected into services.
    pub pool: gradebook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn students(&self) -> StudentService {
        StudentService::new(self.pool.clone())
    }

    pub fn grades(&self) -> GradeService {
        GradeService::new(self.pool.clone())
    }
}

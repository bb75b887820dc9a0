use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::service::{DepartmentService, StaffService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
    pub staff: StaffService,
    pub departments: DepartmentService,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the services once around the shared pool
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let db = Arc::new(db);
        Self {
            staff: StaffService::new(db.clone()),
            departments: DepartmentService::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }
}

//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{CatalogRepository, CirculationRepository, Clock, MembershipRepository};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::Config;
use crate::infrastructure::{
    SeaOrmCatalogRepository, SeaOrmCirculationRepository, SeaOrmMembershipRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    db: DatabaseConnection,
    /// Books, copies and lookup tables
    pub catalog: Arc<dyn CatalogRepository>,
    /// Members and staff
    pub membership: Arc<dyn MembershipRepository>,
    /// Issue/return/fine lifecycle
    pub circulation: Arc<dyn CirculationRepository>,
    /// Source of the library's calendar day
    pub clock: Arc<dyn Clock>,
    /// Staff member recorded on a loan when the request names none
    pub default_staff_id: i32,
}

impl AppState {
    /// Create a new AppState using the wall clock at the configured offset
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        let clock = Arc::new(SystemClock::with_offset_minutes(config.utc_offset_minutes));
        Self::with_clock(db, config, clock)
    }

    /// Create a new AppState with an explicit clock
    pub fn with_clock(db: DatabaseConnection, config: &Config, clock: Arc<dyn Clock>) -> Self {
        let catalog = Arc::new(SeaOrmCatalogRepository::new(db.clone(), clock.clone()));
        let membership = Arc::new(SeaOrmMembershipRepository::new(db.clone(), clock.clone()));
        let circulation = Arc::new(SeaOrmCirculationRepository::new(
            db.clone(),
            clock.clone(),
            config.fine_rate_per_day,
        ));

        Self {
            db,
            catalog,
            membership,
            circulation,
            clock,
            default_staff_id: config.default_staff_id,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

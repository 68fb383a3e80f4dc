use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::db::DbConn;
use crate::services::clock::{Clock, SystemClock};
use crate::services::notification::NotificationService;
use crate::services::report::ReportService;

/// Clock shared by every handler
pub type SharedClock = Arc<dyn Clock>;

/// Application state containing all shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub clock: SharedClock,
    pub notification: NotificationService,
    pub reports: ReportService,
}

impl AppState {
    pub fn new(db: DbConn, clock: SharedClock) -> Self {
        Self {
            notification: NotificationService::new(db.clone()),
            reports: ReportService::new(db.clone()),
            db,
            clock,
        }
    }

    /// State backed by the wall clock
    pub fn with_system_clock(db: DbConn) -> Self {
        Self::new(db, Arc::new(SystemClock))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

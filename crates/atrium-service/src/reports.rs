//! # Reports
//!
//! The owner's numbers: revenue per business date (food, rooms, halls) and
//! the sales history board.

use chrono::NaiveDate;

use atrium_core::{DailyReport, SalesRecord};
use atrium_db::Database;

use crate::error::ServiceResult;

/// Revenue reporting.
#[derive(Clone)]
pub struct ReportService {
    db: Database,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        ReportService { db }
    }

    /// Revenue for one business date: food orders placed that day, rooms
    /// checked in that day, hall events held that day.
    pub async fn daily_report(&self, date: NaiveDate) -> ServiceResult<DailyReport> {
        Ok(DailyReport {
            food_cents: self.db.orders().daily_food_total(date).await?,
            rooms_cents: self.db.rooms().daily_rooms_total(date).await?,
            halls_cents: self.db.halls().daily_halls_total(date).await?,
        })
    }

    /// Finalized orders, newest first.
    pub async fn sales_history(&self) -> ServiceResult<Vec<SalesRecord>> {
        Ok(self.db.orders().sales_history().await?)
    }

    /// Wipes orders and bookings. The presentation layer gates this behind
    /// an admin confirmation.
    pub async fn reset_sales(&self) -> ServiceResult<()> {
        Ok(self.db.orders().reset_sales().await?)
    }
}

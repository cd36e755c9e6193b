//! # Banquet Workflow
//!
//! Hall quoting and event booking. A date conflict from the store's unique
//! index surfaces as [`ServiceError::HallDateTaken`].

use chrono::NaiveDate;
use tracing::info;

use atrium_core::events::{quote_event, services_summary, EventService};
use atrium_core::validation::validate_name;
use atrium_core::{Hall, HallBooking, Money};
use atrium_db::{Database, HallBookingRecord};

use crate::error::{ServiceError, ServiceResult};

/// Orchestrates hall bookings.
#[derive(Clone)]
pub struct BanquetService {
    db: Database,
}

impl BanquetService {
    pub fn new(db: Database) -> Self {
        BanquetService { db }
    }

    pub async fn halls(&self) -> ServiceResult<Vec<Hall>> {
        Ok(self.db.halls().list().await?)
    }

    /// The price of an event: day rate plus selected service surcharges.
    pub async fn quote(&self, hall_id: &str, services: &[EventService]) -> ServiceResult<Money> {
        let hall = self.hall(hall_id).await?;
        Ok(quote_event(hall.day_rate(), services))
    }

    /// Books a hall for a date at the quoted total.
    pub async fn book(
        &self,
        hall_id: &str,
        client_name: &str,
        client_phone: &str,
        event_date: NaiveDate,
        event_type: &str,
        services: &[EventService],
    ) -> ServiceResult<HallBooking> {
        validate_name("client name", client_name)?;
        let hall = self.hall(hall_id).await?;
        let total = quote_event(hall.day_rate(), services);

        let booking = self
            .db
            .halls()
            .book(
                hall_id,
                client_name,
                client_phone,
                event_date,
                event_type,
                &services_summary(services),
                total.cents(),
            )
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    ServiceError::HallDateTaken { date: event_date }
                } else {
                    e.into()
                }
            })?;

        info!(hall = %hall.name, %event_date, total = %total, "hall booked");
        Ok(booking)
    }

    /// Cancels a booking, freeing its date.
    pub async fn cancel(&self, booking_id: &str) -> ServiceResult<()> {
        Ok(self.db.halls().cancel(booking_id).await?)
    }

    /// Confirmed bookings for the events board.
    pub async fn upcoming(&self) -> ServiceResult<Vec<HallBookingRecord>> {
        Ok(self.db.halls().upcoming().await?)
    }

    async fn hall(&self, hall_id: &str) -> ServiceResult<Hall> {
        self.db
            .halls()
            .get(hall_id)
            .await?
            .ok_or_else(|| ServiceError::UnknownHall(hall_id.to_string()))
    }
}

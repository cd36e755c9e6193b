//! # Front Desk Workflow
//!
//! Room operations: check-in, the folio preview while the guest is in
//! house, and checkout settlement. Checkout renders the folio invoice
//! first; only a written document lets the booking close and the room free
//! up.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use atrium_core::stay::{billable_nights, folio_totals, FolioTotals};
use atrium_core::validation::validate_name;
use atrium_core::{Booking, Money, PaymentMode, Room, RoomOverview};
use atrium_db::{Database, OrderSlot};
use atrium_print::{DocumentGenerator, FolioInvoice, FolioLine};

use crate::error::{ServiceError, ServiceResult};

/// Result of a guest checkout.
#[derive(Debug)]
pub struct CheckoutOutcome {
    pub booking: Booking,
    pub totals: FolioTotals,
    pub document: PathBuf,
}

/// Orchestrates the front-desk workflow.
#[derive(Clone)]
pub struct FrontDeskService {
    db: Database,
    docs: Arc<dyn DocumentGenerator>,
}

impl FrontDeskService {
    pub fn new(db: Database, docs: Arc<dyn DocumentGenerator>) -> Self {
        FrontDeskService { db, docs }
    }

    /// All rooms with active guest names, for the front-desk board.
    pub async fn room_overview(&self) -> ServiceResult<Vec<RoomOverview>> {
        Ok(self.db.rooms().list_overview().await?)
    }

    pub async fn add_room(
        &self,
        room_number: &str,
        room_type: &str,
        nightly_rate_cents: i64,
    ) -> ServiceResult<Room> {
        validate_name("room number", room_number)?;
        atrium_core::validation::validate_price("nightly rate", nightly_rate_cents)?;
        Ok(self.db.rooms().add(room_number, room_type, nightly_rate_cents).await?)
    }

    pub async fn delete_room(&self, room_number: &str) -> ServiceResult<()> {
        Ok(self.db.rooms().delete(room_number).await?)
    }

    /// Checks a guest in, creating the ACTIVE booking and occupying the
    /// room.
    pub async fn check_in(
        &self,
        room_number: &str,
        guest_name: &str,
        guest_phone: &str,
    ) -> ServiceResult<Booking> {
        validate_name("guest name", guest_name)?;
        let booking = self.db.rooms().check_in(room_number, guest_name, guest_phone).await?;
        info!(room_number, guest = %booking.guest_name, "guest checked in");
        Ok(booking)
    }

    /// What the guest owes right now: nights so far plus the room-service
    /// total. Read-only.
    pub async fn folio_preview(&self, room_number: &str) -> ServiceResult<FolioTotals> {
        let room = self.room(room_number).await?;
        let booking = self.active_booking(room_number).await?;

        let nights = billable_nights(booking.checked_in_at, Utc::now());
        let service_total = self.db.orders().room_service_total(room_number).await?;

        Ok(folio_totals(
            room.nightly_rate(),
            nights,
            Money::from_cents(service_total),
        ))
    }

    /// Checks the guest out: renders and writes the folio invoice, then
    /// closes the room's open orders, closes the booking, and frees the
    /// room. A render failure leaves everything in house.
    pub async fn check_out(
        &self,
        room_number: &str,
        payment_mode: PaymentMode,
    ) -> ServiceResult<CheckoutOutcome> {
        let room = self.room(room_number).await?;
        let booking = self.active_booking(room_number).await?;

        let now = Utc::now();
        let nights = billable_nights(booking.checked_in_at, now);
        let service_lines = self.db.orders().room_service_lines(room_number).await?;
        let service_total: i64 = service_lines.iter().map(|l| l.total_cents).sum();
        let totals = folio_totals(
            room.nightly_rate(),
            nights,
            Money::from_cents(service_total),
        );

        let folio = FolioInvoice {
            venue: self.db.settings().venue_profile().await?,
            invoice_no: FolioInvoice::invoice_no(room_number, now),
            room_number: room_number.to_string(),
            guest_name: booking.guest_name.clone(),
            guest_phone: booking.guest_phone.clone(),
            checked_in_at: booking.checked_in_at,
            checked_out_at: now,
            nights,
            nightly_rate: room.nightly_rate(),
            service_lines: service_lines
                .into_iter()
                .map(|l| FolioLine {
                    description: l.item_name,
                    quantity: l.quantity,
                    unit_price: Money::from_cents(l.unit_price_cents),
                    total: Money::from_cents(l.total_cents),
                })
                .collect(),
            totals,
            payment_mode,
        };
        let document = self.docs.folio(&folio)?;

        // Document exists: now retire the stay
        self.db
            .orders()
            .close_open(&OrderSlot::Room(room_number.to_string()))
            .await?;
        let booking = self.db.rooms().check_out(room_number).await?;

        info!(room_number, guest = %booking.guest_name, total = %totals.grand_total, "guest checked out");
        Ok(CheckoutOutcome {
            booking,
            totals,
            document,
        })
    }

    async fn room(&self, room_number: &str) -> ServiceResult<Room> {
        self.db
            .rooms()
            .get(room_number)
            .await?
            .ok_or_else(|| ServiceError::UnknownRoom(room_number.to_string()))
    }

    async fn active_booking(&self, room_number: &str) -> ServiceResult<Booking> {
        self.db
            .rooms()
            .active_booking(room_number)
            .await?
            .ok_or_else(|| ServiceError::NoActiveBooking(room_number.to_string()))
    }
}

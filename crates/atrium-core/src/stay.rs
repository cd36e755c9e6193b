//! # Stay Module
//!
//! Folio arithmetic for room stays: billable nights and the settlement
//! totals (room charges + room-service charges, with the CGST/SGST split
//! applied to the combined subtotal).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::TaxRate;

/// Central GST component applied on folio settlement.
pub const CGST_BPS: u32 = 900;
/// State GST component applied on folio settlement.
pub const SGST_BPS: u32 = 900;

/// Whole nights between check-in and checkout, minimum one.
///
/// A same-day checkout still bills a full night.
pub fn billable_nights(checked_in_at: DateTime<Utc>, checked_out_at: DateTime<Utc>) -> i64 {
    let nights = (checked_out_at - checked_in_at).num_days();
    nights.max(1)
}

/// Settlement totals for one stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolioTotals {
    /// `nightly_rate × nights`.
    pub room_charges: Money,
    /// Sum of the stay's room-service order lines.
    pub service_charges: Money,
    pub subtotal: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub grand_total: Money,
}

/// Computes folio totals from the nightly rate, night count, and the
/// room-service total accumulated over the stay.
pub fn folio_totals(nightly_rate: Money, nights: i64, service_charges: Money) -> FolioTotals {
    let room_charges = nightly_rate.multiply_quantity(nights);
    let subtotal = room_charges + service_charges;
    let cgst = subtotal.calculate_tax(TaxRate::from_bps(CGST_BPS));
    let sgst = subtotal.calculate_tax(TaxRate::from_bps(SGST_BPS));
    FolioTotals {
        room_charges,
        service_charges,
        subtotal,
        cgst,
        sgst,
        grand_total: subtotal + cgst + sgst,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn nights_minimum_one() {
        let check_in = Utc.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap();
        let same_day = Utc.with_ymd_and_hms(2026, 3, 10, 19, 0, 0).unwrap();
        assert_eq!(billable_nights(check_in, same_day), 1);
    }

    #[test]
    fn nights_whole_days() {
        let check_in = Utc.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2026, 3, 13, 15, 30, 0).unwrap();
        assert_eq!(billable_nights(check_in, check_out), 3);
    }

    #[test]
    fn folio_worked_example() {
        // 3 nights at 2500.00 + 640.00 room service
        let totals = folio_totals(Money::from_cents(250000), 3, Money::from_cents(64000));

        assert_eq!(totals.room_charges.cents(), 750000);
        assert_eq!(totals.subtotal.cents(), 814000);
        assert_eq!(totals.cgst.cents(), 73260); // 9% = 732.60
        assert_eq!(totals.sgst.cents(), 73260);
        assert_eq!(totals.grand_total.cents(), 960520); // 9605.20
    }

    #[test]
    fn folio_without_room_service() {
        let totals = folio_totals(Money::from_cents(100000), 1, Money::zero());
        assert_eq!(totals.subtotal.cents(), 100000);
        assert_eq!(totals.grand_total.cents(), 118000);
    }
}

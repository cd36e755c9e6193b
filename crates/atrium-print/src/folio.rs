//! # Folio Invoice
//!
//! The room-stay settlement document: room charges for the billable nights,
//! the stay's room-service lines, the CGST/SGST split, and the amount in
//! words.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::stay::FolioTotals;
use atrium_core::{Money, PaymentMode, VenueProfile};

use crate::ticket::TicketBuilder;
use crate::words::amount_in_words;

/// One charge line on the folio (room-service item).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioLine {
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
}

/// A rendered-ready stay settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioInvoice {
    pub venue: VenueProfile,
    pub invoice_no: String,
    pub room_number: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub checked_in_at: DateTime<Utc>,
    pub checked_out_at: DateTime<Utc>,
    pub nights: i64,
    pub nightly_rate: Money,
    pub service_lines: Vec<FolioLine>,
    pub totals: FolioTotals,
    pub payment_mode: PaymentMode,
}

impl FolioInvoice {
    /// Derives the invoice number from checkout date and room
    /// (`INV-260310-101`).
    pub fn invoice_no(room_number: &str, checked_out_at: DateTime<Utc>) -> String {
        format!("INV-{}{}", checked_out_at.format("%y%m%d"), room_number)
    }

    /// Renders the settlement as fixed-width text.
    pub fn render(&self) -> String {
        let mut b = TicketBuilder::default();

        if !self.venue.name.is_empty() {
            b.center(&self.venue.name);
        }
        if !self.venue.address.is_empty() {
            b.center(&self.venue.address);
        }
        if !self.venue.tax_id.is_empty() {
            b.center(&format!("GSTIN: {}", self.venue.tax_id));
        }
        b.sep();

        b.line_lr("TAX INVOICE", &self.invoice_no);
        b.line_lr(
            &format!("Room: {}", self.room_number),
            &self.checked_out_at.format("%d-%b-%Y").to_string(),
        );
        b.line(&format!("Guest: {}", self.guest_name));
        if !self.guest_phone.is_empty() {
            b.line(&format!("Phone: {}", self.guest_phone));
        }
        b.line(&format!(
            "Check-In:  {}",
            self.checked_in_at.format("%Y-%m-%d %H:%M")
        ));
        b.line(&format!(
            "Check-Out: {}",
            self.checked_out_at.format("%Y-%m-%d %H:%M")
        ));
        b.sep();

        b.line_lr(
            &format!("Room Charges ({} Nights)", self.nights),
            &self.totals.room_charges.to_string(),
        );
        b.line(&format!("  @ {} per night", self.nightly_rate));

        if !self.service_lines.is_empty() {
            b.line("Room Service:");
            for line in &self.service_lines {
                b.line_lr(
                    &format!("  {} x{}", line.description, line.quantity),
                    &line.total.to_string(),
                );
            }
        }
        b.sep();

        b.line_lr("Sub Total:", &self.totals.subtotal.to_string());
        b.line_lr("CGST (9%):", &self.totals.cgst.to_string());
        b.line_lr("SGST (9%):", &self.totals.sgst.to_string());
        b.eq_sep();
        b.line_lr("GRAND TOTAL:", &format!("Rs. {}", self.totals.grand_total));
        b.line_lr("Payment Mode:", self.payment_mode.label());
        b.blank();
        b.line(&format!(
            "Amount in Words: {} Rupees Only",
            amount_in_words(self.totals.grand_total.major())
        ));

        b.finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::stay::folio_totals;
    use chrono::TimeZone;

    #[test]
    fn render_worked_example() {
        // 3 nights at 2500.00 + 640.00 room service -> 9605.20
        let checked_in = Utc.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap();
        let checked_out = Utc.with_ymd_and_hms(2026, 3, 13, 11, 0, 0).unwrap();
        let totals = folio_totals(Money::from_cents(250000), 3, Money::from_cents(64000));

        let invoice = FolioInvoice {
            venue: VenueProfile {
                name: "Atrium Suites".to_string(),
                address: "123 Hospitality Lane".to_string(),
                tax_id: "27AAAAA0000A1Z5".to_string(),
                phone: String::new(),
            },
            invoice_no: FolioInvoice::invoice_no("101", checked_out),
            room_number: "101".to_string(),
            guest_name: "Meera Nair".to_string(),
            guest_phone: "9000090000".to_string(),
            checked_in_at: checked_in,
            checked_out_at: checked_out,
            nights: 3,
            nightly_rate: Money::from_cents(250000),
            service_lines: vec![FolioLine {
                description: "Cold Coffee".to_string(),
                quantity: 2,
                unit_price: Money::from_cents(32000),
                total: Money::from_cents(64000),
            }],
            totals,
            payment_mode: PaymentMode::Card,
        };

        assert_eq!(invoice.invoice_no, "INV-260313101");

        let text = invoice.render();
        assert!(text.contains("TAX INVOICE"));
        assert!(text.contains("GSTIN: 27AAAAA0000A1Z5"));
        assert!(text.contains("Room Charges (3 Nights)"));
        assert!(text.contains("7500.00"));
        assert!(text.contains("732.60"));
        assert!(text.contains("Rs. 9605.20"));
        assert!(text.contains("CARD"));
        assert!(text.contains("Nine Thousand, Six Hundred and Five Rupees Only"));
    }
}

//! # Sale Invoice
//!
//! The customer bill for a dine-in, room-service, takeout, or delivery
//! order: per-line totals with their tax-rate annotation, then the
//! subtotal / tax / discount / grand-total block.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::{BillTotals, CustomerInfo, Money, TaxRate, VenueProfile};

use crate::ticket::TicketBuilder;

/// One billed line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub tax_rate: TaxRate,
}

impl InvoiceLine {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A rendered-ready customer bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleInvoice {
    pub venue: VenueProfile,
    /// Order label: `TABLE T1`, `ROOM 101`, `TAKEOUT`, `DELIVERY`.
    pub label: String,
    pub issued_at: DateTime<Utc>,
    /// Present for delivery orders.
    pub customer: Option<CustomerInfo>,
    pub lines: Vec<InvoiceLine>,
    pub totals: BillTotals,
}

impl SaleInvoice {
    /// Renders the bill as fixed-width text.
    pub fn render(&self) -> String {
        let mut b = TicketBuilder::default();

        if !self.venue.name.is_empty() {
            b.center(&self.venue.name);
        }
        if !self.venue.address.is_empty() {
            b.center(&self.venue.address);
        }
        if !self.venue.phone.is_empty() {
            b.center(&format!("Phone: {}", self.venue.phone));
        }
        b.sep();

        b.line_lr(
            &format!("Order: {}", self.label),
            &self.issued_at.format("%d-%b %H:%M").to_string(),
        );

        if let Some(customer) = &self.customer {
            b.line(&format!("Guest: {}", customer.name));
            if !customer.address.is_empty() {
                b.line(&format!("Addr: {}", customer.address));
            }
        }
        b.sep();

        b.line_lr("Item                      Qty", "Price");
        b.sep();
        for line in &self.lines {
            b.line_lr(
                &format!("{:<24} {:>3}", clip(&line.item_name, 24), line.quantity),
                &line.line_total().to_string(),
            );
            b.line(&format!("  (@ {}%)", line.tax_rate.percentage()));
        }
        b.sep();

        b.line_lr("Subtotal:", &self.totals.subtotal.to_string());
        b.line_lr("Tax (Total):", &self.totals.tax.to_string());
        if self.totals.discount.is_positive() {
            b.line_lr("Discount:", &format!("-{}", self.totals.discount));
        }
        b.eq_sep();
        b.line_lr("TOTAL:", &format!("Rs. {}", self.totals.total));
        b.blank();
        b.center("Thank You for Visiting!");

        b.finish()
    }
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Cart Module
//!
//! The order/cart engine: an in-memory order-in-progress, reconciled against
//! the persisted open order by full replacement on every save.
//!
//! ## Rules
//! - Adding an item merges into an existing line only when the names match
//!   AND both sides carry no note; noted lines stay distinct so per-line
//!   customization survives.
//! - Price and tax rate are snapshotted at add time; later catalog edits do
//!   not touch lines already in the cart.
//! - `printed_qty` tracks what the kitchen has already seen. A line can
//!   never drop below its printed quantity, and the KOT split only emits
//!   the unprinted remainder: sending a KOT twice with no mutation in
//!   between produces nothing.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{MenuEntry, TaxRate};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of an order-in-progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Item name at add time (denormalized; not a catalog reference).
    pub item_name: String,
    pub quantity: i64,
    /// Unit price at add time (frozen).
    pub unit_price: Money,
    /// Tax rate at add time (frozen).
    pub tax_rate: TaxRate,
    /// Quantity already sent to the kitchen.
    pub printed_qty: i64,
    /// Free-text customization; empty for none.
    pub note: String,
}

impl CartLine {
    /// A fresh quantity-1 line snapshotted from a menu entry.
    pub fn from_menu_entry(entry: &MenuEntry) -> Self {
        CartLine {
            item_name: entry.name.clone(),
            quantity: 1,
            unit_price: entry.unit_price(),
            tax_rate: entry.tax_rate(),
            printed_qty: 0,
            note: String::new(),
        }
    }

    /// `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Tax on the line total at the line's frozen rate.
    #[inline]
    pub fn line_tax(&self) -> Money {
        self.line_total().calculate_tax(self.tax_rate)
    }

    /// How much of this line has not yet gone to the kitchen.
    #[inline]
    pub fn unprinted_qty(&self) -> i64 {
        self.quantity - self.printed_qty
    }
}

// =============================================================================
// Bill Totals
// =============================================================================

/// The bill arithmetic for one cart, computed in exact integer cents:
///
/// ```text
/// subtotal = Σ unit_price × qty
/// tax      = Σ line_total × rate        (rounded per line)
/// discount = (subtotal + tax) × disc%   (single whole-order scalar)
/// total    = subtotal + tax − discount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// An order-in-progress.
///
/// Lines are ordered by insertion; indexes handed to the mutating methods
/// refer to that order, mirroring the row the operator clicked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from persisted order lines (reopening a table/room).
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Cart { lines }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Adds one unit of a menu entry.
    ///
    /// Merges into the first note-free line with the same item name;
    /// otherwise appends a quantity-1 line with price and tax snapshotted
    /// now.
    pub fn add(&mut self, entry: &MenuEntry) -> CoreResult<()> {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.item_name == entry.name && l.note.is_empty())
        {
            if line.quantity + 1 > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: line.quantity + 1,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity += 1;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_menu_entry(entry));
        Ok(())
    }

    /// Increments a line's quantity by one.
    pub fn increment(&mut self, index: usize) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        if line.quantity + 1 > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity + 1,
                max: MAX_LINE_QUANTITY,
            });
        }
        line.quantity += 1;
        Ok(())
    }

    /// Decrements a line's quantity by one; at zero the line is removed.
    ///
    /// Refused once the quantity is down to what the kitchen has already
    /// received.
    pub fn decrement(&mut self, index: usize) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        if line.quantity <= line.printed_qty {
            return Err(CoreError::PrintedQuantityLocked {
                item: line.item_name.clone(),
                printed: line.printed_qty,
            });
        }
        line.quantity -= 1;
        if line.quantity == 0 {
            self.lines.remove(index);
        }
        Ok(())
    }

    /// Attaches a note to a line. A noted line stops merging with future
    /// adds of the same item.
    pub fn set_note(&mut self, index: usize, note: impl Into<String>) -> CoreResult<()> {
        let line = self.line_mut(index)?;
        line.note = note.into();
        Ok(())
    }

    /// The lines (with quantities clamped to the unprinted remainder) that
    /// the next KOT should carry. Empty when nothing new was added since
    /// the last [`Cart::mark_printed`].
    pub fn unprinted(&self) -> Vec<CartLine> {
        self.lines
            .iter()
            .filter(|l| l.unprinted_qty() > 0)
            .map(|l| {
                let mut ticket_line = l.clone();
                ticket_line.quantity = l.unprinted_qty();
                ticket_line
            })
            .collect()
    }

    /// Records that every line has been sent to the kitchen in full.
    pub fn mark_printed(&mut self) {
        for line in &mut self.lines {
            line.printed_qty = line.quantity;
        }
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    pub fn tax(&self) -> Money {
        self.lines.iter().map(|l| l.line_tax()).sum()
    }

    /// Full bill arithmetic with a whole-order percentage discount in basis
    /// points (1000 = 10%).
    pub fn totals(&self, discount_bps: u32) -> BillTotals {
        let subtotal = self.subtotal();
        let tax = self.tax();
        let gross = subtotal + tax;
        let discount = gross.percentage(discount_bps);
        BillTotals {
            subtotal,
            tax,
            discount,
            total: gross - discount,
        }
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut CartLine> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CoreError::LineNotFound { index, len })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

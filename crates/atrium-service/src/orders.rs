//! # Order Workflow
//!
//! The order screen's operations: loading and saving a slot's cart, sending
//! kitchen tickets, settling in-house orders, and capturing takeout and
//! delivery orders.
//!
//! ## Settlement ordering
//! Documents are rendered and written **before** any status transition. A
//! failed render leaves the order OPEN and the table/room unchanged, so the
//! operator just retries; there is no closed-without-invoice state.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use atrium_core::{
    validation::{validate_discount, validate_name},
    BillTotals, Cart, CartLine, CustomerInfo, DiningTable, Money, OrderType, TableOverview,
    TaxRate,
};
use atrium_db::{Database, OrderSlot};
use atrium_print::{DocumentGenerator, InvoiceLine, KotLine, KotTicket, SaleInvoice};

use crate::error::{ServiceError, ServiceResult};

/// Result of settling an in-house order.
#[derive(Debug)]
pub struct SettleOutcome {
    pub order_id: String,
    pub totals: BillTotals,
    pub document: PathBuf,
}

/// Result of capturing a takeout/delivery order.
#[derive(Debug)]
pub struct CounterOutcome {
    pub order_id: String,
    pub totals: BillTotals,
    pub kot_document: PathBuf,
    pub invoice_document: PathBuf,
}

/// Orchestrates the order/cart workflow.
#[derive(Clone)]
pub struct OrderService {
    db: Database,
    docs: Arc<dyn DocumentGenerator>,
}

impl OrderService {
    pub fn new(db: Database, docs: Arc<dyn DocumentGenerator>) -> Self {
        OrderService { db, docs }
    }

    /// The floor plan: every table with its status and open-order total.
    pub async fn table_overview(&self) -> ServiceResult<Vec<TableOverview>> {
        Ok(self.db.tables().list_overview().await?)
    }

    pub async fn add_table(&self, table_number: &str) -> ServiceResult<DiningTable> {
        validate_name("table number", table_number)?;
        Ok(self.db.tables().add(table_number).await?)
    }

    pub async fn delete_table(&self, table_id: &str) -> ServiceResult<()> {
        Ok(self.db.tables().delete(table_id).await?)
    }

    /// Rebuilds the cart for a slot from its open order. Empty when the
    /// slot is clear.
    pub async fn load_cart(&self, slot: &OrderSlot) -> ServiceResult<Cart> {
        let lines = self.db.orders().open_lines(slot).await?;
        Ok(Cart::from_lines(
            lines
                .into_iter()
                .map(|l| CartLine {
                    item_name: l.item_name,
                    quantity: l.quantity,
                    unit_price: Money::from_cents(l.unit_price_cents),
                    tax_rate: TaxRate::from_bps(l.tax_rate_bps),
                    printed_qty: l.printed_qty,
                    note: l.note,
                })
                .collect(),
        ))
    }

    /// Persists the cart as the slot's open order (full replace, same order
    /// id on re-save) and marks a table slot occupied.
    pub async fn save_cart(
        &self,
        slot: &OrderSlot,
        order_type: OrderType,
        cart: &Cart,
    ) -> ServiceResult<String> {
        if cart.is_empty() {
            return Err(ServiceError::EmptyCart);
        }
        Ok(self.db.orders().save_open(slot, order_type, &cart.lines).await?)
    }

    /// Sends the unprinted remainder of the cart to the kitchen.
    ///
    /// Saves the order, writes the ticket, then records the print both in
    /// the store and on the in-memory cart. Returns `None`, emitting
    /// nothing, when every line has already been sent.
    pub async fn send_kot(
        &self,
        slot: &OrderSlot,
        order_type: OrderType,
        cart: &mut Cart,
    ) -> ServiceResult<Option<PathBuf>> {
        if cart.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let to_print = cart.unprinted();
        if to_print.is_empty() {
            info!(slot = ?slot, "no new items to print");
            return Ok(None);
        }

        self.save_cart(slot, order_type, cart).await?;

        let label = self.slot_label(slot).await?;
        let ticket = KotTicket::new(label, Utc::now(), kot_lines(&to_print));
        let path = self.docs.kot(&ticket)?;

        self.db.orders().mark_kot_printed(slot).await?;
        cart.mark_printed();

        info!(ticket_id = %ticket.ticket_id, lines = ticket.lines.len(), "KOT sent");
        Ok(Some(path))
    }

    /// Settles an in-house order: persists the final cart state, renders
    /// the bill, and only then closes the order and frees the slot.
    ///
    /// Settling an empty cart is a no-op: nothing is emitted and no status
    /// changes.
    pub async fn settle(
        &self,
        slot: &OrderSlot,
        order_type: OrderType,
        cart: &Cart,
        discount_bps: u32,
    ) -> ServiceResult<Option<SettleOutcome>> {
        if cart.is_empty() {
            return Ok(None);
        }
        validate_discount(discount_bps)?;

        let order_id = self.save_cart(slot, order_type, cart).await?;
        let totals = cart.totals(discount_bps);

        let invoice = SaleInvoice {
            venue: self.db.settings().venue_profile().await?,
            label: self.slot_label(slot).await?,
            issued_at: Utc::now(),
            customer: None,
            lines: invoice_lines(&cart.lines),
            totals,
        };
        let document = self.docs.invoice(&invoice)?;

        let closed = self.db.orders().close_open(slot).await?;
        if closed == 0 {
            // The save above guarantees an open order; a zero here means
            // another actor closed it between our two calls.
            warn!(slot = ?slot, "settle found no open order to close");
        }

        info!(order_id = %order_id, total = %totals.total, "order settled");
        Ok(Some(SettleOutcome {
            order_id,
            totals,
            document,
        }))
    }

    /// Captures a takeout order: KOT and bill first, then the order row
    /// lands directly CLOSED.
    pub async fn checkout_takeout(
        &self,
        cart: &Cart,
        discount_bps: u32,
    ) -> ServiceResult<CounterOutcome> {
        self.checkout_counter(OrderType::Takeout, cart, discount_bps, None)
            .await
    }

    /// Captures a delivery order with its customer record.
    pub async fn checkout_delivery(
        &self,
        cart: &Cart,
        discount_bps: u32,
        customer: CustomerInfo,
    ) -> ServiceResult<CounterOutcome> {
        validate_name("customer name", &customer.name)?;
        self.checkout_counter(OrderType::Delivery, cart, discount_bps, Some(customer))
            .await
    }

    async fn checkout_counter(
        &self,
        order_type: OrderType,
        cart: &Cart,
        discount_bps: u32,
        customer: Option<CustomerInfo>,
    ) -> ServiceResult<CounterOutcome> {
        if cart.is_empty() {
            return Err(ServiceError::EmptyCart);
        }
        validate_discount(discount_bps)?;

        let label = match order_type {
            OrderType::Delivery => "DELIVERY",
            _ => "TAKEOUT",
        };
        let now = Utc::now();
        let totals = cart.totals(discount_bps);

        let ticket = KotTicket::new(label, now, kot_lines(&cart.lines));
        let kot_document = self.docs.kot(&ticket)?;

        let invoice = SaleInvoice {
            venue: self.db.settings().venue_profile().await?,
            label: label.to_string(),
            issued_at: now,
            customer: customer.clone(),
            lines: invoice_lines(&cart.lines),
            totals,
        };
        let invoice_document = self.docs.invoice(&invoice)?;

        let order_id = self
            .db
            .orders()
            .insert_counter_order(order_type, &cart.lines, customer.as_ref())
            .await?;

        info!(order_id = %order_id, order_type = ?order_type, total = %totals.total, "counter order captured");
        Ok(CounterOutcome {
            order_id,
            totals,
            kot_document,
            invoice_document,
        })
    }

    /// Human label for a slot: the table's display number or the room
    /// number.
    async fn slot_label(&self, slot: &OrderSlot) -> ServiceResult<String> {
        match slot {
            OrderSlot::Table(table_id) => {
                let table = self
                    .db
                    .tables()
                    .get(table_id)
                    .await?
                    .ok_or_else(|| atrium_db::DbError::not_found("Table", table_id.clone()))?;
                Ok(format!("TABLE {}", table.table_number))
            }
            OrderSlot::Room(room_number) => Ok(format!("ROOM {room_number}")),
        }
    }
}

fn kot_lines(lines: &[CartLine]) -> Vec<KotLine> {
    lines
        .iter()
        .map(|l| KotLine {
            quantity: l.quantity,
            item_name: l.item_name.clone(),
            note: l.note.clone(),
        })
        .collect()
}

fn invoice_lines(lines: &[CartLine]) -> Vec<InvoiceLine> {
    lines
        .iter()
        .map(|l| InvoiceLine {
            item_name: l.item_name.clone(),
            quantity: l.quantity,
            unit_price: l.unit_price,
            tax_rate: l.tax_rate,
        })
        .collect()
}

//! # Domain Types
//!
//! Core domain types for the Atrium hospitality system: the catalog
//! (categories and menu items), the three bookable resources (dining tables,
//! rooms, banquet halls), orders and their lines, and the supporting
//! value types ([`TaxRate`], [`PriceMode`], [`Role`]).
//!
//! ## Identity
//! Rows the database creates get UUID v4 string ids; rooms are keyed by
//! their human-facing `room_number`, and categories/halls carry unique
//! names alongside their id.
//!
//! ## Status tokens
//! Status enums persist as SCREAMING_SNAKE_CASE text (`AVAILABLE`,
//! `CHECKED_OUT`, ...), which is also their JSON representation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bp = 0.01%, so 500 = 5%).
///
/// Integer basis points keep per-line tax math exact; percentages exist for
/// display and data entry only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (`5.0` → 500 bps).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a percentage, for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Price Mode
// =============================================================================

/// Selects which of an item's two prices applies to an order context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceMode {
    /// Table and room-service orders use the dine-in price.
    DineIn,
    /// Delivery (and takeout pickup) orders use the delivery price.
    Delivery,
}

impl PriceMode {
    /// The price mode an order type implies.
    pub fn for_order_type(order_type: OrderType) -> Self {
        match order_type {
            OrderType::Delivery => PriceMode::Delivery,
            _ => PriceMode::DineIn,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A menu category with its default tax rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    /// Unique display name (`FOOD`, `DRINKS`, ...).
    pub name: String,
    /// Default tax rate applied to items without their own override.
    pub tax_rate_bps: u32,
}

impl Category {
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

/// A sellable menu item.
///
/// Carries both prices; [`PriceMode`] picks one at listing time. A `None`
/// tax rate means "use the category default" (and zero when the item is
/// uncategorized). This is the one canonical fallback rule in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category_id: Option<String>,
    pub dine_in_price_cents: i64,
    pub delivery_price_cents: i64,
    pub image_path: Option<String>,
    pub tax_rate_bps: Option<u32>,
}

impl MenuItem {
    /// The unit price for the given mode.
    pub fn unit_price(&self, mode: PriceMode) -> Money {
        match mode {
            PriceMode::DineIn => Money::from_cents(self.dine_in_price_cents),
            PriceMode::Delivery => Money::from_cents(self.delivery_price_cents),
        }
    }

    /// Item override → category default → zero.
    pub fn effective_tax_rate(&self, category_default: Option<TaxRate>) -> TaxRate {
        match self.tax_rate_bps {
            Some(bps) => TaxRate::from_bps(bps),
            None => category_default.unwrap_or_else(TaxRate::zero),
        }
    }
}

/// A menu projection for one price mode: what the order screen renders and
/// what the cart snapshots from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuEntry {
    pub item_id: String,
    pub name: String,
    /// Category display name; empty for uncategorized items.
    pub category: String,
    pub unit_price_cents: i64,
    /// Already-resolved tax rate (item override → category default → 0).
    pub tax_rate_bps: u32,
    pub image_path: String,
}

impl MenuEntry {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

// =============================================================================
// Dining Tables
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Available,
    Occupied,
}

/// A dining table. At most one OPEN order refers to it at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: String,
    /// Display number/name shown on the floor plan (`T1`, `Patio 2`).
    pub table_number: String,
    pub status: TableStatus,
}

/// Floor-plan projection: a table plus the running total of its open order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TableOverview {
    pub id: String,
    pub table_number: String,
    pub status: TableStatus,
    /// Sum of open order line totals; zero for a free table.
    pub open_total_cents: i64,
}

// =============================================================================
// Rooms & Bookings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Room {
    /// Human-facing key (`101`, `Suite A`).
    pub room_number: String,
    pub room_type: String,
    pub nightly_rate_cents: i64,
    pub status: RoomStatus,
}

impl Room {
    #[inline]
    pub fn nightly_rate(&self) -> Money {
        Money::from_cents(self.nightly_rate_cents)
    }
}

/// Front-desk projection: a room plus the active guest, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RoomOverview {
    pub room_number: String,
    pub room_type: String,
    pub nightly_rate_cents: i64,
    pub status: RoomStatus,
    pub guest_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Active,
    CheckedOut,
}

/// A room stay: created at check-in, closed at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: String,
    pub room_number: String,
    pub guest_name: String,
    pub guest_phone: String,
    pub checked_in_at: DateTime<Utc>,
    /// Null while the guest is in house.
    pub checked_out_at: Option<DateTime<Utc>>,
    pub status: BookingStatus,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accumulating lines; exactly one per table/room at a time.
    Open,
    /// Finalized. A closed order's id is never reused.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    DineIn,
    RoomService,
    Takeout,
    Delivery,
}

/// How a settled bill was paid. Recorded on the printed document only; the
/// system keeps no ledger beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Cash,
    Upi,
    Card,
}

impl PaymentMode {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "CASH",
            PaymentMode::Upi => "UPI / QR",
            PaymentMode::Card => "CARD",
        }
    }
}

/// Customer details captured for delivery orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// An order row. Attached to a table XOR a room for dine-in/room-service;
/// both slots are empty for takeout and delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub table_id: Option<String>,
    pub room_number: Option<String>,
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Business date, used by the daily revenue report.
    pub order_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
}

/// A persisted order line. Item name, price, and tax rate are snapshots
/// taken when the line entered the cart; `total_cents` is denormalized as
/// `unit_price × quantity` at last write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub tax_rate_bps: u32,
    pub total_cents: i64,
    /// How much of `quantity` has already gone to the kitchen.
    pub printed_qty: i64,
    /// Free-text customization; empty for none.
    pub note: String,
}

/// One finalized order in the sales history, with a human summary like
/// `2x Burger, 1x Coke`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SalesRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub order_type: OrderType,
    /// Table number, room number, or `-` for counter orders.
    pub label: String,
    pub summary: String,
    pub total_cents: i64,
}

// =============================================================================
// Banquet Halls
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Hall {
    pub id: String,
    /// Unique display name (`Grand Ballroom`).
    pub name: String,
    pub capacity: i64,
    pub day_rate_cents: i64,
}

impl Hall {
    #[inline]
    pub fn day_rate(&self) -> Money {
        Money::from_cents(self.day_rate_cents)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HallBookingStatus {
    Confirmed,
    Cancelled,
}

/// A banquet booking. At most one confirmed booking per (hall, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HallBooking {
    pub id: String,
    pub hall_id: String,
    pub client_name: String,
    pub client_phone: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    /// Comma-joined summary of the selected add-on services.
    pub services: String,
    pub total_cents: i64,
    pub status: HallBookingStatus,
}

// =============================================================================
// Users & Settings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Cashier,
}

/// A login user. The PIN is the whole credential, checked verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub username: String,
    pub pin: String,
    pub role: Role,
}

/// Settings-backed venue identity, printed on invoice headers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VenueProfile {
    pub name: String,
    pub address: String,
    /// Tax registration number (GSTIN).
    pub tax_id: String,
    pub phone: String,
}

/// Revenue totals for one business date.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DailyReport {
    pub food_cents: i64,
    pub rooms_cents: i64,
    pub halls_cents: i64,
}

impl DailyReport {
    #[inline]
    pub fn total_cents(&self) -> i64 {
        self.food_cents + self.rooms_cents + self.halls_cents
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_rate_conversions() {
        let rate = TaxRate::from_percentage(5.0);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
        assert!(TaxRate::zero().is_zero());
    }

    #[test]
    fn price_mode_per_order_type() {
        assert_eq!(
            PriceMode::for_order_type(OrderType::Delivery),
            PriceMode::Delivery
        );
        assert_eq!(
            PriceMode::for_order_type(OrderType::DineIn),
            PriceMode::DineIn
        );
        assert_eq!(
            PriceMode::for_order_type(OrderType::Takeout),
            PriceMode::DineIn
        );
    }

    #[test]
    fn menu_item_tax_fallback() {
        let mut item = MenuItem {
            id: "i1".into(),
            name: "Cheese Pizza".into(),
            category_id: Some("c1".into()),
            dine_in_price_cents: 28000,
            delivery_price_cents: 30000,
            image_path: None,
            tax_rate_bps: Some(500),
        };

        // Own rate wins over the category default
        assert_eq!(
            item.effective_tax_rate(Some(TaxRate::from_bps(1200))).bps(),
            500
        );

        // No override: category default applies
        item.tax_rate_bps = None;
        assert_eq!(
            item.effective_tax_rate(Some(TaxRate::from_bps(1200))).bps(),
            1200
        );

        // Uncategorized and no override: zero
        assert_eq!(item.effective_tax_rate(None).bps(), 0);
    }

    #[test]
    fn menu_item_price_by_mode() {
        let item = MenuItem {
            id: "i1".into(),
            name: "Coca Cola".into(),
            category_id: None,
            dine_in_price_cents: 6000,
            delivery_price_cents: 6500,
            image_path: None,
            tax_rate_bps: None,
        };
        assert_eq!(item.unit_price(PriceMode::DineIn).cents(), 6000);
        assert_eq!(item.unit_price(PriceMode::Delivery).cents(), 6500);
    }
}

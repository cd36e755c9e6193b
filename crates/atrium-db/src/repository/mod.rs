//! # Repository Implementations
//!
//! One repository per aggregate. Each holds a clone of the shared pool and
//! exposes async methods returning `DbResult`.
//!
//! - [`catalog`] - categories and menu items
//! - [`order`] - orders, order lines, sales history
//! - [`table`] - dining tables and floor-plan overview
//! - [`room`] - rooms and guest bookings
//! - [`hall`] - banquet halls and event bookings
//! - [`settings`] - key/value settings and PIN users

pub mod catalog;
pub mod hall;
pub mod order;
pub mod room;
pub mod settings;
pub mod table;

use uuid::Uuid;

/// Generates a fresh row id.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

//! # atrium-core: Pure Business Logic for Atrium
//!
//! The heart of the Atrium hospitality system: money math, the order/cart
//! engine, room-stay folio arithmetic, banquet event quoting, and input
//! validation, as pure functions with zero I/O dependencies.
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Order, Room, Hall, statuses)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The order/cart engine: merge rules, KOT split, bill totals
//! - [`stay`] - Room folio math (billable nights, CGST/SGST split)
//! - [`events`] - Banquet hall quoting (day rate + service surcharges)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output; no clocks, no queries
//! 2. **No I/O**: database, network, and file access are forbidden here
//! 3. **Integer money**: all amounts are minor currency units (i64 cents)
//! 4. **Explicit errors**: typed variants, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod events;
pub mod money;
pub mod stay;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{BillTotals, Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
pub const MAX_LINE_QUANTITY: i64 = 999;

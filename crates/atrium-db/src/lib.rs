//! # atrium-db: Database Layer for Atrium
//!
//! SQLite access for the Atrium hospitality system, via sqlx with a shared
//! connection pool and embedded migrations.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per aggregate
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atrium_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("atrium.db")).await?;
//! let tables = db.tables().list_overview().await?;
//! ```
//!
//! Multi-statement sequences that carry invariants (save-order
//! reconciliation, checkout, check-in/out) run inside explicit transactions
//! so a crash can never leave the store half-updated.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::hall::{HallBookingRecord, HallRepository};
pub use repository::order::{OrderRepository, OrderSlot, RoomServiceLine};
pub use repository::room::RoomRepository;
pub use repository::settings::SettingsRepository;
pub use repository::table::TableRepository;

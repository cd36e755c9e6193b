//! # atrium-service: Workflow Orchestration for Atrium
//!
//! The operations the presentation layer calls, one service per area:
//!
//! - [`orders::OrderService`] - cart save/reopen, KOT dispatch, settlement,
//!   takeout/delivery capture
//! - [`front_desk::FrontDeskService`] - check-in, folio, checkout
//! - [`banquet::BanquetService`] - hall quoting and event booking
//! - [`catalog::CatalogService`] - menu listing and catalog administration
//! - [`auth::AuthService`] - PIN login and rotation
//! - [`reports::ReportService`] - daily revenue and sales history
//! - [`settings::SettingsService`] - venue profile and key/value settings
//! - [`backup::BackupService`] - database file backup
//!
//! Services hold a [`atrium_db::Database`] handle (cheap to clone) and,
//! where they emit documents, an `Arc<dyn DocumentGenerator>` so tests can
//! swap the file sink for a recorder.

pub mod auth;
pub mod backup;
pub mod banquet;
pub mod catalog;
pub mod error;
pub mod front_desk;
pub mod orders;
pub mod reports;
pub mod settings;

pub use auth::AuthService;
pub use backup::BackupService;
pub use banquet::BanquetService;
pub use catalog::CatalogService;
pub use error::{ServiceError, ServiceResult};
pub use front_desk::{CheckoutOutcome, FrontDeskService};
pub use orders::{CounterOutcome, OrderService, SettleOutcome};
pub use reports::ReportService;
pub use settings::SettingsService;

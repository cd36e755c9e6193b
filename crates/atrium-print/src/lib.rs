//! # atrium-print: Document Generation for Atrium
//!
//! Fixed-width text rendering for the three documents the venue produces:
//!
//! - [`kot::KotTicket`] - the kitchen order ticket for newly added lines
//! - [`invoice::SaleInvoice`] - the customer bill for an order
//! - [`folio::FolioInvoice`] - the room-stay settlement at checkout
//!
//! Rendering is pure (`render()` returns a `String`); the
//! [`output::FileDocumentGenerator`] writes rendered documents into a
//! configured directory with timestamped names and is the seam the service
//! layer mocks in tests.

pub mod folio;
pub mod invoice;
pub mod kot;
pub mod output;
pub mod ticket;
pub mod words;

pub use folio::{FolioInvoice, FolioLine};
pub use invoice::{InvoiceLine, SaleInvoice};
pub use kot::{KotLine, KotTicket};
pub use output::{DocumentGenerator, FileDocumentGenerator, OutputConfig, PrintError, PrintResult};
pub use ticket::TicketBuilder;

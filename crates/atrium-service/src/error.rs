//! # Service Error Types
//!
//! One error enum for the workflow layer, wrapping the lower layers and
//! adding the workflow-level failures the forms present to the operator.

use chrono::NaiveDate;
use thiserror::Error;

use atrium_core::{CoreError, ValidationError};
use atrium_db::DbError;
use atrium_print::PrintError;

/// Workflow operation errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The operation needs at least one cart line.
    #[error("cart is empty")]
    EmptyCart,

    /// No such room.
    #[error("room {0} not found")]
    UnknownRoom(String),

    /// The room has no guest to check out.
    #[error("room {0} has no active booking")]
    NoActiveBooking(String),

    /// No such hall.
    #[error("hall {0} not found")]
    UnknownHall(String),

    /// The hall already has a confirmed booking for that date.
    #[error("hall is already booked for {date}")]
    HallDateTaken { date: NaiveDate },

    /// PIN did not match any user.
    #[error("invalid PIN")]
    InvalidPin,

    /// The live database is not file-backed, so there is nothing to copy.
    #[error("database is not file-backed, cannot back up")]
    NoDatabaseFile,

    /// Backup copy failed.
    #[error("backup failed: {0}")]
    BackupFailed(#[from] std::io::Error),

    /// Domain rule violation from atrium-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database failure from atrium-db.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Document generation failure from atrium-print.
    #[error(transparent)]
    Print(#[from] PrintError),
}

/// Result type for workflow operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

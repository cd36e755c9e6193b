//! # Backup
//!
//! The backup mechanism is a copy of the live database file to a
//! destination the operator picks; the timestamped default name keeps
//! successive backups apart.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use atrium_db::Database;

use crate::error::{ServiceError, ServiceResult};

/// Database file backup.
#[derive(Clone)]
pub struct BackupService {
    db: Database,
}

impl BackupService {
    pub fn new(db: Database) -> Self {
        BackupService { db }
    }

    /// Default backup file name (`Backup_Atrium_20260310_1845.db`).
    pub fn default_backup_name(at: DateTime<Utc>) -> String {
        format!("Backup_Atrium_{}.db", at.format("%Y%m%d_%H%M"))
    }

    /// Copies the live database file to `destination`. Returns the bytes
    /// written. Fails for an in-memory database.
    pub async fn backup_to(&self, destination: &Path) -> ServiceResult<PathBuf> {
        let source = self
            .db
            .database_path()
            .await
            .ok_or(ServiceError::NoDatabaseFile)?;

        fs::copy(&source, destination)?;

        info!(
            source = %source.display(),
            destination = %destination.display(),
            "backup created"
        );
        Ok(destination.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_name_is_timestamped() {
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 18, 45, 0).unwrap();
        assert_eq!(
            BackupService::default_backup_name(at),
            "Backup_Atrium_20260310_1845.db"
        );
    }
}
